mod fleet;
mod ids;
mod network;
mod scenario_error;
mod timetable;

pub use fleet::{Fleet, Vehicle, VehicleType};
pub use ids::{
    DepartureId, LineId, LinkId, NodeId, ResourceId, RouteId, StopFacilityId, VehicleId,
    VehicleTypeId,
};
pub use network::{Link, Network, Node};
pub use scenario_error::ScenarioError;
pub use timetable::{Departure, Line, Route, StopFacility, Timetable};
