use super::{
    DepartureId, LineId, LinkId, NodeId, ResourceId, RouteId, StopFacilityId, VehicleId,
};
use itertools::Itertools;
use thiserror::Error;

/// failures raised while transforming the rail scenario aggregates. every
/// variant is fatal for the stage that raised it; conditions that should only
/// be reported are modeled as [`crate::pipeline::Advisory`] instead.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("route '{route}' of line '{line}' references stop facility '{stop}' not in timetable")]
    MissingStopFacility {
        line: LineId,
        route: RouteId,
        stop: StopFacilityId,
    },
    #[error("route '{route}' of line '{line}' references link '{link}' not in network")]
    MissingLink {
        line: LineId,
        route: RouteId,
        link: LinkId,
    },
    #[error("link '{link}' references node '{node}' not in network")]
    MissingNode { link: LinkId, node: NodeId },
    #[error("departure '{departure}' on route '{route}' of line '{line}' references vehicle '{vehicle}' not in fleet")]
    MissingVehicle {
        line: LineId,
        route: RouteId,
        departure: DepartureId,
        vehicle: VehicleId,
    },
    #[error("departure '{departure}' on route '{route}' of line '{line}' is not bound to a vehicle")]
    UnboundDeparture {
        line: LineId,
        route: RouteId,
        departure: DepartureId,
    },
    #[error("vehicle '{vehicle}' is bound to more than one departure (second binding: departure '{departure}' of line '{line}')")]
    DuplicateVehicleBinding {
        vehicle: VehicleId,
        line: LineId,
        departure: DepartureId,
    },
    #[error("unable to load region geometry: {0}")]
    GeometryLoadError(String),
    #[error("link '{link}' has more than one inverse link candidate: [{}]", .candidates.iter().join(", "))]
    ResourceAssignmentAmbiguity {
        link: LinkId,
        candidates: Vec<LinkId>,
    },
    #[error("links [{}] violate the shared resource contract (resource: {})", .links.iter().join(", "), .resource.as_ref().map(|r| r.to_string()).unwrap_or_else(|| String::from("none")))]
    InvalidResourceGroup {
        resource: Option<ResourceId>,
        links: Vec<LinkId>,
    },
    #[error("invalid scenario configuration: {0}")]
    ConfigurationError(String),
}
