use crate::model::{VehicleType, VehicleTypeId};
use serde::{Deserialize, Serialize};
use uom::si::f64::{Length, Velocity};
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

/// a class of rolling stock with fixed parameters. every line classified into
/// an archetype is served by vehicles of the matching vehicle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    #[serde(default)]
    pub seats: u32,
    pub standing_room: u32,
    pub max_velocity_mps: f64,
    pub length_m: f64,
    #[serde(default = "Archetype::default_network_mode")]
    pub network_mode: String,
}

impl Archetype {
    pub const RAIL: &'static str = "rail";

    fn default_network_mode() -> String {
        String::from(Archetype::RAIL)
    }

    pub fn rail(id: &str, standing_room: u32, max_velocity_mps: f64, length_m: f64) -> Archetype {
        Archetype {
            id: String::from(id),
            seats: 0,
            standing_room,
            max_velocity_mps,
            length_m,
            network_mode: Archetype::default_network_mode(),
        }
    }

    pub fn vehicle_type_id(&self) -> VehicleTypeId {
        VehicleTypeId::from(self.id.as_str())
    }

    pub fn to_vehicle_type(&self) -> VehicleType {
        VehicleType {
            id: self.vehicle_type_id(),
            seats: self.seats,
            standing_room: self.standing_room,
            max_velocity: Velocity::new::<meter_per_second>(self.max_velocity_mps),
            length: Length::new::<meter>(self.length_m),
            network_mode: self.network_mode.clone(),
        }
    }
}
