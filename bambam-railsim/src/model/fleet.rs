use super::{VehicleId, VehicleTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uom::si::f64::{Length, Velocity};

/// the transit vehicles of a scenario and the types they are drawn from.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    #[serde(default)]
    pub vehicle_types: BTreeMap<VehicleTypeId, VehicleType>,
    #[serde(default)]
    pub vehicles: BTreeMap<VehicleId, Vehicle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: VehicleTypeId,
    pub seats: u32,
    pub standing_room: u32,
    /// serialized in meters per second
    pub max_velocity: Velocity,
    /// serialized in meters
    pub length: Length,
    pub network_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub vehicle_type: VehicleTypeId,
    /// name of the line this vehicle was created for
    #[serde(default)]
    pub line_name: Option<String>,
}

impl Fleet {
    /// discards every vehicle and vehicle type.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.vehicle_types.clear();
    }

    pub fn contains_vehicle(&self, vehicle_id: &VehicleId) -> bool {
        self.vehicles.contains_key(vehicle_id)
    }

    pub fn contains_vehicle_type(&self, vehicle_type_id: &VehicleTypeId) -> bool {
        self.vehicle_types.contains_key(vehicle_type_id)
    }

    pub fn get_vehicle(&self, vehicle_id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    pub fn get_vehicle_type(&self, vehicle_type_id: &VehicleTypeId) -> Option<&VehicleType> {
        self.vehicle_types.get(vehicle_type_id)
    }

    pub fn add_vehicle_type(&mut self, vehicle_type: VehicleType) {
        self.vehicle_types
            .insert(vehicle_type.id.clone(), vehicle_type);
    }

    /// registers a vehicle, returning any vehicle previously stored under the
    /// same id.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Option<Vehicle> {
        self.vehicles.insert(vehicle.id.clone(), vehicle)
    }
}
