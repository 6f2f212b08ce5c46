use super::FleetClassification;
use crate::model::{
    DepartureId, Fleet, LineId, RouteId, ScenarioError, Timetable, Vehicle, VehicleId,
    VehicleTypeId,
};
use kdam::tqdm;
use std::collections::BTreeMap;

/// replaces the fleet of a scenario with one vehicle per departure, typed by
/// the archetype of the departure's line.
#[derive(Debug, Clone, Default)]
pub struct FleetEnricher {
    pub classification: FleetClassification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub vehicles_discarded: usize,
    pub vehicle_types_discarded: usize,
    pub vehicles_per_type: BTreeMap<VehicleTypeId, usize>,
}

impl FleetSummary {
    pub fn vehicles_created(&self) -> usize {
        self.vehicles_per_type.values().sum()
    }
}

/// the vehicle id serving a departure of a line. derived only from the line
/// name and the departure id, so repeated runs produce the same ids.
pub fn vehicle_id_for(line_name: &str, departure_id: &DepartureId) -> VehicleId {
    VehicleId(format!("line_{line_name}_{departure_id}"))
}

impl FleetEnricher {
    pub fn new(classification: FleetClassification) -> FleetEnricher {
        FleetEnricher { classification }
    }

    /// discards all vehicles and vehicle types, then creates a vehicle for
    /// every departure and rebinds the departure to it. vehicle types are
    /// registered the first time a line of their archetype is seen. fails
    /// without modifying the timetable or fleet if two departures would share
    /// a vehicle id.
    pub fn enrich(
        &self,
        timetable: &mut Timetable,
        fleet: &mut Fleet,
    ) -> Result<FleetSummary, ScenarioError> {
        let mut summary = FleetSummary {
            vehicles_discarded: fleet.vehicles.len(),
            vehicle_types_discarded: fleet.vehicle_types.len(),
            ..Default::default()
        };
        let mut enriched = Fleet::default();
        let mut bindings: Vec<(LineId, RouteId, DepartureId, VehicleId)> = vec![];

        let iter = tqdm!(
            timetable.lines.values(),
            desc = "create line vehicles",
            total = timetable.lines.len()
        );
        for line in iter {
            let archetype = self.classification.classify(&line.name);
            let vehicle_type_id = archetype.vehicle_type_id();
            for route in line.routes.values() {
                for departure in route.departures.values() {
                    if !enriched.contains_vehicle_type(&vehicle_type_id) {
                        enriched.add_vehicle_type(archetype.to_vehicle_type());
                    }
                    let vehicle_id = vehicle_id_for(&line.name, &departure.id);
                    let vehicle = Vehicle {
                        id: vehicle_id.clone(),
                        vehicle_type: vehicle_type_id.clone(),
                        line_name: Some(line.name.clone()),
                    };
                    if enriched.add_vehicle(vehicle).is_some() {
                        return Err(ScenarioError::DuplicateVehicleBinding {
                            vehicle: vehicle_id,
                            line: line.id.clone(),
                            departure: departure.id.clone(),
                        });
                    }
                    *summary
                        .vehicles_per_type
                        .entry(vehicle_type_id.clone())
                        .or_default() += 1;
                    bindings.push((
                        line.id.clone(),
                        route.id.clone(),
                        departure.id.clone(),
                        vehicle_id,
                    ));
                }
            }
        }
        eprintln!();

        for (line_id, route_id, departure_id, vehicle_id) in bindings.into_iter() {
            let departure = timetable
                .lines
                .get_mut(&line_id)
                .and_then(|l| l.routes.get_mut(&route_id))
                .and_then(|r| r.departures.get_mut(&departure_id));
            if let Some(departure) = departure {
                departure.vehicle_id = Some(vehicle_id);
            }
        }
        *fleet = enriched;

        log::info!(
            "replaced {} vehicles of {} types with {} line vehicles of {} types",
            summary.vehicles_discarded,
            summary.vehicle_types_discarded,
            summary.vehicles_created(),
            fleet.vehicle_types.len()
        );
        for (vehicle_type_id, count) in summary.vehicles_per_type.iter() {
            log::debug!("  {vehicle_type_id}: {count} vehicles");
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::fleet::Archetype;
    use crate::model::{Departure, Line, Route, StopFacility, VehicleType};
    use uom::si::velocity::meter_per_second;

    fn timetable() -> Timetable {
        let mut timetable = Timetable::default();
        timetable.add_stop_facility(StopFacility::new("a", 0.0, 0.0));
        let lines = [("l1", "IC1"), ("l2", "S3"), ("l3", "PE30"), ("l4", "IC8")];
        for (line_id, name) in lines {
            let mut line = Line::new(line_id, name);
            let mut route = Route::new(&format!("{line_id}_r"), "rail", &["a"]);
            for (idx, time) in [21600, 25200].into_iter().enumerate() {
                let mut departure = Departure::new(&format!("{line_id}_d{idx}"), time);
                departure.vehicle_id = Some(VehicleId::from("imported_vehicle"));
                route.add_departure(departure);
            }
            line.add_route(route);
            timetable.add_line(line);
        }
        timetable
    }

    fn imported_fleet() -> Fleet {
        let mut fleet = Fleet::default();
        fleet.add_vehicle_type(Archetype::rail("bus", 50, 10.0, 12.0).to_vehicle_type());
        fleet.add_vehicle(Vehicle {
            id: VehicleId::from("imported_vehicle"),
            vehicle_type: VehicleTypeId::from("bus"),
            line_name: None,
        });
        fleet
    }

    #[test]
    fn test_every_departure_gets_its_own_rail_vehicle() {
        let mut timetable = timetable();
        let mut fleet = imported_fleet();
        let summary = FleetEnricher::default()
            .enrich(&mut timetable, &mut fleet)
            .expect("enrichment should succeed");
        assert_eq!(summary.vehicles_discarded, 1);
        assert_eq!(summary.vehicles_created(), 8);
        assert!(!fleet.contains_vehicle(&VehicleId::from("imported_vehicle")));
        assert!(!fleet.contains_vehicle_type(&VehicleTypeId::from("bus")));
        timetable
            .validate_vehicle_bindings(&fleet)
            .expect("bindings should be valid");

        for line in timetable.lines.values() {
            for route in line.routes.values() {
                for departure in route.departures.values() {
                    let vehicle_id = departure.vehicle_id.as_ref().expect("bound");
                    let vehicle = fleet.get_vehicle(vehicle_id).expect("in fleet");
                    let vehicle_type: &VehicleType = fleet
                        .get_vehicle_type(&vehicle.vehicle_type)
                        .expect("type in fleet");
                    assert_eq!(vehicle_type.network_mode, "rail");
                    assert_eq!(vehicle.line_name.as_deref(), Some(line.name.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_vehicle_types_created_lazily() {
        let mut timetable = timetable();
        let mut fleet = Fleet::default();
        FleetEnricher::default()
            .enrich(&mut timetable, &mut fleet)
            .expect("enrichment should succeed");
        let type_ids: Vec<&str> = fleet.vehicle_types.keys().map(|t| t.as_str()).collect();
        assert_eq!(type_ids, vec!["IC", "S", "other"]);
        let ic = fleet
            .get_vehicle_type(&VehicleTypeId::from("IC"))
            .expect("IC type");
        assert!((ic.max_velocity.get::<meter_per_second>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vehicle_ids_are_deterministic() {
        let mut first = timetable();
        let mut second = timetable();
        let mut fleet_a = imported_fleet();
        let mut fleet_b = Fleet::default();
        let enricher = FleetEnricher::default();
        enricher.enrich(&mut first, &mut fleet_a).expect("should succeed");
        enricher.enrich(&mut second, &mut fleet_b).expect("should succeed");
        assert_eq!(first, second);
        assert_eq!(fleet_a, fleet_b);
        assert!(fleet_a.contains_vehicle(&VehicleId::from("line_IC1_l1_d0")));

        // running again on an enriched scenario changes nothing
        let snapshot = (first.clone(), fleet_a.clone());
        enricher.enrich(&mut first, &mut fleet_a).expect("should succeed");
        assert_eq!(snapshot, (first, fleet_a));
    }

    #[test]
    fn test_colliding_vehicle_ids_fail_without_changes() {
        let mut timetable = timetable();
        // a second line named IC1 with the same departure ids
        let mut twin = Line::new("l9", "IC1");
        let mut route = Route::new("l9_r", "rail", &["a"]);
        route.add_departure(Departure::new("l1_d0", 30000));
        twin.add_route(route);
        timetable.add_line(twin);
        let mut fleet = imported_fleet();
        let before = (timetable.clone(), fleet.clone());

        let result = FleetEnricher::default().enrich(&mut timetable, &mut fleet);
        match result {
            Err(ScenarioError::DuplicateVehicleBinding { vehicle, .. }) => {
                assert_eq!(vehicle, VehicleId::from("line_IC1_l1_d0"))
            }
            other => panic!("expected duplicate vehicle binding, found {other:?}"),
        }
        assert_eq!(before, (timetable, fleet));
    }
}
