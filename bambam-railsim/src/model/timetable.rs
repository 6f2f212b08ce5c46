use super::{
    DepartureId, Fleet, LineId, LinkId, Network, RouteId, ScenarioError, StopFacilityId, VehicleId,
};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// an imported transit schedule. lines and stop facilities are kept in ordered
/// maps so that every pass over the timetable visits entities in the same order.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    #[serde(default)]
    pub stop_facilities: BTreeMap<StopFacilityId, StopFacility>,
    #[serde(default)]
    pub lines: BTreeMap<LineId, Line>,
}

/// a named transit service grouping one or more routes. a line may be left
/// without routes after filtering; it is not deleted in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    #[serde(default)]
    pub routes: BTreeMap<RouteId, Route>,
}

/// a stop pattern of a line. before mapping, only `stops` is populated; the
/// mapper adds the sequence of network `links` the route traverses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub transport_mode: String,
    #[serde(default)]
    pub stops: Vec<StopFacilityId>,
    #[serde(default)]
    pub links: Vec<LinkId>,
    #[serde(default)]
    pub departures: BTreeMap<DepartureId, Departure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    pub id: DepartureId,
    /// seconds after midnight of the service day
    pub departure_time: u32,
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopFacility {
    pub id: StopFacilityId,
    #[serde(default)]
    pub name: Option<String>,
    pub coord: Coord<f64>,
    /// network link the stop was snapped to by the mapper, if any
    #[serde(default)]
    pub link_id: Option<LinkId>,
}

impl Timetable {
    pub fn add_stop_facility(&mut self, stop: StopFacility) {
        self.stop_facilities.insert(stop.id.clone(), stop);
    }

    pub fn add_line(&mut self, line: Line) {
        self.lines.insert(line.id.clone(), line);
    }

    pub fn get_stop_facility(&self, stop_id: &StopFacilityId) -> Option<&StopFacility> {
        self.stop_facilities.get(stop_id)
    }

    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    /// number of lines that still own at least one route
    pub fn n_non_empty_lines(&self) -> usize {
        self.lines.values().filter(|l| !l.routes.is_empty()).count()
    }

    pub fn n_routes(&self) -> usize {
        self.lines.values().map(|l| l.routes.len()).sum()
    }

    pub fn n_departures(&self) -> usize {
        self.lines
            .values()
            .flat_map(|l| l.routes.values())
            .map(|r| r.departures.len())
            .sum()
    }

    /// snapshot of every (line, route) pair. pruning passes decide against this
    /// snapshot and then remove, so no map is modified while it is traversed.
    pub fn route_keys(&self) -> Vec<(LineId, RouteId)> {
        self.lines
            .values()
            .flat_map(|line| line.routes.keys().map(|r| (line.id.clone(), r.clone())))
            .collect()
    }

    /// removes a route from its owning line. this is the only path by which a
    /// route leaves the timetable.
    pub fn remove_route(&mut self, line_id: &LineId, route_id: &RouteId) -> Option<Route> {
        self.lines
            .get_mut(line_id)
            .and_then(|line| line.routes.remove(route_id))
    }

    /// removes every stop facility that is no longer referenced by any route.
    /// returns the number of removed facilities.
    pub fn remove_unused_stop_facilities(&mut self) -> usize {
        let referenced: HashSet<&StopFacilityId> = self
            .lines
            .values()
            .flat_map(|l| l.routes.values())
            .flat_map(|r| r.stops.iter())
            .collect();
        let unused: Vec<StopFacilityId> = self
            .stop_facilities
            .keys()
            .filter(|id| !referenced.contains(id))
            .cloned()
            .collect();
        for stop_id in unused.iter() {
            self.stop_facilities.remove(stop_id);
        }
        unused.len()
    }

    /// confirms that every stop referenced by a route exists in this timetable.
    pub fn validate_stop_references(&self) -> Result<(), ScenarioError> {
        for line in self.lines.values() {
            for route in line.routes.values() {
                if let Some(stop) = route
                    .stops
                    .iter()
                    .find(|s| !self.stop_facilities.contains_key(*s))
                {
                    return Err(ScenarioError::MissingStopFacility {
                        line: line.id.clone(),
                        route: route.id.clone(),
                        stop: stop.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// confirms that every link on a mapped route exists in the network.
    pub fn validate_link_references(&self, network: &Network) -> Result<(), ScenarioError> {
        for line in self.lines.values() {
            for route in line.routes.values() {
                if let Some(link) = route.links.iter().find(|l| !network.contains_link(l)) {
                    return Err(ScenarioError::MissingLink {
                        line: line.id.clone(),
                        route: route.id.clone(),
                        link: link.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// confirms that every departure is bound to a vehicle found in the fleet
    /// and that no vehicle serves more than one departure.
    pub fn validate_vehicle_bindings(&self, fleet: &Fleet) -> Result<(), ScenarioError> {
        let mut bound: HashMap<&VehicleId, &DepartureId> = HashMap::new();
        for line in self.lines.values() {
            for route in line.routes.values() {
                for departure in route.departures.values() {
                    let vehicle_id = departure.vehicle_id.as_ref().ok_or_else(|| {
                        ScenarioError::UnboundDeparture {
                            line: line.id.clone(),
                            route: route.id.clone(),
                            departure: departure.id.clone(),
                        }
                    })?;
                    if !fleet.contains_vehicle(vehicle_id) {
                        return Err(ScenarioError::MissingVehicle {
                            line: line.id.clone(),
                            route: route.id.clone(),
                            departure: departure.id.clone(),
                            vehicle: vehicle_id.clone(),
                        });
                    }
                    if bound.insert(vehicle_id, &departure.id).is_some() {
                        return Err(ScenarioError::DuplicateVehicleBinding {
                            vehicle: vehicle_id.clone(),
                            line: line.id.clone(),
                            departure: departure.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Line {
    pub fn new(id: &str, name: &str) -> Line {
        Line {
            id: LineId::from(id),
            name: String::from(name),
            routes: BTreeMap::new(),
        }
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id.clone(), route);
    }
}

impl Route {
    pub fn new(id: &str, transport_mode: &str, stops: &[&str]) -> Route {
        Route {
            id: RouteId::from(id),
            transport_mode: String::from(transport_mode),
            stops: stops.iter().map(|s| StopFacilityId::from(*s)).collect(),
            links: vec![],
            departures: BTreeMap::new(),
        }
    }

    pub fn add_departure(&mut self, departure: Departure) {
        self.departures.insert(departure.id.clone(), departure);
    }
}

impl Departure {
    pub fn new(id: &str, departure_time: u32) -> Departure {
        Departure {
            id: DepartureId::from(id),
            departure_time,
            vehicle_id: None,
        }
    }
}

impl StopFacility {
    pub fn new(id: &str, x: f64, y: f64) -> StopFacility {
        StopFacility {
            id: StopFacilityId::from(id),
            name: None,
            coord: Coord { x, y },
            link_id: None,
        }
    }
}
