use super::TrimMode;
use crate::algorithm::geometry::{any_point_in_region, RegionPolygons, RegionSelection};
use crate::model::{Line, LineId, Network, Route, RouteId, ScenarioError, Timetable};
use rayon::prelude::*;

/// removes the routes that never touch a region. a route with at least one
/// point inside the region is kept whole; routes are never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTrimmer {
    pub mode: TrimMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimSummary {
    pub routes_removed: usize,
    pub stop_facilities_removed: usize,
    pub routes_remaining: usize,
}

impl ScheduleTrimmer {
    pub fn new(mode: TrimMode) -> ScheduleTrimmer {
        ScheduleTrimmer { mode }
    }

    /// trims the timetable against the selected region. in [`TrimMode::Links`]
    /// the network the routes were mapped onto is required.
    /// [`RegionSelection::PassThrough`] leaves the timetable untouched.
    pub fn apply(
        &self,
        timetable: &mut Timetable,
        network: Option<&Network>,
        selection: &RegionSelection,
    ) -> Result<TrimSummary, ScenarioError> {
        let region = match selection {
            RegionSelection::PassThrough => {
                log::info!("trimming disabled, schedule passed through unchanged");
                return Ok(TrimSummary {
                    routes_remaining: timetable.n_routes(),
                    ..Default::default()
                });
            }
            RegionSelection::Region(region) => region,
        };

        let network = match (self.mode, network) {
            (TrimMode::Stops, _) => None,
            (TrimMode::Links, Some(n)) => Some(n),
            (TrimMode::Links, None) => {
                return Err(ScenarioError::ConfigurationError(String::from(
                    "trimming by links requires the mapped network",
                )))
            }
        };
        match network {
            None => timetable.validate_stop_references()?,
            Some(n) => {
                n.validate_node_references()?;
                timetable.validate_link_references(n)?;
            }
        }

        // decide against an immutable view, then remove
        let view: &Timetable = timetable;
        let candidates: Vec<(&Line, &Route)> = view
            .lines
            .values()
            .flat_map(|line| line.routes.values().map(move |route| (line, route)))
            .collect();
        let removals = candidates
            .par_iter()
            .map(|(line, route)| -> Result<Option<(LineId, RouteId)>, ScenarioError> {
                let keep = match network {
                    None => route_has_stop_in_region(view, line, route, region)?,
                    Some(n) => route_has_link_in_region(n, line, route, region)?,
                };
                if keep {
                    Ok(None)
                } else {
                    Ok(Some((line.id.clone(), route.id.clone())))
                }
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        for (line_id, route_id) in removals.iter() {
            timetable.remove_route(line_id, route_id);
        }
        let stop_facilities_removed = timetable.remove_unused_stop_facilities();
        let summary = TrimSummary {
            routes_removed: removals.len(),
            stop_facilities_removed,
            routes_remaining: timetable.n_routes(),
        };
        log::info!(
            "trimmed {} routes without a {} point in the region, {} remaining, removed {} unused stop facilities",
            summary.routes_removed,
            self.mode,
            summary.routes_remaining,
            summary.stop_facilities_removed
        );
        Ok(summary)
    }
}

fn route_has_stop_in_region(
    timetable: &Timetable,
    line: &Line,
    route: &Route,
    region: &RegionPolygons,
) -> Result<bool, ScenarioError> {
    for stop_id in route.stops.iter() {
        let stop = timetable.get_stop_facility(stop_id).ok_or_else(|| {
            ScenarioError::MissingStopFacility {
                line: line.id.clone(),
                route: route.id.clone(),
                stop: stop_id.clone(),
            }
        })?;
        if any_point_in_region([&stop.coord], region) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn route_has_link_in_region(
    network: &Network,
    line: &Line,
    route: &Route,
    region: &RegionPolygons,
) -> Result<bool, ScenarioError> {
    for link_id in route.links.iter() {
        let link = network
            .get_link(link_id)
            .ok_or_else(|| ScenarioError::MissingLink {
                line: line.id.clone(),
                route: route.id.clone(),
                link: link_id.clone(),
            })?;
        let points = network.link_points(link)?;
        if any_point_in_region(&points, region) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, LinkId, Node, StopFacility, StopFacilityId};
    use geo::polygon;

    fn region() -> RegionSelection {
        RegionSelection::Region(RegionPolygons::new(vec![polygon![
            (x: -1.0, y: -1.0),
            (x: 1.0, y: -1.0),
            (x: 1.0, y: 1.0),
            (x: -1.0, y: 1.0),
            (x: -1.0, y: -1.0),
        ]]))
    }

    /// "inside" serves a stop at the origin, "outside" only stops far away,
    /// "crossing" starts outside and ends inside.
    fn timetable() -> Timetable {
        let mut timetable = Timetable::default();
        timetable.add_stop_facility(StopFacility::new("origin", 0.0, 0.0));
        timetable.add_stop_facility(StopFacility::new("far1", 10.0, 10.0));
        timetable.add_stop_facility(StopFacility::new("far2", 20.0, 20.0));
        timetable.add_stop_facility(StopFacility::new("far3", 30.0, 30.0));
        let mut line = Line::new("l1", "IC1");
        line.add_route(Route::new("inside", "rail", &["origin"]));
        line.add_route(Route::new("outside", "rail", &["far1", "far2"]));
        line.add_route(Route::new("crossing", "rail", &["far3", "origin"]));
        timetable.add_line(line);
        timetable
    }

    fn network() -> Network {
        let mut network = Network::default();
        network.add_node(Node::new("n_in", 0.5, 0.5));
        network.add_node(Node::new("n_out1", 10.0, 10.0));
        network.add_node(Node::new("n_out2", 20.0, 10.0));
        network.add_link(Link::new("enter", "n_out1", "n_in"));
        network.add_link(Link::new("away", "n_out1", "n_out2"));
        network
    }

    #[test]
    fn test_trim_by_stops_keeps_touching_routes_whole() {
        let mut timetable = timetable();
        let summary = ScheduleTrimmer::new(TrimMode::Stops)
            .apply(&mut timetable, None, &region())
            .expect("trim should succeed");
        assert_eq!(summary.routes_removed, 1);
        assert_eq!(summary.routes_remaining, 2);
        let line = timetable.lines.get(&LineId::from("l1")).expect("line kept");
        let crossing = line.routes.get(&RouteId::from("crossing")).expect("kept");
        // not clipped
        assert_eq!(crossing.stops.len(), 2);
        assert!(timetable.get_stop_facility(&StopFacilityId::from("far3")).is_some());
        assert!(timetable.get_stop_facility(&StopFacilityId::from("far1")).is_none());
        assert!(timetable.get_stop_facility(&StopFacilityId::from("far2")).is_none());
    }

    #[test]
    fn test_pass_through_is_identity() {
        let mut timetable = timetable();
        timetable.add_stop_facility(StopFacility::new("unused", 0.0, 0.0));
        let before = timetable.clone();
        let summary = ScheduleTrimmer::new(TrimMode::Stops)
            .apply(&mut timetable, None, &RegionSelection::PassThrough)
            .expect("pass through should succeed");
        assert_eq!(summary.routes_removed, 0);
        assert_eq!(before, timetable);
    }

    #[test]
    fn test_empty_region_trims_everything() {
        let mut timetable = timetable();
        let selection = RegionSelection::Region(RegionPolygons::default());
        let summary = ScheduleTrimmer::new(TrimMode::Stops)
            .apply(&mut timetable, None, &selection)
            .expect("trim should succeed");
        assert_eq!(summary.routes_remaining, 0);
        assert!(timetable.stop_facilities.is_empty());
        assert_eq!(timetable.n_lines(), 1);
    }

    #[test]
    fn test_trim_by_links() {
        let mut timetable = timetable();
        let network = network();
        let paths = [
            ("inside", vec!["enter"]),
            ("outside", vec!["away"]),
            ("crossing", vec!["away", "enter"]),
        ];
        for (route_id, links) in paths {
            if let Some(route) = timetable
                .lines
                .get_mut(&LineId::from("l1"))
                .and_then(|l| l.routes.get_mut(&RouteId::from(route_id)))
            {
                route.links = links.into_iter().map(LinkId::from).collect();
            }
        }
        let summary = ScheduleTrimmer::new(TrimMode::Links)
            .apply(&mut timetable, Some(&network), &region())
            .expect("trim should succeed");
        assert_eq!(summary.routes_removed, 1);
        let line = timetable.lines.get(&LineId::from("l1")).expect("line kept");
        assert!(line.routes.contains_key(&RouteId::from("inside")));
        assert!(line.routes.contains_key(&RouteId::from("crossing")));
        assert!(!line.routes.contains_key(&RouteId::from("outside")));
    }

    #[test]
    fn test_trim_by_links_requires_network() {
        let mut timetable = timetable();
        let result = ScheduleTrimmer::new(TrimMode::Links).apply(&mut timetable, None, &region());
        assert!(matches!(result, Err(ScenarioError::ConfigurationError(_))));
    }

    #[test]
    fn test_trim_by_links_missing_link() {
        let mut timetable = timetable();
        if let Some(route) = timetable
            .lines
            .get_mut(&LineId::from("l1"))
            .and_then(|l| l.routes.get_mut(&RouteId::from("inside")))
        {
            route.links = vec![LinkId::from("ghost")];
        }
        let result =
            ScheduleTrimmer::new(TrimMode::Links).apply(&mut timetable, Some(&network()), &region());
        match result {
            Err(ScenarioError::MissingLink { link, .. }) => assert_eq!(link, LinkId::from("ghost")),
            other => panic!("expected missing link, found {other:?}"),
        }
    }
}
