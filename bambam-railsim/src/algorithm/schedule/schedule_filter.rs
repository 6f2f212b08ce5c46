use crate::model::{LineId, RouteId, ScenarioError, Timetable};
use serde::{Deserialize, Serialize};

/// prunes a timetable down to the routes of one transport mode and, when line
/// name prefixes are given, to the lines whose name starts with one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    pub transport_mode: String,
    /// case-sensitive line name prefixes to retain. empty means no name filtering.
    #[serde(default)]
    pub line_name_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub routes_removed_by_mode: usize,
    pub routes_removed_by_name: usize,
    pub stop_facilities_removed: usize,
    pub routes_remaining: usize,
}

impl ScheduleFilter {
    pub fn new(transport_mode: &str, line_name_prefixes: &[&str]) -> ScheduleFilter {
        ScheduleFilter {
            transport_mode: String::from(transport_mode),
            line_name_prefixes: line_name_prefixes.iter().map(|p| String::from(*p)).collect(),
        }
    }

    /// true if the line name starts with any of the configured prefixes, or if
    /// no prefixes are configured.
    pub fn line_name_matches(&self, line_name: &str) -> bool {
        self.line_name_prefixes.is_empty()
            || self
                .line_name_prefixes
                .iter()
                .any(|prefix| line_name.starts_with(prefix.as_str()))
    }

    /// applies the mode pass, then the line name pass, then removes stop
    /// facilities no longer referenced by any route. lines left without routes
    /// stay in the timetable.
    pub fn apply(&self, timetable: &mut Timetable) -> Result<FilterSummary, ScenarioError> {
        timetable.validate_stop_references()?;

        let mode_removals: Vec<(LineId, RouteId)> = timetable
            .lines
            .values()
            .flat_map(|line| {
                line.routes
                    .values()
                    .filter(|route| route.transport_mode != self.transport_mode)
                    .map(|route| (line.id.clone(), route.id.clone()))
            })
            .collect();
        for (line_id, route_id) in mode_removals.iter() {
            timetable.remove_route(line_id, route_id);
        }
        log::debug!(
            "removed {} routes with a transport mode other than '{}'",
            mode_removals.len(),
            self.transport_mode
        );

        let name_removals: Vec<(LineId, RouteId)> = timetable
            .lines
            .values()
            .filter(|line| !self.line_name_matches(&line.name))
            .flat_map(|line| line.routes.keys().map(|r| (line.id.clone(), r.clone())))
            .collect();
        for (line_id, route_id) in name_removals.iter() {
            timetable.remove_route(line_id, route_id);
        }
        log::debug!(
            "removed {} routes of lines not matching prefixes [{}]",
            name_removals.len(),
            self.line_name_prefixes.join(", ")
        );

        let stop_facilities_removed = timetable.remove_unused_stop_facilities();
        let summary = FilterSummary {
            routes_removed_by_mode: mode_removals.len(),
            routes_removed_by_name: name_removals.len(),
            stop_facilities_removed,
            routes_remaining: timetable.n_routes(),
        };
        log::info!(
            "schedule filter kept {} routes ({} removed by mode, {} by line name), removed {} unused stop facilities",
            summary.routes_remaining,
            summary.routes_removed_by_mode,
            summary.routes_removed_by_name,
            summary.stop_facilities_removed
        );
        Ok(summary)
    }
}
