use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the stages of a scenario preparation run, used to attribute failures and
/// advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    RegionLoading,
    ScheduleFilter,
    ScheduleTrimmer,
    ResourceAssigner,
    FleetEnricher,
    Validation,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::RegionLoading => write!(f, "region loading"),
            PipelineStage::ScheduleFilter => write!(f, "schedule filter"),
            PipelineStage::ScheduleTrimmer => write!(f, "schedule trimmer"),
            PipelineStage::ResourceAssigner => write!(f, "resource assigner"),
            PipelineStage::FleetEnricher => write!(f, "fleet enricher"),
            PipelineStage::Validation => write!(f, "validation"),
        }
    }
}
