use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// which points of a route are tested against the trimming region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
    /// stop facility coordinates, used before the schedule is mapped
    #[default]
    Stops,
    /// coordinates of the network links on the mapped route path
    Links,
}

impl std::fmt::Display for TrimMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrimMode::Stops => write!(f, "stops"),
            TrimMode::Links => write!(f, "links"),
        }
    }
}
