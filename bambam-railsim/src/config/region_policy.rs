use crate::algorithm::geometry::{self, RegionSelection};
use crate::model::ScenarioError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// how the trimming stage obtains its region. disabling trimming is an
/// explicit choice, a configured boundary file must load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RegionPolicy {
    #[default]
    PassThrough,
    BoundaryFile {
        /// WKT text file or ESRI shapefile (.shp)
        path: String,
    },
}

impl RegionPolicy {
    pub fn load(&self) -> Result<RegionSelection, ScenarioError> {
        match self {
            RegionPolicy::PassThrough => Ok(RegionSelection::PassThrough),
            RegionPolicy::BoundaryFile { path } => {
                let region = geometry::read_region_file(Path::new(path))?;
                Ok(RegionSelection::Region(region))
            }
        }
    }
}
