use super::{ExternalToolSettings, RegionPolicy};
use crate::{
    algorithm::{
        fleet::FleetClassification,
        resource::ResourceAssigner,
        schedule::{ScheduleFilter, TrimMode},
    },
    pipeline::PipelineError,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a rail scenario preparation run
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct RailsimConfiguration {
    pub transport_mode: String,
    pub line_name_prefixes: Vec<String>,
    pub region: RegionPolicy,
    pub trim_mode: TrimMode,
    pub resources: ResourceAssigner,
    pub fleet_classification: FleetClassification,
    pub external_tools: ExternalToolSettings,
    pub overwrite: bool,
}

impl Default for RailsimConfiguration {
    fn default() -> Self {
        Self {
            transport_mode: String::from("rail"),
            line_name_prefixes: vec![String::from("IC"), String::from("IR"), String::from("RE")],
            region: RegionPolicy::PassThrough,
            trim_mode: TrimMode::Stops,
            resources: ResourceAssigner::default(),
            fleet_classification: FleetClassification::default(),
            external_tools: ExternalToolSettings::default(),
            overwrite: false,
        }
    }
}

impl RailsimConfiguration {
    pub fn schedule_filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            transport_mode: self.transport_mode.clone(),
            line_name_prefixes: self.line_name_prefixes.clone(),
        }
    }
}

impl TryFrom<&String> for RailsimConfiguration {
    type Error = PipelineError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                PipelineError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                PipelineError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                PipelineError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                PipelineError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(PipelineError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(filename: &str, contents: &str) -> String {
        let dir = std::env::temp_dir().join("bambam-railsim-config");
        std::fs::create_dir_all(&dir).expect("test directory should be creatable");
        let path = dir.join(filename);
        std::fs::write(&path, contents).expect("test file should be writable");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let f = write_temp(
            "partial.toml",
            r#"
line_name_prefixes = ["IC", "EC"]
trim_mode = "links"

[region]
type = "boundary_file"
path = "original_data/shp/olten/olten.shp"
"#,
        );
        let conf = RailsimConfiguration::try_from(&f).expect("config should load");
        assert_eq!(conf.transport_mode, "rail");
        assert_eq!(conf.line_name_prefixes, vec!["IC", "EC"]);
        assert_eq!(conf.trim_mode, TrimMode::Links);
        assert_eq!(
            conf.region,
            RegionPolicy::BoundaryFile {
                path: String::from("original_data/shp/olten/olten.shp")
            }
        );
        assert_eq!(conf.resources.train_capacity, Some(1));
        assert_eq!(conf.fleet_classification, FleetClassification::default());
    }

    #[test]
    fn test_json_classification_table() {
        let f = write_temp(
            "classification.json",
            r#"{
                "fleet_classification": {
                    "rules": [
                        {"prefix": "ICE", "archetype": {"id": "ICE", "standing_room": 400, "max_velocity_mps": 83.3, "length_m": 400.0}}
                    ],
                    "fallback": {"id": "other", "standing_room": 1000, "max_velocity_mps": 27.777, "length_m": 300.0}
                }
            }"#,
        );
        let conf = RailsimConfiguration::try_from(&f).expect("config should load");
        assert_eq!(conf.fleet_classification.classify("ICE 3").id, "ICE");
        assert_eq!(conf.fleet_classification.classify("IC 3").id, "other");
        assert_eq!(conf.fleet_classification.fallback.network_mode, "rail");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = RailsimConfiguration::try_from(&String::from("config.yaml"));
        assert!(matches!(result, Err(PipelineError::ConfigurationError(_))));
    }

    #[test]
    fn test_partial_resources_table_keeps_train_capacity() {
        let f = write_temp(
            "partial_resources.toml",
            r#"
[resources]
resource_id_prefix = "track_"
"#,
        );
        let conf = RailsimConfiguration::try_from(&f).expect("config should load");
        assert_eq!(conf.resources.resource_id_prefix, "track_");
        assert_eq!(conf.resources.train_capacity, Some(1));
    }
}
