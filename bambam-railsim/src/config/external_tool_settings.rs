use crate::pipeline::{artifact_io, PipelineError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// which service days of the feed the schedule importer converts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ServiceDayPolicy {
    #[default]
    DayWithMostTrips,
    /// a single date in the format yyyymmdd
    Date { date: String },
    DayWithMostServices,
    All,
}

impl ServiceDayPolicy {
    pub const DATE_FORMAT: &'static str = "%Y%m%d";

    /// the argument string understood by the schedule importer.
    pub fn as_argument(&self) -> Result<String, PipelineError> {
        match self {
            ServiceDayPolicy::DayWithMostTrips => Ok(String::from("dayWithMostTrips")),
            ServiceDayPolicy::DayWithMostServices => Ok(String::from("dayWithMostServices")),
            ServiceDayPolicy::All => Ok(String::from("all")),
            ServiceDayPolicy::Date { date } => {
                let parsed = NaiveDate::parse_from_str(date, Self::DATE_FORMAT).map_err(|e| {
                    PipelineError::ConfigurationError(format!(
                        "service day '{date}' is not a yyyymmdd date: {e}"
                    ))
                })?;
                Ok(parsed.format(Self::DATE_FORMAT).to_string())
            }
        }
    }
}

/// settings for converting the raw timetable feed into an unmapped schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleImportSettings {
    pub gtfs_file: String,
    pub service_days: ServiceDayPolicy,
    pub output_coordinate_system: String,
    pub output_schedule_file: String,
    pub output_vehicles_file: Option<String>,
}

/// settings for converting the raw rail map into a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConversionSettings {
    pub osm_file: String,
    pub output_coordinate_system: String,
    pub output_network_file: String,
    /// keep the detailed node paths of ways instead of simplifying them
    pub keep_paths: bool,
}

/// settings for mapping the filtered schedule onto the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSettings {
    pub input_network_file: String,
    pub input_schedule_file: String,
    pub output_network_file: String,
    pub output_schedule_file: String,
    /// modes whose link travel times follow the schedule instead of link freespeed
    pub schedule_freespeed_modes: Vec<String>,
}

/// the settings handed to the external importer, converter and mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalToolSettings {
    pub schedule_import: ScheduleImportSettings,
    pub network_conversion: NetworkConversionSettings,
    pub mapping: MappingSettings,
}

mod filenames {
    pub const SCHEDULE_IMPORT: &str = "schedule-import-settings.json";
    pub const NETWORK_CONVERSION: &str = "network-conversion-settings.json";
    pub const MAPPING: &str = "mapping-settings.json";
}

/// the serialized form of [`ScheduleImportSettings`] with the service day
/// policy rendered as the importer's argument string.
#[derive(Serialize)]
struct ScheduleImportArguments<'a> {
    gtfs_file: &'a str,
    service_days: String,
    output_coordinate_system: &'a str,
    output_schedule_file: &'a str,
    output_vehicles_file: Option<&'a str>,
}

impl ExternalToolSettings {
    pub const DEFAULT_COORDINATE_SYSTEM: &'static str = "EPSG:2056";

    /// writes one JSON settings file per external tool into the output
    /// directory and returns the written paths. no file is written if any
    /// of them cannot be.
    pub fn write_settings(
        &self,
        output_directory: &Path,
        overwrite: bool,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let import = &self.schedule_import;
        let import_arguments = ScheduleImportArguments {
            gtfs_file: &import.gtfs_file,
            service_days: import.service_days.as_argument()?,
            output_coordinate_system: &import.output_coordinate_system,
            output_schedule_file: &import.output_schedule_file,
            output_vehicles_file: import.output_vehicles_file.as_deref(),
        };
        let import_path = output_directory.join(filenames::SCHEDULE_IMPORT);
        let conversion_path = output_directory.join(filenames::NETWORK_CONVERSION);
        let mapping_path = output_directory.join(filenames::MAPPING);
        let artifacts = [
            artifact_io::encode_artifact(&import_arguments, &import_path)?,
            artifact_io::encode_artifact(&self.network_conversion, &conversion_path)?,
            artifact_io::encode_artifact(&self.mapping, &mapping_path)?,
        ];
        artifact_io::write_artifacts(&artifacts, overwrite)?;
        Ok(vec![import_path, conversion_path, mapping_path])
    }
}

impl Default for ExternalToolSettings {
    fn default() -> Self {
        let crs = String::from(Self::DEFAULT_COORDINATE_SYSTEM);
        Self {
            schedule_import: ScheduleImportSettings {
                gtfs_file: String::from("original_data/gtfs/gtfs.zip"),
                service_days: ServiceDayPolicy::DayWithMostTrips,
                output_coordinate_system: crs.clone(),
                output_schedule_file: String::from("railsim_input/tmp/schedule-gtfs.json.gz"),
                output_vehicles_file: Some(String::from(
                    "railsim_input/tmp/vehicles-gtfs.json.gz",
                )),
            },
            network_conversion: NetworkConversionSettings {
                osm_file: String::from("original_data/osm/railways.osm"),
                output_coordinate_system: crs,
                output_network_file: String::from("railsim_input/tmp/network-osm.json.gz"),
                keep_paths: true,
            },
            mapping: MappingSettings {
                input_network_file: String::from("railsim_input/tmp/network-osm.json.gz"),
                input_schedule_file: String::from(
                    "railsim_input/tmp/schedule-gtfs-filtered-trimmed.json.gz",
                ),
                output_network_file: String::from("railsim_input/tmp/network-mapped.json.gz"),
                output_schedule_file: String::from("railsim_input/tmp/schedule-mapped.json.gz"),
                schedule_freespeed_modes: vec![String::from("rail"), String::from("light_rail")],
            },
        }
    }
}
