mod external_tool_settings;
mod railsim_config;
mod region_policy;

pub use external_tool_settings::{
    ExternalToolSettings, MappingSettings, NetworkConversionSettings, ScheduleImportSettings,
    ServiceDayPolicy,
};
pub use railsim_config::RailsimConfiguration;
pub use region_policy::RegionPolicy;
