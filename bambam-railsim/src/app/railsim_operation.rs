use crate::{
    algorithm::geometry::RegionSelection,
    config::RailsimConfiguration,
    model::{Fleet, Network, Timetable},
    pipeline::{self, artifact_io, PipelineError, PipelineReport, PipelineStage},
};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum RailsimOperation {
    /// filter an imported schedule by mode and line name, trimming it by stop
    /// location when configured. the result is the input of the mapper.
    PrepareSchedule {
        /// imported schedule (.json or .json.gz)
        #[arg(long)]
        timetable_file: String,
        #[arg(long)]
        output_file: String,
        #[arg(long, help = "path to .toml or .json file with bambam-railsim parameters")]
        configuration_file: Option<String>,
    },
    /// trim by mapped links when configured, assign track resources, rebuild
    /// the fleet and write the scenario for the simulation engine
    Finalize {
        /// mapped schedule (.json or .json.gz)
        #[arg(long)]
        timetable_file: String,
        /// mapped network (.json or .json.gz)
        #[arg(long)]
        network_file: String,
        /// fleet emitted by the schedule importer, discarded and rebuilt
        #[arg(long)]
        fleet_file: Option<String>,
        #[arg(long, help = "path to .toml or .json file with bambam-railsim parameters")]
        configuration_file: Option<String>,
        #[arg(long)]
        output_directory: String,
    },
    /// write the settings files for the external schedule importer, network
    /// converter and mapper
    WriteToolSettings {
        #[arg(long, help = "path to .toml or .json file with bambam-railsim parameters")]
        configuration_file: Option<String>,
        #[arg(long)]
        output_directory: String,
    },
}

impl RailsimOperation {
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        match self {
            RailsimOperation::PrepareSchedule {
                timetable_file,
                output_file,
                configuration_file,
            } => {
                let conf = read_configuration(configuration_file)?;
                let region = load_region(&conf)?;
                let timetable: Timetable = artifact_io::read_artifact(Path::new(timetable_file))?;
                let (prepared, report) = pipeline::prepare_schedule(timetable, &conf, &region)?;
                artifact_io::write_artifact(&prepared, Path::new(output_file), conf.overwrite)?;
                Ok(report)
            }
            RailsimOperation::Finalize {
                timetable_file,
                network_file,
                fleet_file,
                configuration_file,
                output_directory,
            } => {
                let conf = read_configuration(configuration_file)?;
                let region = load_region(&conf)?;
                let timetable: Timetable = artifact_io::read_artifact(Path::new(timetable_file))?;
                let network: Network = artifact_io::read_artifact(Path::new(network_file))?;
                let fleet: Fleet = match fleet_file {
                    None => Fleet::default(),
                    Some(f) => artifact_io::read_artifact(Path::new(f))?,
                };
                let (scenario, report) =
                    pipeline::finalize_scenario(timetable, network, fleet, &conf, &region)?;
                scenario.write(Path::new(output_directory), conf.overwrite)?;
                Ok(report)
            }
            RailsimOperation::WriteToolSettings {
                configuration_file,
                output_directory,
            } => {
                let conf = read_configuration(configuration_file)?;
                let written = conf
                    .external_tools
                    .write_settings(Path::new(output_directory), conf.overwrite)?;
                log::info!("wrote {} external tool settings files", written.len());
                Ok(PipelineReport::default())
            }
        }
    }
}

fn read_configuration(
    configuration_file: &Option<String>,
) -> Result<RailsimConfiguration, PipelineError> {
    match configuration_file {
        None => Ok(RailsimConfiguration::default()),
        Some(f) => {
            log::info!("reading bambam-railsim configuration from {f}");
            RailsimConfiguration::try_from(f)
        }
    }
}

/// loads the trimming region up front so that a bad boundary file aborts the
/// run before any stage executes.
fn load_region(conf: &RailsimConfiguration) -> Result<RegionSelection, PipelineError> {
    conf.region
        .load()
        .map_err(PipelineError::at(PipelineStage::RegionLoading))
}
