use super::{artifact_io, Advisory, PipelineError, PipelineReport, PipelineStage as Stage};
use crate::{
    algorithm::{
        fleet::FleetEnricher,
        geometry::RegionSelection,
        resource,
        schedule::{ScheduleTrimmer, TrimMode},
    },
    config::RailsimConfiguration,
    model::{Fleet, Network, Timetable},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// the finished scenario handed to the simulation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub timetable: Timetable,
    pub network: Network,
    pub fleet: Fleet,
}

mod filenames {
    pub const SCHEDULE_FINAL: &str = "transit-schedule.json.gz";
    pub const NETWORK_FINAL: &str = "transit-network.json.gz";
    pub const VEHICLES_FINAL: &str = "transit-vehicles.json.gz";
}

/// filters an imported timetable and, when trimming by stops, trims it to the
/// region. the result is the schedule handed to the mapper.
pub fn prepare_schedule(
    mut timetable: Timetable,
    conf: &RailsimConfiguration,
    region: &RegionSelection,
) -> Result<(Timetable, PipelineReport), PipelineError> {
    let mut report = PipelineReport::default();
    log::info!(
        "preparing schedule with {} lines, {} routes, {} stop facilities",
        timetable.n_lines(),
        timetable.n_routes(),
        timetable.stop_facilities.len()
    );

    eprintln!();
    log::info!("  (((1))) filtering schedule by mode and line name");
    conf.schedule_filter()
        .apply(&mut timetable)
        .map_err(PipelineError::at(Stage::ScheduleFilter))?;
    check_not_empty(&timetable, Stage::ScheduleFilter, &mut report);

    eprintln!();
    if conf.trim_mode == TrimMode::Stops {
        log::info!("  (((2))) trimming schedule to region by stop location ({region})");
        ScheduleTrimmer::new(TrimMode::Stops)
            .apply(&mut timetable, None, region)
            .map_err(PipelineError::at(Stage::ScheduleTrimmer))?;
        check_not_empty(&timetable, Stage::ScheduleTrimmer, &mut report);
    } else {
        log::info!("  (((2))) trimming schedule to region by stop location (skipped)");
    }

    timetable
        .validate_stop_references()
        .map_err(PipelineError::at(Stage::Validation))?;
    Ok((timetable, report))
}

/// turns a mapped timetable, its network and the imported fleet into the
/// simulation scenario: trims by mapped links when configured, assigns track
/// resources, rebuilds the fleet and validates every reference.
pub fn finalize_scenario(
    mut timetable: Timetable,
    mut network: Network,
    mut fleet: Fleet,
    conf: &RailsimConfiguration,
    region: &RegionSelection,
) -> Result<(Scenario, PipelineReport), PipelineError> {
    let mut report = PipelineReport::default();

    eprintln!();
    if conf.trim_mode == TrimMode::Links {
        log::info!("  (((1))) trimming schedule to region by mapped links ({region})");
        ScheduleTrimmer::new(TrimMode::Links)
            .apply(&mut timetable, Some(&network), region)
            .map_err(PipelineError::at(Stage::ScheduleTrimmer))?;
        check_not_empty(&timetable, Stage::ScheduleTrimmer, &mut report);
    } else {
        log::info!("  (((1))) trimming schedule to region by mapped links (skipped)");
    }

    eprintln!();
    log::info!("  (((2))) assigning track resources");
    conf.resources
        .assign(&mut network)
        .map_err(PipelineError::at(Stage::ResourceAssigner))?;

    eprintln!();
    log::info!("  (((3))) enriching fleet");
    FleetEnricher::new(conf.fleet_classification.clone())
        .enrich(&mut timetable, &mut fleet)
        .map_err(PipelineError::at(Stage::FleetEnricher))?;

    eprintln!();
    log::info!("  (((4))) validating scenario");
    validate_scenario(&timetable, &network, &fleet)?;
    check_not_empty(&timetable, Stage::Validation, &mut report);

    log::info!(
        "finalized scenario with {} routes, {} departures, {} links, {} vehicles",
        timetable.n_routes(),
        timetable.n_departures(),
        network.links.len(),
        fleet.vehicles.len()
    );
    let scenario = Scenario {
        timetable,
        network,
        fleet,
    };
    Ok((scenario, report))
}

/// confirms the references between the three aggregates and the track
/// resource contract.
pub fn validate_scenario(
    timetable: &Timetable,
    network: &Network,
    fleet: &Fleet,
) -> Result<(), PipelineError> {
    let at_validation = PipelineError::at(Stage::Validation);
    timetable
        .validate_stop_references()
        .and_then(|_| timetable.validate_link_references(network))
        .and_then(|_| timetable.validate_vehicle_bindings(fleet))
        .and_then(|_| resource::validate_resource_groups(network))
        .map_err(at_validation)
}

impl Scenario {
    /// writes the timetable, network and fleet into the output directory. the
    /// three files are written together or not at all.
    pub fn write(&self, output_directory: &Path, overwrite: bool) -> Result<(), PipelineError> {
        let artifacts = [
            artifact_io::encode_artifact(
                &self.timetable,
                &output_directory.join(filenames::SCHEDULE_FINAL),
            )?,
            artifact_io::encode_artifact(
                &self.network,
                &output_directory.join(filenames::NETWORK_FINAL),
            )?,
            artifact_io::encode_artifact(
                &self.fleet,
                &output_directory.join(filenames::VEHICLES_FINAL),
            )?,
        ];
        artifact_io::write_artifacts(&artifacts, overwrite)
    }
}

/// reports an advisory when the timetable has no routes left after a stage.
/// only the first stage to find it empty within a run reports it.
fn check_not_empty(timetable: &Timetable, stage: Stage, report: &mut PipelineReport) {
    let reported = report
        .advisories
        .iter()
        .any(|a| matches!(a, Advisory::EmptyResult { .. }));
    if !reported && timetable.n_routes() == 0 {
        report.report(Advisory::EmptyResult {
            stage,
            lines: timetable.n_lines(),
        });
    }
}
