mod advisory;
pub mod artifact_io;
mod orchestrator;
mod pipeline_error;
mod pipeline_stage;

pub use advisory::{Advisory, PipelineReport};
pub use orchestrator::{finalize_scenario, prepare_schedule, validate_scenario, Scenario};
pub use pipeline_error::PipelineError;
pub use pipeline_stage::PipelineStage;
