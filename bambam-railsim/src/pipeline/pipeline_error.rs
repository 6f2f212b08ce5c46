use super::PipelineStage;
use crate::model::ScenarioError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: PipelineStage,
        source: ScenarioError,
    },
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading artifact {0}: {1}")]
    ArtifactReadError(String, String),
    #[error("failure writing artifact {0}: {1}")]
    ArtifactWriteError(String, String),
    #[error("failure accessing file system: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}

impl PipelineError {
    /// wraps a domain failure with the stage it occurred in.
    pub fn at(stage: PipelineStage) -> impl FnOnce(ScenarioError) -> PipelineError {
        move |source| PipelineError::StageFailed { stage, source }
    }
}
