use super::PipelineStage;
use std::fmt::Display;

/// an unusual but legal outcome of a stage. advisories are logged and
/// collected, they never halt the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// the stage left the timetable without any route
    EmptyResult {
        stage: PipelineStage,
        lines: usize,
    },
}

impl Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::EmptyResult { stage, lines } => write!(
                f,
                "{stage} left no routes in the timetable ({lines} lines remain, all empty)"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub advisories: Vec<Advisory>,
}

impl PipelineReport {
    pub fn report(&mut self, advisory: Advisory) {
        log::warn!("{advisory}");
        self.advisories.push(advisory);
    }

    pub fn extend(&mut self, other: PipelineReport) {
        self.advisories.extend(other.advisories);
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }
}
