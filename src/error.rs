//! Error taxonomy for the analysis pipeline.
//!
//! Fetch failures are recovered inside the extractor (synthetic fallback) and
//! never surface from a run. Everything else aborts: an empty sample or any
//! other stage error is wrapped in [`RaterError::Stage`] with the name of the
//! stage that raised it and propagated to the caller. There is no retry.

use thiserror::Error;

pub type RaterResult<T> = Result<T, RaterError>;

/// Errors produced by extraction, analysis, the pipeline, and output writing.
#[derive(Debug, Error)]
pub enum RaterError {
    /// HTTP fetch failed. Handled locally by the extractor's fallback;
    /// callers of the pipeline never observe this variant.
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The source URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Statistics or quality assessment was invoked on zero records.
    #[error("Empty sample: {0}")]
    EmptySample(&'static str),

    /// A pipeline stage failed; the run is aborted with no partial result.
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<RaterError>,
    },

    /// The run was cancelled between or during stages.
    #[error("Pipeline cancelled")]
    Cancelled,

    /// Filesystem error while writing reports or history.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization or parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RaterError {
    /// Wraps this error with the name of the stage it aborted.
    pub(crate) fn in_stage(self, stage: &'static str) -> Self {
        RaterError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the failed stage's name, if this is a stage failure.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            RaterError::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }
}
