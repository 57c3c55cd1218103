//! @ai:module:intent Define structural failures of a benchmark run
//! @ai:module:layer domain
//! @ai:module:public_api PipelineError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Failures that abort a whole run
///
/// Stage-local problems (too few agents, degenerate numerics) are not errors;
/// they are carried as variants of the stage's own output.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Dataset '{benchmark}' not found at {}", path.display())]
    DatasetNotFound { benchmark: String, path: PathBuf },

    #[error("Failed to parse dataset {}: {source}", path.display())]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset '{0}' contains no questions")]
    EmptyDataset(String),

    #[error("No agents configured for the run")]
    NoAgents,

    #[error("{stage} stage failed: {message}")]
    Stage { stage: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
