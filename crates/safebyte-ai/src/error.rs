use std::path::PathBuf;

use safebyte_core::RangeError;
use thiserror::Error;

/// Failure while turning a feature record into a risk label.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unknown {field} value {value:?}: not in the fitted vocabulary")]
    UnknownCategory { field: String, value: String },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("classifier produced label code {0} with no decoded label")]
    UnknownLabel(u32),

    #[error(transparent)]
    OutOfRange(#[from] RangeError),
}

/// Failure while loading or validating model artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),
}
