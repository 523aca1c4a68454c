//! # CLI Error Type
//!
//! What a command can fail with. `main` wraps these in `anyhow` context;
//! library callers (and tests) match on the variants.

use galley_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Rejected input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CliResult<T> = Result<T, CliError>;
