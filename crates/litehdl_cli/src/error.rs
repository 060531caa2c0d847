//! Failures that stop the CLI before or after compilation proper.

use std::path::PathBuf;

use litehdl_common::InternalError;
use litehdl_config::ConfigError;

/// Anything that ends a run with exit code 2.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input path does not name a readable file.
    #[error("input file `{}` not found", .0.display())]
    InputNotFound(PathBuf),
    /// Reading the input or writing the output failed.
    #[error("{action} `{}`: {source}", .path.display())]
    Io {
        /// `"failed to read"` or `"failed to write"`.
        action: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// `litehdl.toml` could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A stage broke one of its own invariants.
    #[error(transparent)]
    Internal(#[from] InternalError),
    /// The IR could not be serialized.
    #[error("failed to serialize IR: {0}")]
    Json(#[from] serde_json::Error),
}
