//! Loading and validation of `litehdl.toml`.
//!
//! The file is optional. Every key has a default, so a missing file and an
//! empty file both produce [`ProjectConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
