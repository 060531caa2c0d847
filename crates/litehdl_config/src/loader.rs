//! Reading `litehdl.toml` from disk or from a string.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::ProjectConfig;

/// Name of the configuration file looked up next to the input.
pub const CONFIG_FILE_NAME: &str = "litehdl.toml";

/// Loads `<dir>/litehdl.toml`, or the defaults if the file does not exist.
pub fn load_config(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(ProjectConfig::default());
    }
    load_config_file(&path)
}

/// Loads an explicit configuration file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ProjectConfig) -> Result<(), ConfigError> {
    let ext = &config.output.extension;
    if ext.is_empty() {
        return Err(ConfigError::ValidationError(
            "output.extension must not be empty".to_string(),
        ));
    }
    if ext.starts_with('.') {
        return Err(ConfigError::ValidationError(format!(
            "output.extension `{ext}` must not start with a dot"
        )));
    }

    let arch = &config.output.architecture;
    if !is_vhdl_identifier(arch) {
        return Err(ConfigError::ValidationError(format!(
            "output.architecture `{arch}` is not a VHDL identifier"
        )));
    }
    Ok(())
}

/// VHDL basic identifier: a letter, then letters, digits and single underscores,
/// not ending in an underscore.
fn is_vhdl_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.ends_with('_')
        && !name.contains("__")
}
