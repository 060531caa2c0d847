//! Configuration sections.

use serde::{Deserialize, Serialize};

/// Contents of `litehdl.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Generated file settings.
    pub output: OutputConfig,
    /// Diagnostic policy.
    pub diagnostics: DiagnosticsConfig,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension given to the derived output path, without the dot.
    pub extension: String,
    /// Name of the generated architecture.
    pub architecture: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "vhd".to_string(),
            architecture: "Behavioral".to_string(),
        }
    }
}

/// `[diagnostics]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Fail the run when any warning is reported.
    pub deny_warnings: bool,
}
