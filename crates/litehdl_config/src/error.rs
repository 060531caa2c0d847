//! Configuration errors.

/// Why `litehdl.toml` could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),
    /// The file is not valid TOML or has keys of the wrong type.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
    /// A value parsed but is not acceptable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ConfigError::ParseError("expected `=`".into()).to_string(),
            "failed to parse configuration: expected `=`"
        );
        assert_eq!(
            ConfigError::ValidationError("output.extension is empty".into()).to_string(),
            "invalid configuration: output.extension is empty"
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(ConfigError::from(io)
            .to_string()
            .starts_with("failed to read configuration:"));
    }
}
