//! Result type for internal compiler failures.

/// Result of a compiler stage.
///
/// `Err` is reserved for bugs in LiteHDL itself. Problems in the user's
/// source are reported through the diagnostic sink, and the stage still
/// returns `Ok` with whatever it managed to build.
pub type LiteResult<T> = Result<T, InternalError>;

/// A broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for InternalError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
