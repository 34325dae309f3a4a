/// Core error types for Sound+
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Sound+
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A duration string could not be interpreted
    #[error("Invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },
}

impl CoreError {
    pub(crate) fn invalid_duration(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
