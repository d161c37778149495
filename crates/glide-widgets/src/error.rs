//! Error types for motion configuration.

use thiserror::Error;

/// Errors raised while loading a [`MotionConfig`](crate::MotionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field parsed but holds an unusable value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Dotted path of the field
        field: String,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
