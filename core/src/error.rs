//! Error types for the disable pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, KillSwitchError>;

/// Every failure aborts the invocation; there is no recoverable variant.
#[derive(Error, Debug)]
pub enum KillSwitchError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("secret store error: {message}")]
    Secret { message: String },

    #[error("authentication error: {message}")]
    Authentication { message: String },

    #[error("upstream error: {message}")]
    Upstream { message: String },
}

impl KillSwitchError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn secret(message: impl Into<String>) -> Self {
        Self::Secret {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Stable key for structured log fields
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration_error",
            Self::Secret { .. } => "secret_error",
            Self::Authentication { .. } => "authentication_error",
            Self::Upstream { .. } => "upstream_error",
        }
    }
}
