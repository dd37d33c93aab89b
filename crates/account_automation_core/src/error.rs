use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutomationError>;

/// Failures raised by collaborators, configuration, and event parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomationError {
    /// The cross-account role could not be assumed, or the caller lacks permission.
    #[error("authorization error: {0}")]
    Authorization(String),

    /// The requested quota or resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Throttling, service-side failures, and transport errors.
    #[error("transient error: {0}")]
    Transient(String),

    /// The provider rejected the request as invalid.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

impl AutomationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Transient(_) => ErrorKind::Transient,
            Self::Validation(_) | Self::Configuration(_) | Self::MalformedEvent(_) => {
                ErrorKind::Validation
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Authorization(message)
            | Self::NotFound(message)
            | Self::Transient(message)
            | Self::Validation(message)
            | Self::Configuration(message)
            | Self::MalformedEvent(message) => message,
        }
    }
}

/// Coarse error taxonomy reported in reconciliation outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[serde(rename = "AuthorizationError")]
    Authorization,
    #[serde(rename = "NotFoundError")]
    NotFound,
    #[serde(rename = "TransientError")]
    Transient,
    #[serde(rename = "ValidationError")]
    Validation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authorization => "AuthorizationError",
            Self::NotFound => "NotFoundError",
            Self::Transient => "TransientError",
            Self::Validation => "ValidationError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
