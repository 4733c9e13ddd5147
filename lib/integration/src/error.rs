//! Error types for the integration crate.
//!
//! `ApiError` describes a failed exchange with the account service. Callers
//! that need layered context wrap it in a rootcause `Report`.

use std::fmt;

/// Errors from calls to the account service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The client could not be built from its configuration.
    InvalidConfig { reason: String },
    /// The request never produced a response.
    ConnectionFailed { endpoint: String, reason: String },
    /// No response arrived before the configured timeout.
    Timeout { endpoint: String },
    /// The service answered with a non-success status.
    Rejected {
        endpoint: String,
        status: u16,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },
    /// The response body did not have the expected shape.
    InvalidResponse { endpoint: String, reason: String },
}

impl ApiError {
    /// The service's own explanation for a rejected request.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid account service configuration: {reason}")
            }
            Self::ConnectionFailed { endpoint, reason } => {
                write!(f, "failed to connect to '{endpoint}': {reason}")
            }
            Self::Timeout { endpoint } => write!(f, "request to '{endpoint}' timed out"),
            Self::Rejected {
                endpoint,
                status,
                message,
            } => match message {
                Some(message) => write!(f, "'{endpoint}' returned HTTP {status}: {message}"),
                None => write!(f, "'{endpoint}' returned HTTP {status}"),
            },
            Self::InvalidResponse { endpoint, reason } => {
                write!(f, "unexpected response from '{endpoint}': {reason}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
