//! Domain error types for server operations.
//!
//! Server functions log the detailed variant and hand the browser the
//! user-safe form from `into_server_error`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors raised while serving the onboarding page's server functions.
#[derive(Debug)]
pub enum OnboardingError {
    /// The account service client was not registered with the router.
    NotConfigured,
    /// The request carried no session cookie.
    NotAuthenticated,
    /// The settings payload could not be decoded.
    InvalidPayload { details: String },
    /// The account service call failed.
    Upstream { details: String },
}

impl fmt::Display for OnboardingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "account service client is not configured"),
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::InvalidPayload { details } => {
                write!(f, "invalid settings payload: {}", details)
            }
            Self::Upstream { details } => {
                write!(f, "account service error: {}", details)
            }
        }
    }
}

impl std::error::Error for OnboardingError {}

impl OnboardingError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            OnboardingError::NotConfigured => ServerFnError::new("Service unavailable"),
            OnboardingError::NotAuthenticated => ServerFnError::new("Not authenticated"),
            OnboardingError::InvalidPayload { .. } => ServerFnError::new("Invalid settings"),
            OnboardingError::Upstream { .. } => ServerFnError::new("Account service error"),
        }
    }
}
