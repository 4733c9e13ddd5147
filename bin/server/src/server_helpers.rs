//! Helper functions for server functions with proper error handling and logging.

use crate::error::OnboardingError;
use axum::Extension;
use axum_extra::extract::CookieJar;
use lodestar_integration::{HttpAccountsApi, OnboardingService};

/// Request-independent state registered on the router as an extension.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api: HttpAccountsApi,
    pub session_cookie: String,
}

/// Builds an onboarding service that acts on behalf of the caller.
///
/// The caller's session cookie is forwarded to the account service as a
/// bearer token.
pub async fn get_onboarding_service() -> Result<OnboardingService<HttpAccountsApi>, OnboardingError>
{
    let Extension(ctx) = leptos_axum::extract::<Extension<AppContext>>()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "App context missing from request");
            OnboardingError::NotConfigured
        })?;

    let token = leptos_axum::extract::<CookieJar>()
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Failed to extract cookie jar");
            OnboardingError::NotAuthenticated
        })?
        .get(&ctx.session_cookie)
        .map(|c| c.value().to_string())
        .ok_or(OnboardingError::NotAuthenticated)?;

    Ok(OnboardingService::new(ctx.api.with_bearer(token)))
}
