//! Onboarding server functions.
//!
//! Each function is one call to the account service, made with the
//! caller's session.

use leptos::prelude::*;
use lodestar_core::{AccountRecord, SaveOutcome, SendingDomain};

/// Server function to fetch the Slack app install link.
#[server]
pub async fn get_slack_install_url() -> Result<String, ServerFnError> {
    use crate::error::OnboardingError;
    use crate::server_helpers::get_onboarding_service;

    let service = get_onboarding_service().await.map_err(|e| {
        tracing::debug!(error = %e, "Cannot fetch Slack install link");
        e.into_server_error()
    })?;

    service.slack_install_url().await.map_err(|e| {
        OnboardingError::Upstream {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Server function to fetch the account record used to prefill the form.
#[server]
pub async fn get_account() -> Result<AccountRecord, ServerFnError> {
    use crate::error::OnboardingError;
    use crate::server_helpers::get_onboarding_service;

    let service = get_onboarding_service().await.map_err(|e| {
        tracing::debug!(error = %e, "Cannot fetch account");
        e.into_server_error()
    })?;

    service.account().await.map_err(|e| {
        OnboardingError::Upstream {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Server function to list the sending domains visible to a Mailgun key.
#[server]
pub async fn lookup_sending_domains(api_key: String) -> Result<Vec<SendingDomain>, ServerFnError> {
    use crate::error::OnboardingError;
    use crate::server_helpers::get_onboarding_service;

    let service = get_onboarding_service().await.map_err(|e| {
        tracing::debug!(error = %e, "Cannot look up sending domains");
        e.into_server_error()
    })?;

    service.lookup_domains(&api_key).await.map_err(|e| {
        OnboardingError::Upstream {
            details: e.to_string(),
        }
        .into_server_error()
    })
}

/// Server function to persist the onboarding settings.
///
/// `payload_json` is the serialized account patch. Rejections by the account
/// service come back as [`SaveOutcome::Rejected`] so the page can show the
/// service's own message.
#[server]
pub async fn save_account_settings(payload_json: String) -> Result<SaveOutcome, ServerFnError> {
    use crate::error::OnboardingError;
    use crate::server_helpers::get_onboarding_service;
    use lodestar_core::AccountPatch;

    let patch: AccountPatch = serde_json::from_str(&payload_json).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting malformed settings payload");
        OnboardingError::InvalidPayload {
            details: e.to_string(),
        }
        .into_server_error()
    })?;

    let service = get_onboarding_service().await.map_err(|e| {
        tracing::debug!(error = %e, "Cannot save account settings");
        e.into_server_error()
    })?;

    Ok(service.save(&patch).await)
}
