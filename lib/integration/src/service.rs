//! Onboarding operations on top of an [`AccountsApi`].
//!
//! The service turns transport-level outcomes into what the onboarding page
//! needs: an empty domain list for an empty key, and a [`SaveOutcome`] that
//! carries the service's rejection message through unchanged.

use crate::api::AccountsApi;
use crate::error::ApiError;
use lodestar_core::{AccountPatch, AccountRecord, SaveOutcome, SendingDomain};
use tracing::instrument;

/// Onboarding use cases backed by the account service.
#[derive(Debug, Clone)]
pub struct OnboardingService<A> {
    api: A,
}

impl<A: AccountsApi> OnboardingService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetches the Slack install link.
    #[instrument(skip_all)]
    pub async fn slack_install_url(&self) -> lodestar_core::Result<String, ApiError> {
        let url = self.api.slack_install_url().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch Slack install link");
        })?;
        Ok(url)
    }

    /// Fetches the account record used to prefill the form.
    #[instrument(skip_all)]
    pub async fn account(&self) -> lodestar_core::Result<AccountRecord, ApiError> {
        let record = self.api.fetch_account().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch account");
        })?;
        Ok(record)
    }

    /// Lists the sending domains for a Mailgun key.
    ///
    /// An empty key yields an empty list without contacting the service.
    #[instrument(skip_all)]
    pub async fn lookup_domains(
        &self,
        api_key: &str,
    ) -> lodestar_core::Result<Vec<SendingDomain>, ApiError> {
        if api_key.is_empty() {
            return Ok(Vec::new());
        }

        let domains = self.api.list_domains(api_key).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Sending domain lookup failed");
        })?;
        tracing::debug!(count = domains.len(), "Sending domains listed");
        Ok(domains)
    }

    /// Persists the settings and reports how it went.
    ///
    /// Failures never surface as errors: a rejection keeps the service's
    /// message, and any other failure becomes a rejection without one.
    #[instrument(skip_all, fields(keys = patch.len()))]
    pub async fn save(&self, patch: &AccountPatch) -> SaveOutcome {
        match self.api.update_account(patch).await {
            Ok(()) => {
                tracing::info!("Account settings saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "Account settings update failed");
                SaveOutcome::Rejected {
                    message: e.service_message().map(str::to_string),
                }
            }
        }
    }
}
