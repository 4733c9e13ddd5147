//! The account service boundary.

use crate::error::ApiError;
use async_trait::async_trait;
use lodestar_core::{AccountPatch, AccountRecord, SendingDomain};

/// Remote operations the onboarding page depends on.
///
/// Implemented over HTTP by [`HttpAccountsApi`](crate::HttpAccountsApi) and
/// by in-memory fakes in tests.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Returns the link that installs the Slack app for this account.
    async fn slack_install_url(&self) -> Result<String, ApiError>;

    /// Reads the current account record.
    async fn fetch_account(&self) -> Result<AccountRecord, ApiError>;

    /// Persists integration settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the service's message when the
    /// update is refused.
    async fn update_account(&self, patch: &AccountPatch) -> Result<(), ApiError>;

    /// Lists the sending domains visible to a Mailgun key.
    async fn list_domains(&self, api_key: &str) -> Result<Vec<SendingDomain>, ApiError>;
}
