//! Wire types exchanged with the account service.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The account record returned by `GET /accounts`.
///
/// Every field is optional; the service omits or nulls whatever it has not
/// stored yet, and fields the page does not use are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountRecord {
    pub sending_name: Option<String>,
    pub sending_email: Option<String>,
    pub test_sending_email: Option<String>,
    pub test_sending_name: Option<String>,
    /// Slack workspaces the app was installed to; the first one is used.
    pub slack_team_id: Option<Vec<String>>,
    #[serde(rename = "mailgunAPIKey")]
    pub mailgun_api_key: Option<String>,
    pub posthog_api_key: Option<String>,
    pub posthog_project_id: Option<String>,
    pub posthog_host_url: Option<String>,
    pub posthog_sms_key: Option<String>,
    pub posthog_email_key: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_from_email: Option<String>,
    pub email_provider: Option<String>,
    pub sending_domain: Option<String>,
    /// Whether the account's sending identity passed verification.
    pub verified: Option<bool>,
}

impl AccountRecord {
    /// Returns the remote value for a settings field.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::SendingName => &self.sending_name,
            Field::SendingEmail => &self.sending_email,
            Field::TestSendingEmail => &self.test_sending_email,
            Field::TestSendingName => &self.test_sending_name,
            Field::SlackId => {
                return self
                    .slack_team_id
                    .as_ref()
                    .and_then(|ids| ids.first())
                    .map(String::as_str);
            }
            Field::MailgunApiKey => &self.mailgun_api_key,
            Field::PosthogApiKey => &self.posthog_api_key,
            Field::PosthogProjectId => &self.posthog_project_id,
            Field::PosthogHostUrl => &self.posthog_host_url,
            Field::PosthogSmsKey => &self.posthog_sms_key,
            Field::PosthogEmailKey => &self.posthog_email_key,
            Field::SendgridApiKey => &self.sendgrid_api_key,
            Field::SendgridFromEmail => &self.sendgrid_from_email,
        };
        value.as_deref()
    }
}

/// Body of `PATCH /accounts`: wire key to value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountPatch(BTreeMap<String, String>);

impl AccountPatch {
    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A sending domain known to the mail relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingDomain {
    pub name: String,
}

impl SendingDomain {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of persisting the account settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    /// The update did not go through; `message` is the service's own
    /// explanation when it sent one.
    Rejected { message: Option<String> },
}

impl SaveOutcome {
    /// Settles the result of a save call.
    ///
    /// A failure to reach the service at all is a rejection without a
    /// message.
    #[must_use]
    pub fn settle<E>(result: Result<SaveOutcome, E>) -> Self {
        result.unwrap_or(SaveOutcome::Rejected { message: None })
    }
}
