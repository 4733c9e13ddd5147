//! Text fields of the integration settings record.
//!
//! Every field carries the wire key used by the account service, so the
//! same identifier drives form state, validation errors and the submitted
//! payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a field from its wire key fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    /// The key that did not match any field.
    pub key: String,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown settings field '{}'", self.key)
    }
}

impl std::error::Error for ParseFieldError {}

/// A string-valued field of [`IntegrationSettings`](crate::IntegrationSettings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Display name used by the default mail relay.
    #[serde(rename = "sendingName")]
    SendingName,
    /// Local part of the sending address for the default mail relay.
    #[serde(rename = "sendingEmail")]
    SendingEmail,
    /// Local part of the sending address for the sandbox provider.
    #[serde(rename = "testSendingEmail")]
    TestSendingEmail,
    /// Display name used by the sandbox provider.
    #[serde(rename = "testSendingName")]
    TestSendingName,
    /// Slack workspace identifier.
    #[serde(rename = "slackId")]
    SlackId,
    /// Private API key of the default mail relay.
    #[serde(rename = "mailgunAPIKey")]
    MailgunApiKey,
    #[serde(rename = "posthogApiKey")]
    PosthogApiKey,
    #[serde(rename = "posthogProjectId")]
    PosthogProjectId,
    #[serde(rename = "posthogHostUrl")]
    PosthogHostUrl,
    /// Name of the phone number property on a Posthog person.
    #[serde(rename = "posthogSmsKey")]
    PosthogSmsKey,
    /// Name of the email property on a Posthog person.
    #[serde(rename = "posthogEmailKey")]
    PosthogEmailKey,
    #[serde(rename = "sendgridApiKey")]
    SendgridApiKey,
    #[serde(rename = "sendgridFromEmail")]
    SendgridFromEmail,
}

impl Field {
    /// Every field, in payload order.
    pub const ALL: [Field; 13] = [
        Field::SendingName,
        Field::SendingEmail,
        Field::TestSendingEmail,
        Field::TestSendingName,
        Field::SlackId,
        Field::MailgunApiKey,
        Field::PosthogApiKey,
        Field::PosthogProjectId,
        Field::PosthogHostUrl,
        Field::PosthogSmsKey,
        Field::PosthogEmailKey,
        Field::SendgridApiKey,
        Field::SendgridFromEmail,
    ];

    /// Returns the key used for this field on the wire and in the DOM.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Field::SendingName => "sendingName",
            Field::SendingEmail => "sendingEmail",
            Field::TestSendingEmail => "testSendingEmail",
            Field::TestSendingName => "testSendingName",
            Field::SlackId => "slackId",
            Field::MailgunApiKey => "mailgunAPIKey",
            Field::PosthogApiKey => "posthogApiKey",
            Field::PosthogProjectId => "posthogProjectId",
            Field::PosthogHostUrl => "posthogHostUrl",
            Field::PosthogSmsKey => "posthogSmsKey",
            Field::PosthogEmailKey => "posthogEmailKey",
            Field::SendgridApiKey => "sendgridApiKey",
            Field::SendgridFromEmail => "sendgridFromEmail",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| ParseFieldError { key: s.to_string() })
    }
}

/// How an input is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// Masked input for credentials.
    Password,
}

impl InputKind {
    /// Returns the HTML `type` attribute value.
    #[must_use]
    pub const fn as_html(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Password => "password",
        }
    }
}

/// Presentation schema for a single text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: InputKind,
    /// Whether the input is marked as required in the UI.
    pub required: bool,
}

impl FieldSpec {
    /// Creates a plain, optional text input.
    #[must_use]
    pub const fn text(field: Field, label: &'static str) -> Self {
        Self {
            field,
            label,
            placeholder: None,
            kind: InputKind::Text,
            required: false,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Masks the input.
    #[must_use]
    pub const fn password(mut self) -> Self {
        self.kind = InputKind::Password;
        self
    }

    /// Marks the input as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
