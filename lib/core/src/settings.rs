//! Local integration settings record and payload assembly.

use crate::account::AccountPatch;
use crate::field::Field;
use crate::provider::{EmailProvider, EventProvider, IntegrationProvider};

/// Default Posthog host offered before the account record arrives.
pub const DEFAULT_POSTHOG_HOST: &str = "app.posthog.com";

/// Wire key of the selected email provider.
pub const EMAIL_PROVIDER_KEY: &str = "emailProvider";
/// Wire key of the selected event provider.
pub const EVENT_PROVIDER_KEY: &str = "eventProvider";
/// Wire key of the selected sending domain.
pub const SENDING_DOMAIN_KEY: &str = "sendingDomain";

/// Flat record of everything the onboarding page lets the user configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationSettings {
    pub sending_name: String,
    pub sending_email: String,
    pub test_sending_email: String,
    pub test_sending_name: String,
    pub slack_id: String,
    pub mailgun_api_key: String,
    pub posthog_api_key: String,
    pub posthog_project_id: String,
    pub posthog_host_url: String,
    pub posthog_sms_key: String,
    pub posthog_email_key: String,
    pub sendgrid_api_key: String,
    pub sendgrid_from_email: String,
    pub email_provider: Option<EmailProvider>,
    pub event_provider: Option<EventProvider>,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            sending_name: String::new(),
            sending_email: String::new(),
            test_sending_email: String::new(),
            test_sending_name: String::new(),
            slack_id: String::new(),
            mailgun_api_key: String::new(),
            posthog_api_key: String::new(),
            posthog_project_id: String::new(),
            posthog_host_url: DEFAULT_POSTHOG_HOST.to_string(),
            posthog_sms_key: String::new(),
            posthog_email_key: String::new(),
            sendgrid_api_key: String::new(),
            sendgrid_from_email: String::new(),
            email_provider: None,
            event_provider: Some(EventProvider::Posthog),
        }
    }
}

impl IntegrationSettings {
    /// Returns the current value of a text field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::SendingName => &self.sending_name,
            Field::SendingEmail => &self.sending_email,
            Field::TestSendingEmail => &self.test_sending_email,
            Field::TestSendingName => &self.test_sending_name,
            Field::SlackId => &self.slack_id,
            Field::MailgunApiKey => &self.mailgun_api_key,
            Field::PosthogApiKey => &self.posthog_api_key,
            Field::PosthogProjectId => &self.posthog_project_id,
            Field::PosthogHostUrl => &self.posthog_host_url,
            Field::PosthogSmsKey => &self.posthog_sms_key,
            Field::PosthogEmailKey => &self.posthog_email_key,
            Field::SendgridApiKey => &self.sendgrid_api_key,
            Field::SendgridFromEmail => &self.sendgrid_from_email,
        }
    }

    /// Replaces the value of a text field.
    pub fn set(&mut self, field: Field, value: String) {
        *self.slot(field) = value;
    }

    /// Replaces a text field only when `value` is non-empty.
    ///
    /// Returns whether the field changed.
    pub fn merge(&mut self, field: Field, value: Option<&str>) -> bool {
        match value {
            Some(value) if !value.is_empty() => {
                self.set(field, value.to_string());
                true
            }
            _ => false,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::SendingName => &mut self.sending_name,
            Field::SendingEmail => &mut self.sending_email,
            Field::TestSendingEmail => &mut self.test_sending_email,
            Field::TestSendingName => &mut self.test_sending_name,
            Field::SlackId => &mut self.slack_id,
            Field::MailgunApiKey => &mut self.mailgun_api_key,
            Field::PosthogApiKey => &mut self.posthog_api_key,
            Field::PosthogProjectId => &mut self.posthog_project_id,
            Field::PosthogHostUrl => &mut self.posthog_host_url,
            Field::PosthogSmsKey => &mut self.posthog_sms_key,
            Field::PosthogEmailKey => &mut self.posthog_email_key,
            Field::SendgridApiKey => &mut self.sendgrid_api_key,
            Field::SendgridFromEmail => &mut self.sendgrid_from_email,
        }
    }

    /// Builds the body of the account update.
    ///
    /// Only non-empty fields and selected providers are included, then the
    /// sending domain and the Mailgun key are always set, even when empty.
    #[must_use]
    pub fn payload(&self, sending_domain: &str) -> AccountPatch {
        let mut patch = AccountPatch::default();
        for field in Field::ALL {
            let value = self.get(field);
            if !value.is_empty() {
                patch.insert(field.key(), value);
            }
        }
        if let Some(provider) = self.email_provider {
            patch.insert(EMAIL_PROVIDER_KEY, provider.id());
        }
        if let Some(provider) = self.event_provider {
            patch.insert(EVENT_PROVIDER_KEY, provider.id());
        }
        patch.insert(SENDING_DOMAIN_KEY, sending_domain);
        patch.insert(Field::MailgunApiKey.key(), &self.mailgun_api_key);
        patch
    }
}
