//! State machine behind the onboarding page.
//!
//! [`OnboardingForm`] owns everything the page shows and reacts to user
//! events. It never performs I/O itself: hydration data, lookup results and
//! save outcomes are fed in by the caller, and side effects on shared state
//! go through an injected [`SettingsStore`].

use crate::account::{AccountPatch, AccountRecord, SaveOutcome, SendingDomain};
use crate::field::Field;
use crate::notification::{Notification, SPACES_NOT_ALLOWED};
use crate::provider::{self, ChannelOption, EmailProvider, EventProvider};
use crate::settings::IntegrationSettings;
use crate::store::SettingsStore;
use crate::validation::{FieldErrors, strip_spaces};
use std::fmt;

/// A domain lookup the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLookup {
    pub api_key: String,
    /// Increases with every lookup; only the newest result is applied.
    pub generation: u64,
}

/// Returned when required fields of the selected email provider are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBlocked {
    pub provider: EmailProvider,
    pub empty_fields: Vec<Field>,
}

impl fmt::Display for SubmissionBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.empty_fields.iter().map(|field| field.key()).collect();
        write!(
            f,
            "{:?} settings are missing required fields: {}",
            self.provider,
            fields.join(", ")
        )
    }
}

impl std::error::Error for SubmissionBlocked {}

/// Local state of the onboarding page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingForm {
    settings: IntegrationSettings,
    domain_name: String,
    domain_list: Vec<SendingDomain>,
    errors: FieldErrors,
    verified: bool,
    slack_install_url: String,
    video_open: bool,
    notifications: Vec<Notification>,
    lookup_generation: u64,
}

impl OnboardingForm {
    /// Creates a form with default settings and the store's current domain.
    #[must_use]
    pub fn new(store: &dyn SettingsStore) -> Self {
        Self {
            settings: IntegrationSettings::default(),
            domain_name: store.domain_name(),
            domain_list: store.domains(),
            errors: FieldErrors::default(),
            verified: false,
            slack_install_url: String::new(),
            video_open: false,
            notifications: Vec::new(),
            lookup_generation: 0,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.settings.get(field)
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    #[must_use]
    pub fn email_provider(&self) -> Option<EmailProvider> {
        self.settings.email_provider
    }

    #[must_use]
    pub fn event_provider(&self) -> Option<EventProvider> {
        self.settings.event_provider
    }

    #[must_use]
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    #[must_use]
    pub fn domain_list(&self) -> &[SendingDomain] {
        &self.domain_list
    }

    #[must_use]
    pub fn verified(&self) -> bool {
        self.verified
    }

    #[must_use]
    pub fn slack_install_url(&self) -> &str {
        &self.slack_install_url
    }

    #[must_use]
    pub fn video_open(&self) -> bool {
        self.video_open
    }

    /// Merges the account record into local state.
    ///
    /// Text fields and the email provider take the remote value only when it
    /// is non-empty. The Mailgun key, sending domain and verification flag
    /// always follow the record.
    pub fn hydrate(&mut self, record: &AccountRecord) {
        for field in Field::ALL {
            if field != Field::MailgunApiKey {
                self.settings.merge(field, record.field(field));
            }
        }

        if let Some(id) = record.email_provider.as_deref()
            && !id.is_empty()
        {
            match id.parse::<EmailProvider>() {
                Ok(provider) => self.settings.email_provider = Some(provider),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring email provider from account record");
                }
            }
        }

        self.settings.mailgun_api_key = record.mailgun_api_key.clone().unwrap_or_default();
        self.domain_name = record.sending_domain.clone().unwrap_or_default();
        self.verified = record.verified.unwrap_or(false);
    }

    pub fn set_slack_install_url(&mut self, url: String) {
        self.slack_install_url = url;
    }

    /// Handles a keystroke in a text input.
    ///
    /// Spaces are stripped before the value is stored and one warning is
    /// queued per change that contained any.
    pub fn change(&mut self, field: Field, raw: &str) {
        let sanitized = strip_spaces(raw);
        if sanitized.removed {
            self.notifications
                .push(Notification::warning(SPACES_NOT_ALLOWED));
        }
        self.settings.set(field, sanitized.value);
    }

    /// Handles an input losing focus.
    ///
    /// Re-validates the field. Leaving a non-empty Mailgun key also shares
    /// the key with the store and asks the caller to look up its domains.
    pub fn blur(&mut self, field: Field, store: &dyn SettingsStore) -> Option<DomainLookup> {
        let value = self.settings.get(field);
        self.errors.check(field, value);

        if field != Field::MailgunApiKey || value.is_empty() {
            return None;
        }

        store.set_private_api_key(value);
        self.lookup_generation += 1;
        Some(DomainLookup {
            api_key: value.to_string(),
            generation: self.lookup_generation,
        })
    }

    /// Applies the result of a domain lookup.
    ///
    /// Results of lookups superseded by a later blur are dropped. Returns
    /// whether the result was applied.
    pub fn apply_domains(
        &mut self,
        lookup: &DomainLookup,
        domains: Vec<SendingDomain>,
        store: &dyn SettingsStore,
    ) -> bool {
        if lookup.generation != self.lookup_generation {
            tracing::debug!(
                generation = lookup.generation,
                latest = self.lookup_generation,
                "Discarding stale domain lookup"
            );
            return false;
        }
        store.set_domains(domains.clone());
        self.domain_list = domains;
        true
    }

    pub fn select_domain(&mut self, name: String) {
        self.domain_name = name;
    }

    /// Switches the email provider and clears every recorded error.
    ///
    /// The sandbox cannot be chosen until the account is verified; returns
    /// whether the selection was accepted.
    pub fn select_email_provider(&mut self, provider: EmailProvider) -> bool {
        if provider == EmailProvider::Free3 && !self.verified {
            tracing::debug!("Sandbox provider selected before verification");
            return false;
        }
        self.settings.email_provider = Some(provider);
        self.errors.clear();
        true
    }

    pub fn select_event_provider(&mut self, provider: EventProvider) {
        self.settings.event_provider = Some(provider);
    }

    /// Whether saving the email settings is currently disabled.
    #[must_use]
    pub fn submit_blocked(&self) -> bool {
        self.settings
            .email_provider
            .is_some_and(|provider| self.errors.any_of(provider.required_fields()))
    }

    /// Validates the selected email provider and builds the update body.
    ///
    /// Every required field of the selected provider is re-checked and its
    /// error recorded, so a blocked submission is visible inline.
    pub fn prepare_submission(&mut self) -> Result<AccountPatch, SubmissionBlocked> {
        if let Some(provider) = self.settings.email_provider {
            let mut empty_fields = Vec::new();
            for &field in provider.required_fields() {
                if self.errors.check(field, self.settings.get(field)) {
                    empty_fields.push(field);
                }
            }
            if !empty_fields.is_empty() {
                return Err(SubmissionBlocked {
                    provider,
                    empty_fields,
                });
            }
        }
        Ok(self.settings.payload(&self.domain_name))
    }

    /// Reacts to the outcome of a save; form values are left untouched.
    pub fn record_save_outcome(&mut self, outcome: &SaveOutcome) {
        if let SaveOutcome::Rejected { message } = outcome {
            self.notifications
                .push(Notification::save_failed(message.as_deref()));
        }
    }

    /// Email channels, with the sandbox gated on verification.
    #[must_use]
    pub fn email_options(&self) -> Vec<ChannelOption> {
        provider::email_channels(self.verified)
    }

    #[must_use]
    pub fn event_options(&self) -> Vec<ChannelOption> {
        provider::event_channels()
    }

    pub fn open_video(&mut self) {
        self.video_open = true;
    }

    pub fn close_video(&mut self) {
        self.video_open = false;
    }

    /// Drains queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{Level, UNEXPECTED_ERROR};
    use crate::store::{InMemorySettingsStore, StoredSettings};
    use crate::validation::EMPTY_FIELD_MESSAGE;

    fn store() -> InMemorySettingsStore {
        InMemorySettingsStore::default()
    }

    fn verified_form(store: &InMemorySettingsStore) -> OnboardingForm {
        let mut form = OnboardingForm::new(store);
        form.hydrate(&AccountRecord {
            verified: Some(true),
            ..AccountRecord::default()
        });
        form
    }

    #[test]
    fn new_form_reads_domain_from_store() {
        let store = InMemorySettingsStore::new(StoredSettings {
            domain_name: "mail.acme.io".to_string(),
            domains: vec![SendingDomain::new("mail.acme.io")],
            ..StoredSettings::default()
        });
        let form = OnboardingForm::new(&store);
        assert_eq!(form.domain_name(), "mail.acme.io");
        assert_eq!(form.domain_list().len(), 1);
        assert!(!form.verified());
    }

    #[test]
    fn change_strips_spaces_and_warns_once() {
        let store = store();
        let mut form = OnboardingForm::new(&store);

        form.change(Field::SendgridApiKey, "SG. abc def");
        assert_eq!(form.value(Field::SendgridApiKey), "SG.abcdef");

        let notifications = form.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, Level::Warning);
        assert_eq!(notifications[0].message, SPACES_NOT_ALLOWED);
    }

    #[test]
    fn change_without_spaces_is_silent() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.change(Field::SendingName, "Acme");
        assert_eq!(form.value(Field::SendingName), "Acme");
        assert!(form.take_notifications().is_empty());
    }

    #[test]
    fn blur_sets_and_clears_error() {
        let store = store();
        let mut form = OnboardingForm::new(&store);

        assert_eq!(form.blur(Field::SendingName, &store), None);
        assert_eq!(form.error(Field::SendingName), Some(EMPTY_FIELD_MESSAGE));

        form.change(Field::SendingName, "Acme");
        form.blur(Field::SendingName, &store);
        assert_eq!(form.error(Field::SendingName), None);
    }

    #[test]
    fn blurring_mailgun_key_requests_lookup_and_shares_key() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.change(Field::MailgunApiKey, "key-1");

        let lookup = form
            .blur(Field::MailgunApiKey, &store)
            .expect("lookup requested");
        assert_eq!(lookup.api_key, "key-1");
        assert_eq!(store.snapshot().private_api_key, "key-1");

        assert!(form.apply_domains(&lookup, vec![SendingDomain::new("mail.acme.io")], &store));
        assert_eq!(form.domain_list(), &[SendingDomain::new("mail.acme.io")]);
        assert_eq!(store.domains().len(), 1);
    }

    #[test]
    fn empty_mailgun_key_does_not_trigger_lookup() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        assert_eq!(form.blur(Field::MailgunApiKey, &store), None);
        assert_eq!(form.error(Field::MailgunApiKey), Some(EMPTY_FIELD_MESSAGE));
        assert_eq!(store.snapshot().private_api_key, "");
    }

    #[test]
    fn stale_domain_lookup_is_discarded() {
        let store = store();
        let mut form = OnboardingForm::new(&store);

        form.change(Field::MailgunApiKey, "old");
        let first = form.blur(Field::MailgunApiKey, &store).expect("first");
        form.change(Field::MailgunApiKey, "new");
        let second = form.blur(Field::MailgunApiKey, &store).expect("second");

        assert!(form.apply_domains(&second, vec![SendingDomain::new("new.io")], &store));
        assert!(!form.apply_domains(&first, vec![SendingDomain::new("old.io")], &store));
        assert_eq!(form.domain_list(), &[SendingDomain::new("new.io")]);
    }

    #[test]
    fn submit_is_gated_per_provider() {
        let cases = [
            (
                EmailProvider::Sendgrid,
                [Field::SendgridApiKey, Field::SendgridFromEmail],
            ),
            (
                EmailProvider::Mailgun,
                [Field::SendingName, Field::SendingEmail],
            ),
            (
                EmailProvider::Free3,
                [Field::TestSendingName, Field::TestSendingEmail],
            ),
        ];

        for (provider, [first, second]) in cases {
            let store = store();
            let mut form = verified_form(&store);
            assert!(form.select_email_provider(provider));

            form.change(first, "filled");
            let blocked = form.prepare_submission().expect_err("second field empty");
            assert_eq!(blocked.provider, provider);
            assert_eq!(blocked.empty_fields, vec![second]);
            assert!(form.submit_blocked());

            form.change(second, "filled");
            form.blur(second, &store);
            assert!(!form.submit_blocked());
            assert!(form.prepare_submission().is_ok());
        }
    }

    #[test]
    fn blocked_submission_records_every_empty_field() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.select_email_provider(EmailProvider::Sendgrid);

        let blocked = form.prepare_submission().expect_err("blocked");
        assert_eq!(
            blocked.empty_fields,
            vec![Field::SendgridApiKey, Field::SendgridFromEmail]
        );
        assert_eq!(form.error(Field::SendgridApiKey), Some(EMPTY_FIELD_MESSAGE));
        assert_eq!(form.error(Field::SendgridFromEmail), Some(EMPTY_FIELD_MESSAGE));
        assert!(blocked.to_string().contains("sendgridApiKey"));
    }

    #[test]
    fn errors_outside_selected_provider_do_not_block() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.blur(Field::PosthogApiKey, &store);
        assert!(!form.submit_blocked());

        form.select_email_provider(EmailProvider::Mailgun);
        form.blur(Field::PosthogProjectId, &store);
        assert!(!form.submit_blocked());
    }

    #[test]
    fn switching_provider_clears_errors() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.select_email_provider(EmailProvider::Mailgun);
        form.blur(Field::SendingName, &store);
        form.blur(Field::PosthogApiKey, &store);
        assert!(form.submit_blocked());

        form.select_email_provider(EmailProvider::Sendgrid);
        assert_eq!(form.error(Field::SendingName), None);
        assert_eq!(form.error(Field::PosthogApiKey), None);
        assert!(!form.submit_blocked());
    }

    #[test]
    fn sandbox_requires_verification() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        assert!(!form.select_email_provider(EmailProvider::Free3));
        assert_eq!(form.email_provider(), None);

        let mut form = verified_form(&store);
        assert!(form.select_email_provider(EmailProvider::Free3));
        assert_eq!(form.email_provider(), Some(EmailProvider::Free3));
    }

    #[test]
    fn hydrate_keeps_local_values_over_empty_remote_ones() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.change(Field::PosthogApiKey, "local-key");

        form.hydrate(&AccountRecord {
            posthog_api_key: Some(String::new()),
            sending_name: Some("Acme".to_string()),
            ..AccountRecord::default()
        });

        assert_eq!(form.value(Field::SendingName), "Acme");
        assert_eq!(form.value(Field::PosthogApiKey), "local-key");
        assert_eq!(form.value(Field::PosthogHostUrl), "app.posthog.com");
    }

    #[test]
    fn hydrate_takes_key_domain_and_verification_unconditionally() {
        let store = InMemorySettingsStore::new(StoredSettings {
            domain_name: "stale.io".to_string(),
            ..StoredSettings::default()
        });
        let mut form = OnboardingForm::new(&store);
        form.change(Field::MailgunApiKey, "local");

        form.hydrate(&AccountRecord {
            slack_team_id: Some(vec!["T123".to_string()]),
            email_provider: Some("mailgun".to_string()),
            verified: Some(true),
            ..AccountRecord::default()
        });

        assert_eq!(form.value(Field::MailgunApiKey), "");
        assert_eq!(form.domain_name(), "");
        assert_eq!(form.value(Field::SlackId), "T123");
        assert_eq!(form.email_provider(), Some(EmailProvider::Mailgun));
        assert!(form.verified());
    }

    #[test]
    fn hydrate_ignores_unknown_email_provider() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.hydrate(&AccountRecord {
            email_provider: Some("smtp".to_string()),
            ..AccountRecord::default()
        });
        assert_eq!(form.email_provider(), None);
    }

    #[test]
    fn submission_payload_contains_non_empty_fields_domain_and_key() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.change(Field::PosthogHostUrl, "");
        form.settings.event_provider = None;
        form.change(Field::PosthogApiKey, "abc");
        form.select_domain("mail.acme.io".to_string());

        let patch = form.prepare_submission().expect("nothing required");
        let keys: Vec<&str> = patch.keys().collect();
        assert_eq!(keys, vec!["mailgunAPIKey", "posthogApiKey", "sendingDomain"]);
        assert_eq!(patch.get("sendingDomain"), Some("mail.acme.io"));
        assert_eq!(patch.get("mailgunAPIKey"), Some(""));
    }

    #[test]
    fn rejected_save_notifies_with_service_message() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.change(Field::SendingName, "Acme");
        let before = form.settings().clone();

        form.record_save_outcome(&SaveOutcome::Rejected {
            message: Some("Bad key".to_string()),
        });
        form.record_save_outcome(&SaveOutcome::Rejected { message: None });
        form.record_save_outcome(&SaveOutcome::Saved);

        let messages: Vec<String> = form
            .take_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["Bad key".to_string(), UNEXPECTED_ERROR.to_string()]);
        assert_eq!(form.settings(), &before);
    }

    #[test]
    fn options_reflect_verification() {
        let store = store();
        let form = OnboardingForm::new(&store);
        let sandbox = form
            .email_options()
            .into_iter()
            .find(|o| o.id == "free3")
            .expect("listed");
        assert!(sandbox.disabled);
        assert!(!form.event_options().is_empty());
    }

    #[test]
    fn video_modal_toggles() {
        let store = store();
        let mut form = OnboardingForm::new(&store);
        form.open_video();
        assert!(form.video_open());
        form.close_video();
        assert!(!form.video_open());
    }
}
