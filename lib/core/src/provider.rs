//! Provider catalog for the email and event integration categories.
//!
//! Each provider is a closed enum variant carrying its own form schema, so
//! the page never looks up fields by provider name at runtime.

use crate::field::{Field, FieldSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain the sandbox provider sends from.
pub const SANDBOX_SENDING_DOMAIN: &str = "lodestar-test.com";

/// Tooltip shown on the sandbox option while the account is unverified.
pub const VERIFY_EMAIL_TOOLTIP: &str = "You need to verify your email";

/// Error returned when a provider id is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider {
    /// The provider category ("email" or "event").
    pub category: &'static str,
    /// The id that failed to parse.
    pub id: String,
}

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} provider '{}'", self.category, self.id)
    }
}

impl std::error::Error for UnknownProvider {}

/// One element of a provider sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItem {
    /// A text input bound to a settings field.
    Input(FieldSpec),
    /// The sending-domain selector fed by the domain lookup.
    DomainSelect,
}

/// Common interface of the provider enums.
pub trait IntegrationProvider: Copy + Eq + 'static {
    /// Wire id of the provider.
    fn id(self) -> &'static str;

    /// Ordered sub-form schema for this provider.
    fn form_items(self) -> &'static [FormItem];

    /// Heading shown above the sub-form, e.g. "Mailgun Configuration".
    fn heading(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => format!("{}{} Configuration", first.to_uppercase(), chars.as_str()),
            None => "Configuration".to_string(),
        }
    }
}

/// Mutually exclusive transactional-mail integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Sandbox provider, available once the account is verified.
    Free3,
    /// Default mail relay.
    Mailgun,
    Sendgrid,
}

const MAILGUN_FORM: [FormItem; 4] = [
    FormItem::Input(
        FieldSpec::text(Field::MailgunApiKey, "Private API Key")
            .placeholder("****")
            .password()
            .required(),
    ),
    FormItem::DomainSelect,
    FormItem::Input(FieldSpec::text(Field::SendingName, "Sending name")),
    FormItem::Input(FieldSpec::text(Field::SendingEmail, "Sending email")),
];

const FREE3_FORM: [FormItem; 2] = [
    FormItem::Input(FieldSpec::text(Field::TestSendingName, "Sending name")),
    FormItem::Input(FieldSpec::text(Field::TestSendingEmail, "Sending email")),
];

const SENDGRID_FORM: [FormItem; 2] = [
    FormItem::Input(
        FieldSpec::text(Field::SendgridApiKey, "Private sendgrid API Key")
            .placeholder("****")
            .password()
            .required(),
    ),
    FormItem::Input(
        FieldSpec::text(Field::SendgridFromEmail, "Sendgrid email")
            .placeholder("your.email@sendgrid.com")
            .required(),
    ),
];

impl EmailProvider {
    /// Fields that must be non-empty before settings for this provider are saved.
    #[must_use]
    pub const fn required_fields(self) -> &'static [Field] {
        match self {
            EmailProvider::Free3 => &[Field::TestSendingEmail, Field::TestSendingName],
            EmailProvider::Mailgun => &[Field::SendingName, Field::SendingEmail],
            EmailProvider::Sendgrid => &[Field::SendgridApiKey, Field::SendgridFromEmail],
        }
    }

    /// Returns the display suffix appended to `field` for this provider.
    ///
    /// Only the sending-email inputs carry a suffix, and only once a sending
    /// domain has been chosen.
    #[must_use]
    pub fn sending_suffix(self, field: Field, domain_name: &str) -> Option<String> {
        if domain_name.is_empty() {
            return None;
        }
        match (self, field) {
            (EmailProvider::Mailgun, Field::SendingEmail) => Some(format!("@{domain_name}")),
            (EmailProvider::Free3, Field::TestSendingEmail) => {
                Some(format!("@{SANDBOX_SENDING_DOMAIN}"))
            }
            _ => None,
        }
    }
}

impl IntegrationProvider for EmailProvider {
    fn id(self) -> &'static str {
        match self {
            EmailProvider::Free3 => "free3",
            EmailProvider::Mailgun => "mailgun",
            EmailProvider::Sendgrid => "sendgrid",
        }
    }

    fn form_items(self) -> &'static [FormItem] {
        match self {
            EmailProvider::Free3 => &FREE3_FORM,
            EmailProvider::Mailgun => &MAILGUN_FORM,
            EmailProvider::Sendgrid => &SENDGRID_FORM,
        }
    }
}

impl FromStr for EmailProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free3" => Ok(EmailProvider::Free3),
            "mailgun" => Ok(EmailProvider::Mailgun),
            "sendgrid" => Ok(EmailProvider::Sendgrid),
            _ => Err(UnknownProvider {
                category: "email",
                id: s.to_string(),
            }),
        }
    }
}

/// Analytics/event-ingestion integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventProvider {
    Posthog,
}

const POSTHOG_FORM: [FormItem; 5] = [
    FormItem::Input(
        FieldSpec::text(Field::PosthogApiKey, "Private API Key")
            .placeholder("****")
            .required(),
    ),
    FormItem::Input(
        FieldSpec::text(Field::PosthogProjectId, "Project Id")
            .placeholder("****")
            .required(),
    ),
    FormItem::Input(
        FieldSpec::text(Field::PosthogHostUrl, "Posthog Url")
            .placeholder("https://app.posthog.com")
            .required(),
    ),
    FormItem::Input(
        FieldSpec::text(
            Field::PosthogSmsKey,
            "Name of SMS / Phone number field on your Posthog person",
        )
        .placeholder("$phoneNumber")
        .required(),
    ),
    FormItem::Input(
        FieldSpec::text(
            Field::PosthogEmailKey,
            "Name of Email address field on your Posthog person",
        )
        .placeholder("$email")
        .required(),
    ),
];

impl IntegrationProvider for EventProvider {
    fn id(self) -> &'static str {
        match self {
            EventProvider::Posthog => "posthog",
        }
    }

    fn form_items(self) -> &'static [FormItem] {
        match self {
            EventProvider::Posthog => &POSTHOG_FORM,
        }
    }
}

impl FromStr for EventProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posthog" => Ok(EventProvider::Posthog),
            _ => Err(UnknownProvider {
                category: "event",
                id: s.to_string(),
            }),
        }
    }
}

/// A selectable entry in a provider chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    pub id: &'static str,
    pub title: &'static str,
    pub disabled: bool,
    pub tooltip: Option<&'static str>,
}

/// Email channels offered by the chooser.
pub const EMAIL_CHANNELS: [ChannelOption; 3] = [
    ChannelOption {
        id: "mailgun",
        title: "Mailgun",
        disabled: false,
        tooltip: None,
    },
    ChannelOption {
        id: "sendgrid",
        title: "Sendgrid",
        disabled: false,
        tooltip: None,
    },
    ChannelOption {
        id: "free3",
        title: "Free 3 emails (sandbox)",
        disabled: false,
        tooltip: None,
    },
];

/// Event channels offered by the chooser.
pub const EVENT_CHANNELS: [ChannelOption; 3] = [
    ChannelOption {
        id: "posthog",
        title: "Posthog",
        disabled: false,
        tooltip: None,
    },
    ChannelOption {
        id: "segment",
        title: "Segment",
        disabled: true,
        tooltip: Some("Coming soon"),
    },
    ChannelOption {
        id: "rudderstack",
        title: "Rudderstack",
        disabled: true,
        tooltip: Some("Coming soon"),
    },
];

/// Email channels with the verification gate applied to the sandbox.
#[must_use]
pub fn email_channels(verified: bool) -> Vec<ChannelOption> {
    EMAIL_CHANNELS
        .into_iter()
        .map(|option| {
            if option.id == EmailProvider::Free3.id() && !verified {
                ChannelOption {
                    disabled: true,
                    tooltip: Some(VERIFY_EMAIL_TOOLTIP),
                    ..option
                }
            } else {
                option
            }
        })
        .collect()
}

/// Event channels as offered by the chooser.
#[must_use]
pub fn event_channels() -> Vec<ChannelOption> {
    EVENT_CHANNELS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(items: &[FormItem]) -> Vec<Field> {
        items
            .iter()
            .filter_map(|item| match item {
                FormItem::Input(spec) => Some(spec.field),
                FormItem::DomainSelect => None,
            })
            .collect()
    }

    #[test]
    fn required_fields_per_provider() {
        assert_eq!(
            EmailProvider::Sendgrid.required_fields(),
            &[Field::SendgridApiKey, Field::SendgridFromEmail]
        );
        assert_eq!(
            EmailProvider::Mailgun.required_fields(),
            &[Field::SendingName, Field::SendingEmail]
        );
        assert_eq!(
            EmailProvider::Free3.required_fields(),
            &[Field::TestSendingEmail, Field::TestSendingName]
        );
    }

    #[test]
    fn every_required_field_is_rendered() {
        for provider in [
            EmailProvider::Free3,
            EmailProvider::Mailgun,
            EmailProvider::Sendgrid,
        ] {
            let rendered = inputs(provider.form_items());
            for field in provider.required_fields() {
                assert!(rendered.contains(field), "{provider:?} misses {field}");
            }
        }
    }

    #[test]
    fn mailgun_form_has_key_then_domain_selector() {
        let items = EmailProvider::Mailgun.form_items();
        assert!(matches!(items[0], FormItem::Input(spec) if spec.field == Field::MailgunApiKey));
        assert_eq!(items[1], FormItem::DomainSelect);
    }

    #[test]
    fn posthog_form_has_five_inputs() {
        assert_eq!(inputs(EventProvider::Posthog.form_items()).len(), 5);
    }

    #[test]
    fn ids_round_trip_and_unknown_ids_fail() {
        assert_eq!("mailgun".parse(), Ok(EmailProvider::Mailgun));
        assert_eq!("posthog".parse(), Ok(EventProvider::Posthog));
        let err = "smtp".parse::<EmailProvider>().expect_err("unknown");
        assert_eq!(err.to_string(), "unknown email provider 'smtp'");
    }

    #[test]
    fn heading_capitalizes_id() {
        assert_eq!(EmailProvider::Mailgun.heading(), "Mailgun Configuration");
        assert_eq!(EmailProvider::Free3.heading(), "Free3 Configuration");
        assert_eq!(EventProvider::Posthog.heading(), "Posthog Configuration");
    }

    #[test]
    fn sending_suffix_requires_domain() {
        assert_eq!(
            EmailProvider::Mailgun.sending_suffix(Field::SendingEmail, ""),
            None
        );
        assert_eq!(
            EmailProvider::Mailgun.sending_suffix(Field::SendingEmail, "mail.acme.io"),
            Some("@mail.acme.io".to_string())
        );
        assert_eq!(
            EmailProvider::Free3.sending_suffix(Field::TestSendingEmail, "mail.acme.io"),
            Some(format!("@{SANDBOX_SENDING_DOMAIN}"))
        );
        assert_eq!(
            EmailProvider::Mailgun.sending_suffix(Field::SendingName, "mail.acme.io"),
            None
        );
    }

    #[test]
    fn sandbox_option_is_gated_on_verification() {
        let unverified = email_channels(false);
        let sandbox = unverified
            .iter()
            .find(|o| o.id == "free3")
            .expect("sandbox listed");
        assert!(sandbox.disabled);
        assert_eq!(sandbox.tooltip, Some(VERIFY_EMAIL_TOOLTIP));

        let verified = email_channels(true);
        let sandbox = verified
            .iter()
            .find(|o| o.id == "free3")
            .expect("sandbox listed");
        assert!(!sandbox.disabled);
        assert_eq!(sandbox.tooltip, None);
    }

    #[test]
    fn only_posthog_event_channel_is_enabled() {
        let enabled: Vec<_> = event_channels()
            .into_iter()
            .filter(|o| !o.disabled)
            .map(|o| o.id)
            .collect();
        assert_eq!(enabled, vec!["posthog"]);
    }
}
