//! Core domain types for the lodestar onboarding page.
//!
//! This crate holds everything the page needs that does not touch the
//! network: the settings fields and provider catalog, the account wire
//! types, validation and sanitization, and the [`OnboardingForm`] state
//! machine. It compiles for both the server and the browser.

pub mod account;
pub mod error;
pub mod field;
pub mod form;
pub mod notification;
pub mod provider;
pub mod settings;
pub mod store;
pub mod validation;

pub use account::{AccountPatch, AccountRecord, SaveOutcome, SendingDomain};
pub use error::Result;
pub use field::{Field, FieldSpec, InputKind, ParseFieldError};
pub use form::{DomainLookup, OnboardingForm, SubmissionBlocked};
pub use notification::{
    Level, Notification, TOAST_OPTIONS, Toast, ToastOptions, ToastPlacement, ToastQueue,
};
pub use provider::{
    ChannelOption, EmailProvider, EventProvider, FormItem, IntegrationProvider, UnknownProvider,
};
pub use settings::IntegrationSettings;
pub use store::{SettingsStore, StoredSettings};
pub use validation::{EMPTY_FIELD_MESSAGE, FieldErrors, Sanitized, strip_spaces, validate};
