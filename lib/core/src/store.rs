//! Shared settings store capability.
//!
//! The onboarding form reads the current sending domain from, and writes
//! the Mailgun key and looked-up domains into, state shared with the rest
//! of the application. The store is injected so the form's effects stay
//! explicit.

use crate::account::SendingDomain;
#[cfg(test)]
use std::sync::{PoisonError, RwLock};

/// Application-wide settings shared across pages.
pub trait SettingsStore {
    /// The currently selected sending domain, or an empty string.
    fn domain_name(&self) -> String;

    /// Domains from the most recent successful lookup.
    fn domains(&self) -> Vec<SendingDomain>;

    /// Remembers the Mailgun key used for domain lookups.
    fn set_private_api_key(&self, key: &str);

    /// Caches the result of a domain lookup.
    fn set_domains(&self, domains: Vec<SendingDomain>);
}

/// Plain values held by a settings store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSettings {
    pub domain_name: String,
    pub private_api_key: String,
    pub domains: Vec<SendingDomain>,
}

/// Thread-safe in-process [`SettingsStore`] for exercising the form.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct InMemorySettingsStore {
    inner: RwLock<StoredSettings>,
}

#[cfg(test)]
impl InMemorySettingsStore {
    pub(crate) fn new(initial: StoredSettings) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Copy of the current contents.
    pub(crate) fn snapshot(&self) -> StoredSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, update: impl FnOnce(&mut StoredSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut guard);
    }
}

#[cfg(test)]
impl SettingsStore for InMemorySettingsStore {
    fn domain_name(&self) -> String {
        self.snapshot().domain_name
    }

    fn domains(&self) -> Vec<SendingDomain> {
        self.snapshot().domains
    }

    fn set_private_api_key(&self, key: &str) {
        self.write(|settings| settings.private_api_key = key.to_string());
    }

    fn set_domains(&self, domains: Vec<SendingDomain>) {
        self.write(|settings| settings.domains = domains);
    }
}
