//! Main Leptos application component and routing.

use crate::pages::OnboardingPage;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use lodestar_core::{SendingDomain, SettingsStore, StoredSettings};

/// Application-wide settings shared between pages.
///
/// Holds the selected sending domain, the last Mailgun key used for a domain
/// lookup, and that lookup's result.
#[derive(Debug, Clone, Copy)]
pub struct SharedSettings(RwSignal<StoredSettings>);

impl SharedSettings {
    pub fn new() -> Self {
        Self(RwSignal::new(StoredSettings::default()))
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for SharedSettings {
    fn domain_name(&self) -> String {
        self.0.with_untracked(|settings| settings.domain_name.clone())
    }

    fn domains(&self) -> Vec<SendingDomain> {
        self.0.with_untracked(|settings| settings.domains.clone())
    }

    fn set_private_api_key(&self, key: &str) {
        self.0
            .update(|settings| settings.private_api_key = key.to_string());
    }

    fn set_domains(&self, domains: Vec<SendingDomain>) {
        self.0.update(|settings| settings.domains = domains);
    }
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(SharedSettings::new());

    view! {
        <Title text="lodestar"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=OnboardingPage/>
                    <Route path=path!("/onboarding") view=OnboardingPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Header component with the product name.
#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"lodestar"</a>
            </div>
        </header>
    }
}
