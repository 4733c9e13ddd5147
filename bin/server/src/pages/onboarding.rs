//! Onboarding page component and server functions.
//!
//! The page keeps an [`OnboardingForm`] in a signal and forwards every user
//! event to it; the form decides what changes, and the page only performs
//! the I/O the form asks for.

mod server;

pub use server::{get_account, get_slack_install_url, lookup_sending_domains, save_account_settings};

use crate::app::SharedSettings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lodestar_core::{
    ChannelOption, EmailProvider, EventProvider, Field, FieldSpec, FormItem, IntegrationProvider,
    OnboardingForm, SaveOutcome, TOAST_OPTIONS, Toast, ToastQueue,
};

const ONBOARDING_VIDEO_URL: &str = "https://www.loom.com/embed/be35f72bd1d04dc5a9c972d2b92c82f8";
const ADD_TO_SLACK_IMAGE: &str = "https://platform.slack-edge.com/img/add_to_slack.png";
const ADD_TO_SLACK_IMAGE_2X: &str = "https://platform.slack-edge.com/img/add_to_slack@2x.png";

/// Handles shared by the page's components.
#[derive(Clone, Copy)]
struct PageState {
    form: RwSignal<OnboardingForm>,
    store: SharedSettings,
    toasts: RwSignal<ToastQueue>,
}

impl PageState {
    fn new(store: SharedSettings) -> Self {
        Self {
            form: RwSignal::new(OnboardingForm::new(&store)),
            store,
            toasts: RwSignal::new(ToastQueue::default()),
        }
    }

    /// Moves queued notifications from the form onto the screen.
    fn flush_notifications(self) {
        let drained = self
            .form
            .try_update_untracked(OnboardingForm::take_notifications)
            .unwrap_or_default();

        let toasts = self.toasts;
        for notification in drained {
            let Some(id) = toasts.try_update(|queue| queue.push(notification)) else {
                return;
            };
            set_timeout(
                move || {
                    toasts.update(|queue| {
                        queue.dismiss(id);
                    });
                },
                TOAST_OPTIONS.auto_close,
            );
        }
    }

    fn change(self, field: Field, raw: String) {
        self.form.update(|form| form.change(field, &raw));
        self.flush_notifications();
    }

    fn blur(self, field: Field) {
        let store = self.store;
        let lookup = self
            .form
            .try_update(|form| form.blur(field, &store))
            .flatten();

        let Some(lookup) = lookup else {
            return;
        };

        let form = self.form;
        spawn_local(async move {
            // A failed lookup leaves the previous list in place.
            if let Ok(domains) = lookup_sending_domains(lookup.api_key.clone()).await {
                form.update(|form| {
                    form.apply_domains(&lookup, domains, &store);
                });
            }
        });
    }

    fn submit(self) {
        let Some(Ok(patch)) = self.form.try_update(OnboardingForm::prepare_submission) else {
            return;
        };

        spawn_local(async move {
            let outcome = match serde_json::to_string(&patch) {
                Ok(payload_json) => SaveOutcome::settle(save_account_settings(payload_json).await),
                Err(e) => SaveOutcome::settle(Err(e)),
            };
            self.form.update(|form| form.record_save_outcome(&outcome));
            self.flush_notifications();
        });
    }
}

/// Onboarding page.
#[component]
pub fn OnboardingPage() -> impl IntoView {
    let store = use_context::<SharedSettings>().unwrap_or_default();
    let state = PageState::new(store);
    let form = state.form;

    let install_url = Resource::new(|| (), |_| get_slack_install_url());
    let account = Resource::new(|| (), |_| get_account());

    // Failures leave the defaults in place; the server logs them.
    Effect::new(move || {
        if let Some(Ok(url)) = install_url.get() {
            form.update(|form| form.set_slack_install_url(url));
        }
    });
    Effect::new(move || {
        if let Some(Ok(record)) = account.get() {
            form.update(|form| form.hydrate(&record));
        }
    });

    let email_provider = Memo::new(move |_| form.with(|form| form.email_provider()));
    let event_provider = Memo::new(move |_| form.with(|form| form.event_provider()));

    view! {
        <div class="onboarding-page">
            <div class="onboarding-header">
                <h1>"Onboarding"</h1>
                <button class="video-button" on:click=move |_| form.update(OnboardingForm::open_video)>
                    "Check Out Onboarding Video"
                </button>
            </div>

            <section class="onboarding-section">
                <h2>"Email"</h2>
                <p>"Add an email sending service to automatically send emails to your customers."</p>
                <ProviderChooser
                    name="email-provider"
                    options=Signal::derive(move || form.with(|form| form.email_options()))
                    selected=Signal::derive(move || email_provider.get().map(IntegrationProvider::id))
                    on_select=Callback::new(move |id: &'static str| {
                        if let Ok(provider) = id.parse::<EmailProvider>() {
                            form.update(|form| {
                                form.select_email_provider(provider);
                            });
                        }
                    })
                />
                {move || email_provider.get().map(|provider| view! {
                    <ProviderForm state=state heading=provider.heading() items=provider.form_items()/>
                })}
                <div class="form-actions">
                    <button
                        class="save-button"
                        disabled=move || form.with(OnboardingForm::submit_blocked)
                        on:click=move |_| state.submit()
                    >
                        "Save"
                    </button>
                </div>
            </section>

            <section class="onboarding-section">
                <h2>"Slack"</h2>
                <p>"Install the lodestar Slack App to automatically send triggered Slack messages to your customers."</p>
                <SlackInstall state=state/>
            </section>

            <section class="onboarding-section">
                <h2>"Events"</h2>
                <p>"Configure your event provider to send event data to lodestar so you can send triggered messages."</p>
                <ProviderChooser
                    name="event-provider"
                    options=Signal::derive(move || form.with(|form| form.event_options()))
                    selected=Signal::derive(move || event_provider.get().map(IntegrationProvider::id))
                    on_select=Callback::new(move |id: &'static str| {
                        if let Ok(provider) = id.parse::<EventProvider>() {
                            form.update(|form| form.select_event_provider(provider));
                        }
                    })
                />
                {move || event_provider.get().map(|provider| view! {
                    <ProviderForm state=state heading=provider.heading() items=provider.form_items()/>
                    <div class="form-actions">
                        <button class="save-button" on:click=move |_| state.submit()>"Save"</button>
                    </div>
                })}
            </section>

            <VideoModal state=state/>
            <ToastStack toasts=state.toasts/>
        </div>
    }
}

/// Row of selectable provider cards.
#[component]
fn ProviderChooser(
    name: &'static str,
    options: Signal<Vec<ChannelOption>>,
    selected: Signal<Option<&'static str>>,
    on_select: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <div class="provider-chooser" role="radiogroup" aria-label=name>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let id = option.id;
                        let is_selected = move || selected.get() == Some(id);
                        view! {
                            <button
                                type="button"
                                role="radio"
                                class="provider-option"
                                class:selected=is_selected
                                aria-checked=move || is_selected().to_string()
                                disabled=option.disabled
                                title=option.tooltip.unwrap_or_default()
                                on:click=move |_| on_select.run(id)
                            >
                                {option.title}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Sub-form for the selected provider.
#[component]
fn ProviderForm(
    state: PageState,
    heading: String,
    items: &'static [FormItem],
) -> impl IntoView {
    view! {
        <div class="provider-form">
            <h3>{heading}</h3>
            {items
                .iter()
                .map(|item| match *item {
                    FormItem::Input(spec) => view! { <TextField state=state spec=spec/> }.into_any(),
                    FormItem::DomainSelect => view! { <DomainSelect state=state/> }.into_any(),
                })
                .collect_view()}
        </div>
    }
}

/// Text input bound to one settings field.
#[component]
fn TextField(state: PageState, spec: FieldSpec) -> impl IntoView {
    let form = state.form;
    let field = spec.field;
    let id = field.key();
    let error = move || form.with(|form| form.error(field).map(str::to_string));
    let suffix = move || {
        form.with(|form| {
            form.email_provider()
                .and_then(|provider| provider.sending_suffix(field, form.domain_name()))
        })
    };

    view! {
        <div class="form-field" class:has-error=move || error().is_some()>
            <label for=id>
                {spec.label}
                {spec.required.then(|| view! { <span class="required-mark">" *"</span> })}
            </label>
            <div class="input-row">
                <input
                    id=id
                    name=id
                    type=spec.kind.as_html()
                    placeholder=spec.placeholder.unwrap_or_default()
                    required=spec.required
                    prop:value=move || form.with(|form| form.value(field).to_string())
                    on:input=move |ev| state.change(field, event_target_value(&ev))
                    on:blur=move |_| state.blur(field)
                />
                {move || suffix().map(|suffix| view! { <span class="input-suffix">{suffix}</span> })}
            </div>
            {move || error().map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}

/// Sending-domain selector fed by the Mailgun domain lookup.
#[component]
fn DomainSelect(state: PageState) -> impl IntoView {
    let form = state.form;
    let domains = Memo::new(move |_| form.with(|form| form.domain_list().to_vec()));
    let current = Memo::new(move |_| form.with(|form| form.domain_name().to_string()));

    view! {
        <div class="form-field">
            <label for="sendingDomain">"Domain"</label>
            <select
                id="sendingDomain"
                name="sendingDomain"
                class="domain-select"
                prop:value=move || current.get()
                on:change=move |ev| {
                    let name = event_target_value(&ev);
                    form.update(|form| form.select_domain(name));
                }
            >
                <option value="" disabled=true>"Select a sending domain"</option>
                {move || {
                    domains
                        .get()
                        .into_iter()
                        .map(|domain| {
                            let selected = domain.name == current.get_untracked();
                            view! {
                                <option value=domain.name.clone() selected=selected>
                                    {domain.name.clone()}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

/// Slack install button and the connected workspace, if any.
#[component]
fn SlackInstall(state: PageState) -> impl IntoView {
    let form = state.form;
    let href = move || form.with(|form| form.slack_install_url().to_string());
    let slack_id = move || form.with(|form| form.value(Field::SlackId).to_string());

    view! {
        <div class="slack-install">
            <a href=href target="_blank" rel="noreferrer noopener" class="slack-install-link">
                <img
                    alt="Add to Slack"
                    height="40"
                    width="139"
                    src=ADD_TO_SLACK_IMAGE
                    srcset=format!("{ADD_TO_SLACK_IMAGE} 1x, {ADD_TO_SLACK_IMAGE_2X} 2x")
                />
            </a>
            {move || {
                let id = slack_id();
                (!id.is_empty()).then(|| view! {
                    <p class="slack-connected">"Connected workspace: " {id}</p>
                })
            }}
        </div>
    }
}

/// Modal with the embedded onboarding video.
#[component]
fn VideoModal(state: PageState) -> impl IntoView {
    let form = state.form;
    let open = Memo::new(move |_| form.with(OnboardingForm::video_open));
    let close = move |_: leptos::ev::MouseEvent| form.update(OnboardingForm::close_video);

    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=close>
                <div class="modal video-modal" on:click=|ev| ev.stop_propagation()>
                    <button class="modal-close" aria-label="Close" on:click=close>"×"</button>
                    <iframe
                        src=ONBOARDING_VIDEO_URL
                        title="Onboarding video"
                        allowfullscreen=true
                        class="video-frame"
                    ></iframe>
                </div>
            </div>
        </Show>
    }
}

/// Transient notifications; a click dismisses one early.
#[component]
fn ToastStack(toasts: RwSignal<ToastQueue>) -> impl IntoView {
    let stack_class = format!("toast-stack {}", TOAST_OPTIONS.placement.css_class());

    view! {
        <div class=stack_class aria-live="polite">
            <For
                each=move || toasts.with(|queue| queue.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let class = format!("toast {}", toast.notification.level.css_class());
                    view! {
                        <div
                            class=class
                            role="alert"
                            on:click=move |_| {
                                if TOAST_OPTIONS.close_on_click {
                                    toasts.update(|queue| {
                                        queue.dismiss(id);
                                    });
                                }
                            }
                        >
                            {toast.notification.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
