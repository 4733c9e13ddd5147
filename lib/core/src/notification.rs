//! Transient user notifications raised by the onboarding form.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shown when spaces were stripped from an input.
pub const SPACES_NOT_ALLOWED: &str = "Value should not contain spaces!";

/// Shown when saving failed without an explanation from the service.
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// How long a notification stays on screen.
pub const AUTO_CLOSE: Duration = Duration::from_secs(5);

/// Where the toast stack sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPlacement {
    BottomCenter,
}

impl ToastPlacement {
    /// CSS modifier class for the toast stack.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            ToastPlacement::BottomCenter => "toast-stack-bottom-center",
        }
    }
}

/// Display options shared by every toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastOptions {
    pub placement: ToastPlacement,
    pub auto_close: Duration,
    /// Whether clicking a toast dismisses it.
    pub close_on_click: bool,
}

/// The options every onboarding toast is shown with.
pub const TOAST_OPTIONS: ToastOptions = ToastOptions {
    placement: ToastPlacement::BottomCenter,
    auto_close: AUTO_CLOSE,
    close_on_click: true,
};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    /// CSS modifier class for the toast.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Level::Warning => "toast-warning",
            Level::Error => "toast-error",
        }
    }
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Notification for a failed save.
    ///
    /// Uses the service's message verbatim when present and non-empty.
    #[must_use]
    pub fn save_failed(message: Option<&str>) -> Self {
        match message {
            Some(message) if !message.is_empty() => Self::error(message),
            _ => Self::error(UNEXPECTED_ERROR),
        }
    }
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Toasts currently shown, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Shows `notification` and returns the id of its toast.
    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, notification });
        id
    }

    /// Removes a toast; returns whether it was still shown.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
