//! Actions emitted by a screen controller for the presentation layer.
//!
//! The controller never renders anything itself. After each event it returns a
//! `Vec<Action>` describing what the user should see: a toast-style
//! notification, or the form dialog opening or closing.

use crate::form::FormMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, "Error", message)
    }

    fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Side effects for the presentation layer to carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a notification.
    Notify(Notification),

    /// Show the record form in the given mode.
    OpenForm(FormMode),

    /// Hide the record form.
    CloseForm,
}
