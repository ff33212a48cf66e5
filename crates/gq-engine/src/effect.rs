//! Notifications emitted alongside state changes.
//!
//! Notifications are fire-and-forget. The engine hands them to a
//! [`NotificationSink`] and never waits on or inspects the result.

use std::fmt;

/// Tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something worked.
    Success,
    /// Something was rejected or not understood.
    Failure,
    /// Neutral information.
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Tone.
    pub kind: NotificationKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub detail: String,
}

impl Notification {
    /// A success notification.
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// A failure notification.
    pub fn failure(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// An informational notification.
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

/// Receives notifications.
pub trait NotificationSink {
    /// Deliver one notification.
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order. Handy for tests and batch callers.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
