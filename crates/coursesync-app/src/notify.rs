//! User-facing notifications
//!
//! Every settled action produces at most one [`Notification`]. How it is shown
//! is up to the [`Notifier`] the engine was built with.

use serde::Serialize;

use coursesync_core::prelude::*;

/// Message body of every success notification.
pub const SUCCESS_MESSAGE: &str = "Yay";

/// Message body of every failure notification.
pub const FAILURE_MESSAGE: &str = "Please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Sink for user-facing notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Success => info!("{}: {}", notification.title, notification.message),
            Severity::Error => warn!("{}: {}", notification.title, notification.message),
        }
    }
}
