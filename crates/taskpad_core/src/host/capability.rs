//! Host capability object and notification contract.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Title used for reminder notifications.
pub const REMINDER_NOTIFICATION_TITLE: &str = "Task Reminder";

/// Whether the host allowed desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationCapability {
    pub granted: bool,
}

/// Everything the core needs to know about its host, queried once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostCapabilities {
    pub notifications: NotificationCapability,
    /// Fallback theme when no preference was ever saved.
    pub system_prefers_dark: bool,
}

impl HostCapabilities {
    pub fn new(notifications_granted: bool, system_prefers_dark: bool) -> Self {
        Self {
            notifications: NotificationCapability {
                granted: notifications_granted,
            },
            system_prefers_dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification dispatch failed: {}", self.0)
    }
}

impl Error for NotifyError {}

/// Host desktop-notification dispatch.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        (**self).notify(title, body)
    }
}

impl<T: Notifier + ?Sized> Notifier for Rc<T> {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        (**self).notify(title, body)
    }
}

/// Notifier for hosts without a notification subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
