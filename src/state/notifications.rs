//! User-visible notification queue.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any flow can push here; `NotificationHost` renders the queue and arms
//! auto-close timers for entries that ask for one.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

/// Visual tone of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Error,
}

/// One notification entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Milliseconds until dismissal; `None` keeps it until closed.
    pub auto_close_ms: Option<u32>,
}

impl Notification {
    /// Error notification carrying the failure reason.
    #[must_use]
    pub fn error(title: &str, error: &impl std::fmt::Display, auto_close_ms: Option<u32>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: NotificationKind::Error,
            title: title.to_owned(),
            message: error.to_string(),
            auto_close_ms,
        }
    }
}

/// Queue of visible notifications, oldest first.
#[derive(Clone, Debug, Default)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
}

impl NotificationsState {
    pub fn push(&mut self, notification: Notification) {
        log::info!("notification: {} - {}", notification.title, notification.message);
        self.items.push(notification);
    }

    /// Remove a notification; unknown ids are ignored.
    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|n| n.id != id);
    }
}
