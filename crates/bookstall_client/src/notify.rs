//! User-facing notifications.
//!
//! The notifier is the single sink shared by the session manager and every
//! collection store. It holds at most one notification: publishing a new
//! one dismisses whatever was showing, so overlapping async operations never
//! stack conflicting banners.

use parking_lot::RwLock;

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// An ephemeral user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or error.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// The shared notification sink.
#[derive(Debug, Default)]
pub struct Notifier {
    current: RwLock<Option<Notification>>,
}

impl Notifier {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a notification, dismissing any previous one.
    pub fn publish(&self, notification: Notification) {
        *self.current.write() = Some(notification);
    }

    /// Returns the current notification without consuming it.
    pub fn current(&self) -> Option<Notification> {
        self.current.read().clone()
    }

    /// Consumes the current notification.
    pub fn take(&self) -> Option<Notification> {
        self.current.write().take()
    }

    /// Dismisses the current notification, if any.
    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_replaces_previous_notification() {
        let notifier = Notifier::new();
        notifier.publish(Notification::error("first"));
        notifier.publish(Notification::success("second"));

        let current = notifier.current().unwrap();
        assert_eq!(current.kind, NotificationKind::Success);
        assert_eq!(current.message, "second");
    }

    #[test]
    fn take_consumes() {
        let notifier = Notifier::new();
        notifier.publish(Notification::success("done"));
        assert!(notifier.take().is_some());
        assert!(notifier.take().is_none());
    }
}
