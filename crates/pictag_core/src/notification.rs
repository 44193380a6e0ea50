//! Toast notifications.
//!
//! At most one notification is visible at a time. Showing a new one replaces
//! whatever is on screen; each one slides out after a fixed dwell.

use std::time::Duration;

use crate::constants::{NOTIFICATION_DWELL, NOTIFICATION_EXIT};

/// Notification severity, which picks the icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Icon shown next to the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ️",
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
        }
    }

    /// Lowercase name used in CSS class names.
    pub fn name(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    /// Full class attribute for the notification element.
    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.name())
    }
}

/// A notification ready to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier used to match the expiry timer to this notification
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Time on screen before the exit transition starts.
    pub fn dwell(&self) -> Duration {
        NOTIFICATION_DWELL
    }

    /// Time from the start of the exit transition until removal.
    pub fn exit(&self) -> Duration {
        NOTIFICATION_EXIT
    }

    /// Total lifetime from display to removal.
    pub fn lifetime(&self) -> Duration {
        self.dwell() + self.exit()
    }
}

/// Tracks which notification is currently on screen.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing with a new notification.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            kind,
        };
        match kind {
            NotificationKind::Error => log::warn!("Notify [{}]: {}", kind.name(), notification.message),
            _ => log::info!("Notify [{}]: {}", kind.name(), notification.message),
        }
        self.current = Some(notification.clone());
        notification
    }

    /// Called when a notification's lifetime ends.
    /// Returns false if that notification was already replaced.
    pub fn expire(&mut self, id: u64) -> bool {
        match &self.current {
            Some(current) if current.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The notification on screen, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_presentation() {
        assert_eq!(NotificationKind::Success.icon(), "✅");
        assert_eq!(NotificationKind::Error.icon(), "❌");
        assert_eq!(NotificationKind::Info.icon(), "ℹ️");
        assert_eq!(
            NotificationKind::Error.class_name(),
            "notification notification-error"
        );
    }

    #[test]
    fn test_new_notification_replaces_current() {
        let mut center = NotificationCenter::new();
        let first = center.notify("one", NotificationKind::Info);
        let second = center.notify("two", NotificationKind::Success);

        assert_ne!(first.id, second.id);
        assert_eq!(center.current(), Some(&second));
    }

    #[test]
    fn test_expiry_of_replaced_notification_is_ignored() {
        let mut center = NotificationCenter::new();
        let first = center.notify("one", NotificationKind::Info);
        let second = center.notify("two", NotificationKind::Info);

        assert!(!center.expire(first.id));
        assert_eq!(center.current(), Some(&second));

        assert!(center.expire(second.id));
        assert!(center.current().is_none());
    }

    #[test]
    fn test_timings() {
        let mut center = NotificationCenter::new();
        let n = center.notify("hello", NotificationKind::Info);
        assert_eq!(n.dwell(), Duration::from_millis(3000));
        assert_eq!(n.exit(), Duration::from_millis(300));
        assert_eq!(n.lifetime(), Duration::from_millis(3300));
    }
}
