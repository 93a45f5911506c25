//! User-facing notifications (toasts)

use std::time::{Duration, Instant};

/// Visual variant of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Neutral/success styling.
    #[default]
    Success,
    /// Error styling.
    Destructive,
}

/// A one-shot message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Short heading.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
    /// Styling.
    pub variant: Variant,
}

impl Notification {
    /// Shown after a successful save.
    pub const UPDATED: Self = Self {
        title: "Success",
        description: "Model preferences updated.",
        variant: Variant::Success,
    };

    /// Shown after a failed save.
    pub const UPDATE_FAILED: Self = Self {
        title: "Error",
        description: "Failed to update model preferences.",
        variant: Variant::Destructive,
    };

    /// Shown after a successful reset.
    pub const RESET: Self = Self {
        title: "Success",
        description: "Model preferences reset to default.",
        variant: Variant::Success,
    };

    /// Shown after a failed reset.
    pub const RESET_FAILED: Self = Self {
        title: "Error",
        description: "Failed to reset model preferences.",
        variant: Variant::Destructive,
    };
}

/// Receives notifications emitted by the panel.
pub trait NotificationSink {
    /// Deliver one notification.
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Time-limited toast stack rendered by the TUI.
#[derive(Debug, Clone)]
pub struct Toasts {
    ttl: Duration,
    active: Vec<(Notification, Instant)>,
}

impl Toasts {
    /// Create an empty stack whose toasts live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            active: Vec::new(),
        }
    }

    /// Drop toasts older than the configured lifetime.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.active
            .retain(|(_, shown_at)| now.saturating_duration_since(*shown_at) < ttl);
    }

    /// Dismiss every toast.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Visible toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().map(|(notification, _)| notification)
    }

    /// Number of visible toasts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no toast is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        self.active.push((notification, now));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl NotificationSink for Toasts {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}
