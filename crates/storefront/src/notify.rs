//! User-facing notifications as a typed channel.
//!
//! Components report outcomes through a [`NotificationSink`] instead of
//! stringly-tagged callbacks, so consumers match on variants rather than
//! comparing tag strings.

use std::sync::Mutex;

/// A notification to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// An operation succeeded (e.g., item added, order placed).
    Success(String),
    /// An operation failed in a way the user should see.
    Error(String),
    /// Informational feedback (e.g., quantity updated).
    Info(String),
}

impl Notification {
    /// The notification's message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) | Self::Info(msg) => msg,
        }
    }

    /// Whether this is an error notification.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Receives notifications emitted by the cart engine and auth service.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Implementations decide presentation; dropping
    /// it is acceptable.
    fn notify(&self, notification: Notification);
}

/// Default sink: forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::Success(msg) => tracing::info!(kind = "success", "{msg}"),
            Notification::Info(msg) => tracing::info!(kind = "info", "{msg}"),
            Notification::Error(msg) => tracing::warn!(kind = "error", "{msg}"),
        }
    }
}

/// Sink that records every notification, for asserting on side effects in
/// tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drop everything received so far.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.received.lock() {
            guard.clear();
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_accessor() {
        assert_eq!(Notification::Success("ok".into()).message(), "ok");
        assert_eq!(Notification::Error("bad".into()).message(), "bad");
        assert!(Notification::Error("bad".into()).is_error());
        assert!(!Notification::Info("hm".into()).is_error());
    }

    #[test]
    fn test_recording_sink_records_in_order() {
        let sink = RecordingSink::new();
        sink.notify(Notification::Info("first".into()));
        sink.notify(Notification::Error("second".into()));

        let received = sink.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], Notification::Info("first".into()));
        assert_eq!(received[1], Notification::Error("second".into()));

        sink.clear();
        assert!(sink.received().is_empty());
    }
}
