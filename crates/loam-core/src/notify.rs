//! Notification surface contract
//!
//! The engine never draws UI; conflict outcomes are expressed as signals
//! published through a host-provided sink. Two kinds exist: transient notices
//! that auto-dismiss, and blocking warnings the user must acknowledge.

use std::sync::Mutex;

/// How a notification demands the user's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Non-blocking toast; auto-dismisses
    Transient,
    /// Modal warning; requires explicit dismissal
    Blocking,
}

/// A user-facing signal raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Attention level
    pub kind: NotificationKind,
    /// Message shown to the user
    pub message: String,
}

impl Notification {
    /// Build a non-blocking transient notice.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Transient,
            message: message.into(),
        }
    }

    /// Build a blocking, acknowledgment-required warning.
    #[must_use]
    pub fn blocking(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Blocking,
            message: message.into(),
        }
    }
}

/// Host-provided sink the engine publishes signals through.
pub trait NotificationSink: Send + Sync {
    /// Deliver one signal to the user.
    fn publish(&self, notification: Notification);
}

/// Sink that records published signals in memory.
///
/// Used by the engine's tests and by headless hosts that poll for signals
/// instead of rendering them immediately.
#[derive(Debug, Default)]
pub struct CollectingSink {
    published: Mutex<Vec<Notification>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything published so far.
    pub fn take(&self) -> Vec<Notification> {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::take(&mut *published)
    }
}

impl NotificationSink for CollectingSink {
    fn publish(&self, notification: Notification) {
        self.published
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_drains_in_order() {
        let sink = CollectingSink::new();
        sink.publish(Notification::transient("first"));
        sink.publish(Notification::blocking("second"));

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].kind, NotificationKind::Transient);
        assert_eq!(taken[1].kind, NotificationKind::Blocking);
        assert!(sink.take().is_empty());
    }
}
