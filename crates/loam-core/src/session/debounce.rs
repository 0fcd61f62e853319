//! Fixed-delay single-shot debounce
//!
//! Not real concurrency: the engine is single-threaded and cooperative, so a
//! debounce is just a deadline that resets on every new mutation and fires at
//! most once when polled past it. Callers pass `Instant`s explicitly, which
//! keeps firing deterministic under test.

use std::time::{Duration, Instant};

/// A resettable single-shot deadline.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Create a debounce with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline at `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Fire once if the deadline has passed; disarms on firing.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any armed deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is currently armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
