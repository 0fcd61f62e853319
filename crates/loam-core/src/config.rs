//! Engine configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for the edit-session engine.
///
/// The overwrite-warning window is a heuristic, not a correctness guarantee:
/// it bounds how long after a local save an adopted external revision is
/// escalated from a transient notice to a blocking warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long after a local save an adopted external revision triggers the
    /// blocking "your save may have been overwritten" warning.
    pub overwrite_warning_window: Duration,
    /// Quiet period before a reported attachment count is committed.
    pub attachment_debounce: Duration,
    /// Quiet period before queued settings changes are written out.
    pub settings_autosave_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overwrite_warning_window: Duration::from_secs(30),
            attachment_debounce: Duration::from_millis(400),
            settings_autosave_delay: Duration::from_millis(1500),
        }
    }
}

impl EngineConfig {
    /// Set the overwrite-warning window.
    #[must_use]
    pub const fn with_overwrite_warning_window(mut self, window: Duration) -> Self {
        self.overwrite_warning_window = window;
        self
    }

    /// Set the attachment-count debounce delay.
    #[must_use]
    pub const fn with_attachment_debounce(mut self, delay: Duration) -> Self {
        self.attachment_debounce = delay;
        self
    }

    /// Set the settings autosave delay.
    #[must_use]
    pub const fn with_settings_autosave_delay(mut self, delay: Duration) -> Self {
        self.settings_autosave_delay = delay;
        self
    }
}
