//! Journal settings model

use serde::{Deserialize, Serialize};

/// User-tunable journaling preferences.
///
/// Saved through [`SettingsStore`](crate::store::SettingsStore) on a
/// debounced timer so slider-style controls do not hammer the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Editor font size in points
    pub font_size: u32,
    /// Attach the current location to new entries by default
    pub attach_location: bool,
    /// Hour of day (0-23) for the daily journaling reminder, if enabled
    pub reminder_hour: Option<u8>,
    /// Focus the editor automatically when a new entry opens
    pub auto_focus_editor: bool,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            attach_location: false,
            reminder_hour: None,
            auto_focus_editor: true,
        }
    }
}
