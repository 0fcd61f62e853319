//! Settings storage and debounced autosave

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::Result;
use crate::models::JournalSettings;
use crate::session::Debounce;

/// Trait for settings storage operations (async)
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    /// Load settings, falling back to defaults when nothing is stored yet
    async fn load(&self) -> Result<JournalSettings>;

    /// Persist settings
    async fn save(&self, settings: &JournalSettings) -> Result<()>;
}

/// Settings store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    /// Create a store writing to the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self) -> Result<JournalSettings> {
        if !self.path.exists() {
            return Ok(JournalSettings::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, settings: &JournalSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Coalesces a burst of settings changes into one write.
///
/// Slider and stepper controls queue a change per tick; the autosave keeps
/// only the latest value and writes it after a quiet period. `cancel` drops
/// the pending write, e.g. when the settings screen closes via discard.
#[derive(Debug)]
pub struct SettingsAutosave {
    pending: Option<JournalSettings>,
    debounce: Debounce,
}

impl SettingsAutosave {
    /// Create an autosave with the given quiet period.
    #[must_use]
    pub const fn new(delay: std::time::Duration) -> Self {
        Self {
            pending: None,
            debounce: Debounce::new(delay),
        }
    }

    /// Queue a settings value, restarting the quiet period.
    pub fn queue(&mut self, settings: JournalSettings, now: Instant) {
        self.pending = Some(settings);
        self.debounce.schedule(now);
    }

    /// Write the queued value if the quiet period has elapsed.
    ///
    /// Returns `true` when a write happened. A store failure re-queues the
    /// value so the next poll retries it.
    pub async fn flush_due<S: SettingsStore>(&mut self, store: &S, now: Instant) -> Result<bool> {
        if !self.debounce.fire_due(now) {
            return Ok(false);
        }
        let Some(settings) = self.pending.take() else {
            return Ok(false);
        };
        if let Err(error) = store.save(&settings).await {
            self.pending = Some(settings);
            self.debounce.schedule(now);
            return Err(error);
        }
        tracing::debug!("Autosaved journal settings");
        Ok(true)
    }

    /// Drop any queued value without writing.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.debounce.cancel();
    }

    /// Whether a write is queued.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
