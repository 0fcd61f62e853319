//! Storage contracts for Loam
//!
//! Persistence and sync live outside the engine. These traits are the shape
//! the engine consumes them through; `MemoryEntryStore` is the in-process
//! reference implementation used by tests and headless hosts.

mod memory;
mod settings;

pub use memory::MemoryEntryStore;
pub use settings::{JsonFileSettingsStore, SettingsAutosave, SettingsStore};

use tokio::sync::broadcast;

use crate::error::Result;
use crate::models::{DeviceOrigin, Entry, EntryDraft, EntryId};

/// Identity and version assigned by the store after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedEntry {
    /// Identifier of the saved entry (assigned on create)
    pub id: EntryId,
    /// Version the store recorded for this write
    pub version: i64,
}

/// Trait for entry storage operations (async)
///
/// `save_entry` creates when `id` is `None` and updates otherwise; every
/// accepted write bumps the entry's version and records the writing origin.
/// `watch_entry` delivers revisions pushed by other devices as well as echoes
/// of this device's own writes; classifying them is the session's job.
#[allow(async_fn_in_trait)]
pub trait EntryStore {
    /// Load an entry by ID
    async fn load_entry(&self, id: &EntryId) -> Result<Entry>;

    /// Persist a draft, creating the entry when `id` is `None`
    async fn save_entry(
        &self,
        id: Option<&EntryId>,
        draft: &EntryDraft,
        origin: Option<&DeviceOrigin>,
    ) -> Result<SavedEntry>;

    /// Subscribe to revisions of an entry
    fn watch_entry(&self, id: &EntryId) -> broadcast::Receiver<Entry>;
}
