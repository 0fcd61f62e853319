//! In-memory entry store

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::models::{DeviceOrigin, Entry, EntryDraft, EntryId};

use super::{EntryStore, SavedEntry};

const WATCH_CHANNEL_CAPACITY: usize = 16;

/// Entry store backed by a process-local map.
///
/// Reference implementation of [`EntryStore`] for tests and headless hosts.
/// Writes bump the version, record the writing origin, and fan out to every
/// watcher of the entry, including the writer's own session. Real sync
/// backends echo local writes back the same way.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<HashMap<EntryId, Entry>>,
    watchers: Mutex<HashMap<EntryId, broadcast::Sender<Entry>>>,
}

impl MemoryEntryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing entry, without notifying watchers.
    pub fn insert(&self, entry: Entry) {
        self.lock_entries().insert(entry.id, entry);
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<EntryId, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_watchers(&self) -> std::sync::MutexGuard<'_, HashMap<EntryId, broadcast::Sender<Entry>>> {
        self.watchers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn notify_watchers(&self, entry: &Entry) {
        if let Some(sender) = self.lock_watchers().get(&entry.id) {
            // Send only fails when no receiver is alive, which is fine.
            let _ = sender.send(entry.clone());
        }
    }

    fn apply_draft(entry: &mut Entry, draft: &EntryDraft, origin: &DeviceOrigin, now: i64) {
        entry.title = draft.title.clone();
        entry.body = draft.body.clone();
        entry.status = draft.status;
        entry.mood = draft.mood;
        entry.location = draft.location.clone();
        entry.due_at = draft.due_at.clone();
        entry.origin = origin.clone();
        entry.updated_at = now;
    }
}

impl EntryStore for MemoryEntryStore {
    async fn load_entry(&self, id: &EntryId) -> Result<Entry> {
        self.lock_entries()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn save_entry(
        &self,
        id: Option<&EntryId>,
        draft: &EntryDraft,
        origin: Option<&DeviceOrigin>,
    ) -> Result<SavedEntry> {
        let origin = origin.cloned().unwrap_or_else(DeviceOrigin::unknown);
        let now = chrono::Utc::now().timestamp_millis();

        let saved = {
            let mut entries = self.lock_entries();
            match id {
                Some(id) => {
                    let entry = entries
                        .get_mut(id)
                        .ok_or_else(|| Error::NotFound(id.to_string()))?;
                    entry.version += 1;
                    Self::apply_draft(entry, draft, &origin, now);
                    entry.clone()
                }
                None => {
                    let entry = Entry {
                        id: EntryId::new(),
                        version: 1,
                        origin: origin.clone(),
                        title: draft.title.clone(),
                        body: draft.body.clone(),
                        status: draft.status,
                        mood: draft.mood,
                        location: draft.location.clone(),
                        due_at: draft.due_at.clone(),
                        created_at: now,
                        updated_at: now,
                    };
                    entries.insert(entry.id, entry.clone());
                    entry
                }
            }
        };

        self.notify_watchers(&saved);

        Ok(SavedEntry {
            id: saved.id,
            version: saved.version,
        })
    }

    fn watch_entry(&self, id: &EntryId) -> broadcast::Receiver<Entry> {
        self.lock_watchers()
            .entry(*id)
            .or_insert_with(|| broadcast::channel(WATCH_CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryStatus;
    use pretty_assertions::assert_eq;

    fn draft(title: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            body: format!("{title} body"),
            ..Default::default()
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn create_assigns_id_and_version_one() {
        let store = MemoryEntryStore::new();
        let origin = DeviceOrigin::new("dev-A");

        let saved = store
            .save_entry(None, &draft("hello"), Some(&origin))
            .await
            .unwrap();
        assert_eq!(saved.version, 1);

        let loaded = store.load_entry(&saved.id).await.unwrap();
        assert_eq!(loaded.title, "hello");
        assert_eq!(loaded.origin, origin);
        assert_eq!(loaded.status, EntryStatus::Open);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn update_bumps_version_and_origin() {
        let store = MemoryEntryStore::new();
        let dev_a = DeviceOrigin::new("dev-A");
        let dev_b = DeviceOrigin::new("dev-B");

        let saved = store
            .save_entry(None, &draft("v1"), Some(&dev_a))
            .await
            .unwrap();
        let updated = store
            .save_entry(Some(&saved.id), &draft("v2"), Some(&dev_b))
            .await
            .unwrap();

        assert_eq!(updated.version, 2);
        let loaded = store.load_entry(&saved.id).await.unwrap();
        assert_eq!(loaded.title, "v2");
        assert_eq!(loaded.origin, dev_b);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn update_of_missing_entry_is_not_found() {
        let store = MemoryEntryStore::new();
        let missing = EntryId::new();
        let result = store
            .save_entry(Some(&missing), &draft("x"), None)
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn save_without_origin_records_unknown_device() {
        let store = MemoryEntryStore::new();
        let saved = store.save_entry(None, &draft("x"), None).await.unwrap();
        let loaded = store.load_entry(&saved.id).await.unwrap();
        assert_eq!(loaded.origin, DeviceOrigin::unknown());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn watchers_receive_saves_including_own_echo() {
        let store = MemoryEntryStore::new();
        let dev_a = DeviceOrigin::new("dev-A");
        let saved = store
            .save_entry(None, &draft("v1"), Some(&dev_a))
            .await
            .unwrap();

        let mut rx = store.watch_entry(&saved.id);
        store
            .save_entry(Some(&saved.id), &draft("v2"), Some(&dev_a))
            .await
            .unwrap();

        let revision = rx.try_recv().unwrap();
        assert_eq!(revision.version, 2);
        assert_eq!(revision.title, "v2");
    }
}
