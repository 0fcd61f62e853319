//! Edit session engine
//!
//! One [`EditSession`] owns the in-progress edit of a single entry: the
//! working copy, its saved baseline, version tracking, and the conflict
//! policy applied when the same entry changes on another device. The session
//! object survives UI remounts; whatever layer controls navigation calls
//! [`EditSession::begin`] and [`EditSession::end`] instead of tearing the
//! editor down.

mod baseline;
mod conflict;
mod debounce;
mod dirty;
mod version;

pub use baseline::BaselineStore;
pub use conflict::RevisionAction;
pub use debounce::Debounce;
pub use dirty::{drafts_differ, timestamps_equal};
pub use version::{RevisionClass, VersionLedger};

use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::{DeviceOrigin, Entry, EntryDraft, EntryId, EntryLocation, EntryStatus, MediaId, QueuedMedia};
use crate::notify::{Notification, NotificationSink};
use crate::store::{EntryStore, SavedEntry};
use crate::surface::EditorSurface;

/// A save handed to the host for execution against the store.
///
/// Produced by [`EditSession::begin_save`]; passed back whole to
/// [`EditSession::complete_save`] or [`EditSession::fail_save`]. The embedded
/// epoch ties it to the session state it was issued under, so a completion
/// arriving after `end` or a target switch is discarded.
#[derive(Debug)]
pub struct PendingSave {
    /// Entry to update, or `None` to create a new one
    pub entry_id: Option<EntryId>,
    /// Deep copy of the draft as it is being saved
    pub draft: EntryDraft,
    epoch: u64,
}

/// The entry-editing session engine.
///
/// Single-threaded and event-driven: hosts call mutators from the UI thread
/// and feed in the two async event streams (save completions, pushed
/// revisions) as discrete calls. At most one entry is live per session, and
/// deliveries for any other entry are discarded by identity check.
pub struct EditSession<S> {
    store: Arc<S>,
    notifier: Arc<dyn NotificationSink>,
    surface: Option<Arc<dyn EditorSurface>>,
    origin: Option<DeviceOrigin>,
    config: EngineConfig,

    target_id: Option<EntryId>,
    loaded_id: Option<EntryId>,
    epoch: u64,
    draft: EntryDraft,
    baseline: BaselineStore,
    ledger: VersionLedger,
    save_in_flight: bool,

    attachment_count: Option<usize>,
    attachment_baseline: Option<usize>,
    pending_attachment_count: Option<usize>,
    attachment_debounce: Debounce,
}

impl<S> EditSession<S> {
    /// Create a session bound to its collaborators.
    ///
    /// `origin` is this device's identity; pass `None` when the identity
    /// mechanism is unavailable and every incoming revision will classify as
    /// external, failing toward a conflict notice rather than a silent
    /// overwrite.
    pub fn new(
        store: Arc<S>,
        notifier: Arc<dyn NotificationSink>,
        origin: Option<DeviceOrigin>,
        config: EngineConfig,
    ) -> Self {
        let attachment_debounce = Debounce::new(config.attachment_debounce);
        Self {
            store,
            notifier,
            surface: None,
            origin,
            config,
            target_id: None,
            loaded_id: None,
            epoch: 0,
            draft: EntryDraft::default(),
            baseline: BaselineStore::new(),
            ledger: VersionLedger::new(),
            save_in_flight: false,
            attachment_count: None,
            attachment_baseline: None,
            pending_attachment_count: None,
            attachment_debounce,
        }
    }

    /// Bind the editing surface handle for this session.
    pub fn attach_surface(&mut self, surface: Arc<dyn EditorSurface>) {
        self.surface = Some(surface);
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Start editing `target`, or a new entry when `target` is `None`.
    ///
    /// For an existing entry the working copy stays empty until
    /// [`ingest_loaded`](Self::ingest_loaded) delivers the matching record.
    /// For a new entry the draft comes from `defaults` and the baseline is
    /// snapshotted immediately.
    pub fn begin(&mut self, target: Option<EntryId>, defaults: EntryDraft) {
        self.reset_state();
        self.target_id = target;

        if let Some(id) = target {
            tracing::info!("Editing entry {}, awaiting load", id);
        } else {
            tracing::info!("Editing a new entry");
            self.draft = defaults;
            self.baseline.snapshot(&self.draft);
        }
    }

    /// Populate the session from a loaded record.
    ///
    /// Ignored unless the record matches the awaited target and nothing has
    /// been ingested yet: a slow load for a previously open entry must not
    /// corrupt the session after the user navigated elsewhere.
    pub fn ingest_loaded(&mut self, entry: &Entry) {
        let Some(target) = self.target_id else {
            tracing::debug!("Ignoring load of {}: no entry is targeted", entry.id);
            return;
        };
        if entry.id != target {
            tracing::debug!("Ignoring stale load of {}: targeting {}", entry.id, target);
            return;
        }
        if self.loaded_id.is_some() {
            tracing::debug!("Ignoring duplicate load of {}", entry.id);
            return;
        }

        self.draft = EntryDraft::from_entry(entry);
        self.baseline.snapshot(&self.draft);
        self.ledger.initialize(entry.version);
        self.loaded_id = Some(entry.id);
        self.attachment_baseline = self.attachment_count;
        if let Some(surface) = &self.surface {
            surface.set_content(&entry.body);
        }
        tracing::info!("Loaded entry {} at version {}", entry.id, entry.version);
    }

    /// Tear the session down.
    ///
    /// Safe to call at any point, including mid-save: the session epoch is
    /// bumped so a late save completion or load is discarded on arrival.
    pub fn end(&mut self) {
        tracing::info!("Ending edit session");
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.epoch += 1;
        self.target_id = None;
        self.loaded_id = None;
        self.draft = EntryDraft::default();
        self.baseline.clear();
        self.ledger.reset();
        self.save_in_flight = false;
        self.attachment_count = None;
        self.attachment_baseline = None;
        self.pending_attachment_count = None;
        self.attachment_debounce.cancel();
    }

    // -----------------------------------------------------------------
    // Working-copy mutation
    // -----------------------------------------------------------------

    /// Set the entry title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Set the serialized rich-text body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Set the lifecycle status.
    pub fn set_status(&mut self, status: EntryStatus) {
        self.draft.status = status;
    }

    /// Set the mood rating.
    pub fn set_mood(&mut self, mood: Option<i32>) {
        self.draft.mood = mood;
    }

    /// Set or clear the attached location.
    pub fn set_location(&mut self, location: Option<EntryLocation>) {
        self.draft.location = location;
    }

    /// Set or clear the due timestamp.
    pub fn set_due_at(&mut self, due_at: Option<String>) {
        self.draft.due_at = due_at;
    }

    /// Add a captured media item to the pre-save queue.
    pub fn queue_media(&mut self, media: QueuedMedia) {
        self.draft.queued_media.push(media);
    }

    /// Remove a queued media item; returns whether it was present.
    pub fn remove_queued_media(&mut self, id: &MediaId) -> bool {
        let before = self.draft.queued_media.len();
        self.draft.queued_media.retain(|media| media.id != *id);
        self.draft.queued_media.len() != before
    }

    /// Pull the latest serialized content from the attached surface.
    pub fn refresh_body_from_surface(&mut self) {
        if let Some(surface) = &self.surface {
            self.draft.body = surface.content();
        }
    }

    // -----------------------------------------------------------------
    // State queries
    // -----------------------------------------------------------------

    /// The current working copy.
    #[must_use]
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    /// Entry this session is editing or waiting to load.
    #[must_use]
    pub const fn target_id(&self) -> Option<EntryId> {
        self.target_id
    }

    /// Entry actually populated into the session, once loaded or created.
    #[must_use]
    pub const fn loaded_id(&self) -> Option<EntryId> {
        self.loaded_id
    }

    /// Last entry version this session has observed or produced.
    #[must_use]
    pub const fn known_version(&self) -> Option<i64> {
        self.ledger.known_version()
    }

    /// Whether a save is currently in flight.
    #[must_use]
    pub const fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// Whether the working copy has diverged from its baseline.
    ///
    /// With no baseline taken yet: an existing entry still awaiting load is
    /// never dirty (there is nothing to compare against, and the UI must not
    /// warn before content has even arrived); a new entry is dirty once any
    /// content-bearing field is non-empty. Safe to call per keystroke.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        match self.baseline.current() {
            Some(baseline) => drafts_differ(&self.draft, baseline),
            None if self.target_id.is_some() => false,
            None => self.draft.has_content(),
        }
    }

    /// Whether the live attachment count differs from its baseline.
    #[must_use]
    pub fn attachments_diverged(&self) -> bool {
        match (self.attachment_count, self.attachment_baseline) {
            (Some(count), Some(baseline)) => count != baseline,
            _ => false,
        }
    }

    // -----------------------------------------------------------------
    // Attachment tracking
    // -----------------------------------------------------------------

    /// Record a live attachment count reported by the attachment subsystem.
    ///
    /// Commits after a quiet period; poll [`tick`](Self::tick) to apply.
    pub fn report_attachment_count(&mut self, count: usize, now: Instant) {
        self.pending_attachment_count = Some(count);
        self.attachment_debounce.schedule(now);
    }

    /// Advance debounced work; hosts call this from their timer loop.
    pub fn tick(&mut self, now: Instant) {
        if self.attachment_debounce.fire_due(now) {
            if let Some(count) = self.pending_attachment_count.take() {
                self.attachment_count = Some(count);
                if self.attachment_baseline.is_none() {
                    // First report after (re)load is the persisted state,
                    // not a user change.
                    self.attachment_baseline = Some(count);
                }
            }
        }
    }

    fn rebaseline_attachments(&mut self) {
        self.attachment_baseline = self.attachment_count;
    }

    // -----------------------------------------------------------------
    // Incoming revisions
    // -----------------------------------------------------------------

    /// Feed one pushed revision of the live entry through the conflict
    /// policy.
    ///
    /// Returns the action taken, mostly for host-side logging; every content
    /// effect and user-facing signal has already been applied when this
    /// returns.
    pub fn apply_revision(&mut self, entry: &Entry) -> RevisionAction {
        if self.save_in_flight {
            // Never race a save response against a sync push.
            tracing::debug!("Ignoring revision of {}: save in flight", entry.id);
            return RevisionAction::Ignore;
        }
        if self.loaded_id != Some(entry.id) {
            tracing::debug!("Ignoring revision of {}: not the live entry", entry.id);
            return RevisionAction::Ignore;
        }

        let class = self
            .ledger
            .observe_incoming(entry.version, &entry.origin, self.origin.as_ref());
        let diverged = self.is_dirty() || self.attachments_diverged();
        let action = conflict::decide(class, diverged);

        match action {
            RevisionAction::Ignore => {
                tracing::debug!("Revision {} of {} is not newer", entry.version, entry.id);
            }
            RevisionAction::TrackSelf => {
                tracing::debug!(
                    "Revision {} of {} is our own write",
                    entry.version,
                    entry.id
                );
            }
            RevisionAction::KeepLocal => {
                tracing::warn!(
                    "Entry {} changed on {} while local edits exist; keeping draft",
                    entry.id,
                    entry.origin
                );
                self.notifier.publish(Notification::transient(format!(
                    "This entry was changed on {}. Your unsaved edits are kept; saving will overwrite that change.",
                    entry.origin
                )));
            }
            RevisionAction::Adopt => {
                self.draft = EntryDraft::from_entry(entry);
                self.baseline.snapshot(&self.draft);
                self.rebaseline_attachments();
                if let Some(surface) = &self.surface {
                    surface.set_content(&entry.body);
                    surface.blur();
                }
                if self
                    .ledger
                    .consume_recent_save(self.config.overwrite_warning_window)
                {
                    tracing::warn!(
                        "Entry {} overwritten by {} right after a local save",
                        entry.id,
                        entry.origin
                    );
                    self.notifier.publish(Notification::blocking(format!(
                        "A change from {} may have replaced an edit you just saved.",
                        entry.origin
                    )));
                } else {
                    self.notifier.publish(Notification::transient(format!(
                        "This entry was updated on {}.",
                        entry.origin
                    )));
                }
            }
        }

        action
    }

    // -----------------------------------------------------------------
    // Saving
    // -----------------------------------------------------------------

    /// Start a save, handing the host a deep copy of the draft to persist.
    ///
    /// Marks the save in flight, which gates out incoming revisions until
    /// [`complete_save`](Self::complete_save) or
    /// [`fail_save`](Self::fail_save) is called with the returned value.
    pub fn begin_save(&mut self) -> Result<PendingSave> {
        if self.save_in_flight {
            return Err(Error::SaveInProgress);
        }
        if self.target_id.is_some() && self.loaded_id.is_none() {
            return Err(Error::NotLoaded);
        }

        self.refresh_body_from_surface();
        self.save_in_flight = true;
        Ok(PendingSave {
            entry_id: self.loaded_id,
            draft: self.draft.clone(),
            epoch: self.epoch,
        })
    }

    /// Apply a successful save result.
    ///
    /// The baseline becomes the draft as it was saved, so edits typed while
    /// the save was in flight stay dirty. A completion for an ended or
    /// switched session is discarded.
    pub fn complete_save(&mut self, pending: PendingSave, saved: &SavedEntry) {
        if pending.epoch != self.epoch {
            tracing::debug!("Discarding save completion for an abandoned session");
            return;
        }

        self.save_in_flight = false;
        self.target_id = Some(saved.id);
        self.loaded_id = Some(saved.id);
        self.baseline.snapshot(&pending.draft);
        self.rebaseline_attachments();
        self.ledger.advance(saved.version);
        self.ledger.record_local_save();
        tracing::debug!("Saved entry {} at version {}", saved.id, saved.version);
    }

    /// Record a failed save.
    ///
    /// The working copy and dirty state are left untouched so the user can
    /// retry without losing input.
    pub fn fail_save(&mut self, pending: PendingSave) {
        if pending.epoch != self.epoch {
            tracing::debug!("Discarding save failure for an abandoned session");
            return;
        }
        self.save_in_flight = false;
    }
}

impl<S: EntryStore> EditSession<S> {
    /// Persist the draft through the injected store.
    ///
    /// Convenience wrapper over the split-phase save; a store error is
    /// propagated unchanged and leaves the draft and dirty state intact.
    pub async fn save(&mut self) -> Result<SavedEntry> {
        let pending = self.begin_save()?;
        let store = Arc::clone(&self.store);
        let result = store
            .save_entry(pending.entry_id.as_ref(), &pending.draft, self.origin.as_ref())
            .await;
        match result {
            Ok(saved) => {
                self.complete_save(pending, &saved);
                Ok(saved)
            }
            Err(error) => {
                tracing::warn!("Save failed: {}", error);
                self.fail_save(pending);
                Err(error)
            }
        }
    }
}
