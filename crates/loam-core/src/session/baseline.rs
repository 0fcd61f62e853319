//! Baseline snapshot store

use crate::models::EntryDraft;

/// Holds the last-known-saved copy of the draft, used purely for diffing.
///
/// Snapshots are deep copies sharing no state with the working copy, so
/// later mutation of the draft can never retroactively alter a taken
/// baseline. The stored value is never mutated in place, only replaced.
#[derive(Debug, Default)]
pub struct BaselineStore {
    baseline: Option<EntryDraft>,
}

impl BaselineStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { baseline: None }
    }

    /// Replace the baseline with a deep copy of `draft`.
    pub fn snapshot(&mut self, draft: &EntryDraft) {
        self.baseline = Some(draft.clone());
    }

    /// The current baseline, if one has been taken.
    #[must_use]
    pub fn current(&self) -> Option<&EntryDraft> {
        self.baseline.as_ref()
    }

    /// Drop the baseline.
    pub fn clear(&mut self) {
        self.baseline = None;
    }
}
