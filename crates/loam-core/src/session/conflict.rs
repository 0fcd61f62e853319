//! Conflict resolution policy
//!
//! Given a classified incoming revision and the session's divergence state,
//! pick what happens to the working copy. The save-in-flight gate sits above
//! this policy: the session drops revisions outright while a save is in
//! flight, so by the time a revision reaches `decide` the save path is
//! quiescent.
//!
//! The policy always prefers data preservation over freshness: silently
//! overwriting unsaved local edits is a worse failure than a temporarily
//! stale view.

use super::version::RevisionClass;

/// What the session should do with an incoming revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionAction {
    /// Not newer than what the session already has; drop it
    Ignore,
    /// Newer but self-originated; the ledger advanced, content stands
    TrackSelf,
    /// Newer and external while local edits exist; keep the draft and
    /// raise a non-blocking notice naming the origin
    KeepLocal,
    /// Newer, external, and the session is clean; replace draft and
    /// baseline with the incoming fields
    Adopt,
}

/// Decide the outcome for a classified revision.
///
/// `locally_diverged` is the dirty check OR'd with the attachment-count
/// delta; attachment changes are dirty signals even though attachments are
/// uploaded out of band.
#[must_use]
pub const fn decide(class: RevisionClass, locally_diverged: bool) -> RevisionAction {
    if !class.is_newer {
        RevisionAction::Ignore
    } else if !class.is_external {
        RevisionAction::TrackSelf
    } else if locally_diverged {
        RevisionAction::KeepLocal
    } else {
        RevisionAction::Adopt
    }
}
