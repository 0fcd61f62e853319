//! Dirty-state evaluation
//!
//! Field-by-field comparison of a working copy against its baseline. Pure
//! and side-effect free; cheap enough to run on every keystroke.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{EntryDraft, QueuedMedia};

/// Whether the draft has diverged from the baseline under field-aware rules.
///
/// Scalars compare strictly; `due_at` compares as an instant so formatting
/// differences do not read as edits; `location` compares structurally;
/// queued media compare by count plus identifier set.
#[must_use]
pub fn drafts_differ(draft: &EntryDraft, baseline: &EntryDraft) -> bool {
    draft.title != baseline.title
        || draft.body != baseline.body
        || draft.status != baseline.status
        || draft.mood != baseline.mood
        || draft.location != baseline.location
        || !timestamps_equal(draft.due_at.as_deref(), baseline.due_at.as_deref())
        || !media_equal(&draft.queued_media, &baseline.queued_media)
}

/// Compare two optional timestamp strings as instants.
///
/// Accepts RFC 3339 text and unix-millisecond digit strings; comparison is
/// at whole-second precision, so a millisecond-stripped value equals its
/// full form. Values that parse as neither fall back to string equality.
#[must_use]
pub fn timestamps_equal(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (parse_instant(a), parse_instant(b)) {
            (Some(a), Some(b)) => a.timestamp() == b.timestamp(),
            _ => a == b,
        },
        _ => false,
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let millis: i64 = raw.parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

fn media_equal(a: &[QueuedMedia], b: &[QueuedMedia]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let ids_a: HashSet<_> = a.iter().map(|media| media.id).collect();
    let ids_b: HashSet<_> = b.iter().map(|media| media.id).collect();
    ids_a == ids_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryLocation, EntryStatus};

    fn base_draft() -> EntryDraft {
        EntryDraft {
            title: "Tuesday".to_string(),
            body: "rained all day".to_string(),
            status: EntryStatus::Open,
            mood: Some(3),
            location: Some(EntryLocation::new("Home", 51.5, -0.1)),
            due_at: Some("2026-03-01T09:00:00Z".to_string()),
            queued_media: Vec::new(),
        }
    }

    #[test]
    fn test_identical_drafts_are_clean() {
        let draft = base_draft();
        assert!(!drafts_differ(&draft, &draft.clone()));
    }

    #[test]
    fn test_scalar_change_is_dirty() {
        let baseline = base_draft();
        let mut draft = baseline.clone();
        draft.mood = Some(5);
        assert!(drafts_differ(&draft, &baseline));

        let mut draft = baseline.clone();
        draft.status = EntryStatus::Done;
        assert!(drafts_differ(&draft, &baseline));
    }

    #[test]
    fn test_due_date_formatting_is_not_an_edit() {
        let baseline = base_draft();
        let mut draft = baseline.clone();
        // Same instant as the baseline's RFC 3339 value, in unix ms.
        draft.due_at = Some("1772355600000".to_string());
        assert!(!drafts_differ(&draft, &baseline));
    }

    #[test]
    fn test_millisecond_stripped_due_date_still_equal() {
        assert!(timestamps_equal(
            Some("2026-03-01T09:00:00Z"),
            Some("2026-03-01T09:00:00.734Z"),
        ));
    }

    #[test]
    fn test_different_due_instants_are_dirty() {
        assert!(!timestamps_equal(
            Some("2026-03-01T09:00:00Z"),
            Some("2026-03-01T09:00:01Z"),
        ));
    }

    #[test]
    fn test_unparseable_due_dates_fall_back_to_string_equality() {
        assert!(timestamps_equal(Some("someday"), Some("someday")));
        assert!(!timestamps_equal(Some("someday"), Some("later")));
    }

    #[test]
    fn test_due_date_presence_mismatch_is_dirty() {
        assert!(!timestamps_equal(Some("2026-03-01T09:00:00Z"), None));
        assert!(!timestamps_equal(None, Some("2026-03-01T09:00:00Z")));
        assert!(timestamps_equal(None, None));
    }

    #[test]
    fn test_location_compares_structurally() {
        let baseline = base_draft();
        let mut draft = baseline.clone();
        draft.location = Some(EntryLocation::new("Home", 51.5, -0.2));
        assert!(drafts_differ(&draft, &baseline));

        draft.location = Some(EntryLocation::new("Home", 51.5, -0.1));
        assert!(!drafts_differ(&draft, &baseline));
    }

    #[test]
    fn test_media_queue_compares_count_and_ids() {
        let mut baseline = base_draft();
        baseline
            .queued_media
            .push(QueuedMedia::new("file:///a.jpg", "image/jpeg"));

        // Same items reordered: clean.
        let mut draft = baseline.clone();
        draft
            .queued_media
            .push(QueuedMedia::new("file:///b.jpg", "image/jpeg"));
        let mut reordered = draft.clone();
        reordered.queued_media.reverse();
        assert!(!drafts_differ(&reordered, &draft));

        // Same count, different item: dirty.
        let mut swapped = baseline.clone();
        swapped.queued_media[0] = QueuedMedia::new("file:///c.jpg", "image/jpeg");
        assert!(drafts_differ(&swapped, &baseline));

        // Extra item: dirty.
        assert!(drafts_differ(&draft, &baseline));
    }
}
