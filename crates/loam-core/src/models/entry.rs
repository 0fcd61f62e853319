//! Entry model

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

use super::location::EntryLocation;
use super::media::QueuedMedia;
use super::origin::DeviceOrigin;

/// A unique identifier for an entry, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new unique entry ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is open and may still be worked on
    #[default]
    Open,
    /// Entry has been marked done
    Done,
    /// Entry was set aside without completion
    Archived,
}

/// A persisted journal entry.
///
/// `version` increases by one on every accepted write; `origin` names the
/// device/session that produced the latest write. Together they let an edit
/// session tell its own sync echoes apart from foreign changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier
    pub id: EntryId,
    /// Monotonically increasing write counter
    pub version: i64,
    /// Device/session that last wrote this entry
    pub origin: DeviceOrigin,
    /// Entry title
    pub title: String,
    /// Serialized rich-text body (opaque to the engine)
    pub body: String,
    /// Lifecycle status
    pub status: EntryStatus,
    /// Mood rating recorded with the entry, 1-5
    pub mood: Option<i32>,
    /// Place attached to the entry
    pub location: Option<EntryLocation>,
    /// Optional due timestamp, RFC 3339 or unix-millisecond text
    pub due_at: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Entry {
    /// Get first line of the title (falling back to the body) truncated to
    /// `max_len` characters, for list rows.
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let source = if self.title.trim().is_empty() {
            &self.body
        } else {
            &self.title
        };
        source
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }

    /// Extract #tags from the entry body
    #[must_use]
    pub fn hashtags(&self) -> Vec<String> {
        extract_hashtags(&self.body)
    }
}

/// The mutable, session-local working copy of an entry's editable fields.
///
/// Owned exclusively by one [`EditSession`](crate::session::EditSession);
/// snapshots of it serve as the baseline for dirty comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Entry title
    pub title: String,
    /// Serialized rich-text body (opaque to the engine)
    pub body: String,
    /// Lifecycle status
    pub status: EntryStatus,
    /// Mood rating, 1-5
    pub mood: Option<i32>,
    /// Place attached to the entry
    pub location: Option<EntryLocation>,
    /// Optional due timestamp, RFC 3339 or unix-millisecond text
    pub due_at: Option<String>,
    /// Media captured in this session but not yet uploaded
    pub queued_media: Vec<QueuedMedia>,
}

impl EntryDraft {
    /// Build a working copy from a loaded entry's editable fields.
    ///
    /// Queued media never come from the store; a freshly loaded draft starts
    /// with an empty queue.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            body: entry.body.clone(),
            status: entry.status,
            mood: entry.mood,
            location: entry.location.clone(),
            due_at: entry.due_at.clone(),
            queued_media: Vec::new(),
        }
    }

    /// Whether any content-bearing field holds something worth keeping.
    ///
    /// Used for the dirty check on a brand-new entry that has no baseline
    /// yet: an untouched draft is clean, typed text or captured media is not.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.body.trim().is_empty()
            || !self.queued_media.is_empty()
    }
}

/// Extract #tags from text
///
/// Valid tags match `#[a-zA-Z][a-zA-Z0-9_-]*`. Tags are lowercased,
/// deduplicated, and returned sorted for stable display.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAG_RE.get_or_init(|| {
        Regex::new(r"#([a-zA-Z][a-zA-Z0-9_-]*)").expect("Invalid regex")
    });

    let mut tags: Vec<String> = re
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        Entry {
            id: EntryId::new(),
            version: 1,
            origin: DeviceOrigin::new("dev-A"),
            title: "Morning pages".to_string(),
            body: "Slept well. #sleep #morning".to_string(),
            status: EntryStatus::Open,
            mood: Some(4),
            location: None,
            due_at: None,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_entry_id_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn test_entry_id_parse() {
        let id = EntryId::new();
        let parsed: EntryId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_title_preview_prefers_title() {
        let entry = sample_entry();
        assert_eq!(entry.title_preview(50), "Morning pages");
        assert_eq!(entry.title_preview(7), "Morning");
    }

    #[test]
    fn test_title_preview_falls_back_to_body() {
        let mut entry = sample_entry();
        entry.title = "   ".to_string();
        entry.body = "First line\nSecond line".to_string();
        assert_eq!(entry.title_preview(50), "First line");
    }

    #[test]
    fn test_hashtags_sorted_and_deduplicated() {
        let mut entry = sample_entry();
        entry.body = "#sleep #Morning #SLEEP and #my-tag_2".to_string();
        assert_eq!(entry.hashtags(), vec!["morning", "my-tag_2", "sleep"]);
    }

    #[test]
    fn test_hashtags_reject_leading_digit() {
        assert!(extract_hashtags("#2024 #99problems").is_empty());
    }

    #[test]
    fn test_draft_from_entry_starts_with_empty_queue() {
        let entry = sample_entry();
        let draft = EntryDraft::from_entry(&entry);
        assert_eq!(draft.title, entry.title);
        assert_eq!(draft.body, entry.body);
        assert!(draft.queued_media.is_empty());
    }

    #[test]
    fn test_default_draft_has_no_content() {
        assert!(!EntryDraft::default().has_content());
    }

    #[test]
    fn test_draft_with_queued_media_has_content() {
        let draft = EntryDraft {
            queued_media: vec![QueuedMedia::new("file:///tmp/p.jpg", "image/jpeg")],
            ..Default::default()
        };
        assert!(draft.has_content());
    }

    #[test]
    fn test_whitespace_only_text_is_not_content() {
        let draft = EntryDraft {
            title: "  ".to_string(),
            body: "\n\t".to_string(),
            ..Default::default()
        };
        assert!(!draft.has_content());
    }
}
