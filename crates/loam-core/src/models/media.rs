//! Queued media model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a locally queued media item, using UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(Uuid);

impl MediaId {
    /// Create a new unique media ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MediaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A media item captured in the editor but not yet uploaded.
///
/// Queued media live only in the working copy; once the entry is saved the
/// upload pipeline takes over and the item leaves the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMedia {
    /// Unique identifier for this queued item.
    pub id: MediaId,
    /// Local URI of the captured file (camera roll, temp dir, ...).
    pub uri: String,
    /// Content MIME type reported by the capture surface.
    pub mime_type: String,
}

impl QueuedMedia {
    /// Queue a freshly captured media file.
    #[must_use]
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: MediaId::new(),
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }
}
