//! Device origin model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for the device or session that last wrote an entry.
///
/// Origins are compared only for equality; the engine never interprets the
/// contents. Hosts typically use a per-install identifier plus a readable
/// device label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceOrigin(String);

impl DeviceOrigin {
    /// Create an origin from a host-supplied label, trimmed.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into().trim().to_string())
    }

    /// Generate a fresh unique origin for this install.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Placeholder origin recorded when the device identity mechanism is
    /// unavailable. Sessions without an identity classify every incoming
    /// revision as external, so this value never wins a self-match.
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown-device".to_string())
    }

    /// Get the string form of this origin.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
