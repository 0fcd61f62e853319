//! Version ledger
//!
//! Tracks the last entry version this session has observed or produced and
//! classifies incoming revisions as self- or externally-originated. Also
//! keeps the short save-recency window behind the "your save may have been
//! overwritten" warning.

use std::time::{Duration, Instant};

use crate::models::DeviceOrigin;

/// Classification of an incoming revision relative to session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionClass {
    /// The revision's version exceeds everything this session has seen
    pub is_newer: bool,
    /// The revision is newer and was written by a different origin
    pub is_external: bool,
}

/// Per-session version tracking state.
#[derive(Debug, Default)]
pub struct VersionLedger {
    known_version: Option<i64>,
    last_save_at: Option<Instant>,
}

impl VersionLedger {
    /// Create an uninitialized ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            known_version: None,
            last_save_at: None,
        }
    }

    /// Record the first observed version; later calls are no-ops so a stale
    /// read arriving after initialization cannot rewind the ledger.
    pub fn initialize(&mut self, version: i64) {
        if self.known_version.is_none() {
            self.known_version = Some(version);
        }
    }

    /// The last version this session observed or produced, if any.
    #[must_use]
    pub const fn known_version(&self) -> Option<i64> {
        self.known_version
    }

    /// Classify an incoming revision and advance the known version.
    ///
    /// Newer versions advance the ledger whether self- or externally
    /// originated; both must be tracked for future comparisons to stay
    /// correct. A `None` session origin means device identity is
    /// unavailable, and every newer revision then classifies as external.
    pub fn observe_incoming(
        &mut self,
        version: i64,
        origin: &DeviceOrigin,
        session_origin: Option<&DeviceOrigin>,
    ) -> RevisionClass {
        let is_newer = self.known_version.is_none_or(|known| version > known);
        if is_newer {
            self.known_version = Some(version);
        }
        let is_external = is_newer && session_origin.is_none_or(|own| origin != own);
        RevisionClass {
            is_newer,
            is_external,
        }
    }

    /// Advance the known version without classifying, used when a local
    /// save's response reports the version the store assigned.
    pub fn advance(&mut self, version: i64) {
        if self.known_version.is_none_or(|known| version > known) {
            self.known_version = Some(version);
        }
    }

    /// Stamp the monotonic clock for a locally initiated save.
    pub fn record_local_save(&mut self) {
        self.last_save_at = Some(Instant::now());
    }

    /// Whether a local save landed within `window`, consuming the stamp.
    ///
    /// A `true` result clears the stamp so the overwrite warning fires at
    /// most once per local save.
    pub fn consume_recent_save(&mut self, window: Duration) -> bool {
        match self.last_save_at {
            Some(at) if at.elapsed() < window => {
                self.last_save_at = None;
                true
            }
            Some(_) => {
                self.last_save_at = None;
                false
            }
            None => false,
        }
    }

    /// Return to the uninitialized state.
    pub fn reset(&mut self) {
        self.known_version = None;
        self.last_save_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(30);

    fn dev(label: &str) -> DeviceOrigin {
        DeviceOrigin::new(label)
    }

    #[test]
    fn test_initialize_first_observation_wins() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        ledger.initialize(3);
        assert_eq!(ledger.known_version(), Some(5));
    }

    #[test]
    fn test_same_version_is_not_newer() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        let class = ledger.observe_incoming(5, &dev("dev-A"), Some(&dev("dev-A")));
        assert!(!class.is_newer);
        assert!(!class.is_external);
        assert_eq!(ledger.known_version(), Some(5));
    }

    #[test]
    fn test_newer_external_revision_classified_and_tracked() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        let class = ledger.observe_incoming(6, &dev("dev-B"), Some(&dev("dev-A")));
        assert!(class.is_newer);
        assert!(class.is_external);
        assert_eq!(ledger.known_version(), Some(6));
    }

    #[test]
    fn test_newer_self_revision_advances_without_external_flag() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        let class = ledger.observe_incoming(6, &dev("dev-A"), Some(&dev("dev-A")));
        assert!(class.is_newer);
        assert!(!class.is_external);
        assert_eq!(ledger.known_version(), Some(6));
    }

    #[test]
    fn test_missing_identity_classifies_newer_as_external() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        let class = ledger.observe_incoming(6, &dev("dev-A"), None);
        assert!(class.is_external);
    }

    #[test]
    fn test_uninitialized_ledger_treats_any_version_as_newer() {
        let mut ledger = VersionLedger::new();
        let class = ledger.observe_incoming(1, &dev("dev-B"), Some(&dev("dev-A")));
        assert!(class.is_newer);
        assert_eq!(ledger.known_version(), Some(1));
    }

    #[test]
    fn test_known_version_is_non_decreasing() {
        let mut ledger = VersionLedger::new();
        let versions = [3, 7, 2, 7, 9, 1];
        let mut high_water = None;
        for version in versions {
            ledger.observe_incoming(version, &dev("dev-B"), Some(&dev("dev-A")));
            high_water = high_water.max(Some(version));
            assert_eq!(ledger.known_version(), high_water);
        }
    }

    #[test]
    fn test_advance_never_rewinds() {
        let mut ledger = VersionLedger::new();
        ledger.advance(4);
        ledger.advance(2);
        assert_eq!(ledger.known_version(), Some(4));
    }

    #[test]
    fn test_recent_save_consumed_on_first_read() {
        let mut ledger = VersionLedger::new();
        ledger.record_local_save();
        assert!(ledger.consume_recent_save(WINDOW));
        assert!(!ledger.consume_recent_save(WINDOW));
    }

    #[test]
    fn test_save_outside_window_does_not_count() {
        let mut ledger = VersionLedger::new();
        let long_ago = Instant::now().checked_sub(Duration::from_secs(40));
        // Platforms where Instant cannot go 40s below now are not worth
        // contorting the test for.
        let Some(long_ago) = long_ago else { return };
        ledger.last_save_at = Some(long_ago);
        assert!(!ledger.consume_recent_save(WINDOW));
        assert!(ledger.last_save_at.is_none());
    }

    #[test]
    fn test_no_save_recorded_means_no_recency() {
        let mut ledger = VersionLedger::new();
        assert!(!ledger.consume_recent_save(WINDOW));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ledger = VersionLedger::new();
        ledger.initialize(5);
        ledger.record_local_save();
        ledger.reset();
        assert_eq!(ledger.known_version(), None);
        assert!(!ledger.consume_recent_save(WINDOW));
    }
}
