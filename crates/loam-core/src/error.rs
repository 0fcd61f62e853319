//! Error types for loam-core

use thiserror::Error;

/// Result type alias using loam-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in loam-core operations
///
/// Stale deliveries and detected conflicts are deliberately absent: both are
/// resolved inside the session and surface as state plus notifications, never
/// as errors. Only save failures and caller-misuse guards cross the boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A save was requested while another save is still in flight
    #[error("A save is already in progress for this session")]
    SaveInProgress,

    /// A save was requested before the awaited entry finished loading
    #[error("No entry is loaded in this session")]
    NotLoaded,
}
