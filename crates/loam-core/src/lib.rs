//! loam-core - Core library for Loam
//!
//! This crate contains the entry models and the editing consistency engine
//! shared by all Loam interfaces: the session that owns an in-progress edit,
//! tracks divergence from the last saved baseline, and decides what happens
//! when the same entry changes on another device.

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod session;
pub mod store;
pub mod surface;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use models::{Entry, EntryDraft, EntryId};
pub use session::EditSession;
