//! Data models for Loam

mod entry;
mod location;
mod media;
mod origin;
mod settings;

pub use entry::{extract_hashtags, Entry, EntryDraft, EntryId, EntryStatus};
pub use location::EntryLocation;
pub use media::{MediaId, QueuedMedia};
pub use origin::DeviceOrigin;
pub use settings::JournalSettings;
