//! Entry location model

use serde::{Deserialize, Serialize};

/// A place attached to a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLocation {
    /// Human-readable place name as shown in the picker.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl EntryLocation {
    /// Create a location with a trimmed display name.
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_trims_name() {
        let location = EntryLocation::new(" Cafe Brumas ", -23.55, -46.63);
        assert_eq!(location.name, "Cafe Brumas");
    }

    #[test]
    fn test_location_structural_equality() {
        let a = EntryLocation::new("Cafe Brumas", -23.55, -46.63);
        let b = EntryLocation::new("Cafe Brumas", -23.55, -46.63);
        let c = EntryLocation::new("Cafe Brumas", -23.55, -46.64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
