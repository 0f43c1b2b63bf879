//! Mapping entity: one short code pointing at one destination URL.

use chrono::{DateTime, Utc};

/// A stored association between a short code and a destination URL.
///
/// Mappings are created once by the registration service and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: i64,
    pub code: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(id: i64, code: String, destination: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            destination,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub code: String,
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = Mapping::new(
            1,
            "aB3dE".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.code, "aB3dE");
        assert_eq!(mapping.destination, "https://example.com");
        assert_eq!(mapping.created_at, now);
    }
}
