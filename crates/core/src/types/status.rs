//! Catalog classification enums.

use serde::{Deserialize, Serialize};

/// Kind of publication in the catalog.
///
/// Maps to the backend's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationType {
    #[default]
    Magazine,
    Newspaper,
    /// A kind this client does not know about yet.
    #[serde(other)]
    Other,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&PublicationType::Newspaper).unwrap(),
            "\"NEWSPAPER\""
        );
        let parsed: PublicationType = serde_json::from_str("\"MAGAZINE\"").unwrap();
        assert_eq!(parsed, PublicationType::Magazine);
    }

    #[test]
    fn test_unknown_publication_type() {
        let parsed: PublicationType = serde_json::from_str("\"JOURNAL\"").unwrap();
        assert_eq!(parsed, PublicationType::Other);
    }
}
