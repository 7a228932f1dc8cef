use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Keys that belong to the typed listing columns and can never be carried
/// as descriptive fields.
pub const RESERVED_FIELDS: &[&str] = &[
    "id",
    "owner",
    "ownerId",
    "active",
    "createdAt",
    "volume",
    "minVolume",
    "partialOk",
];

/// Opaque principal reference. Only the identifier is ever read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
}

/// A listing as loaded from storage, owner relation included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub owner: User,
    pub active: bool,
    pub volume: f64,
    pub min_volume: f64,
    pub partial_ok: bool,
    /// Descriptive fields accepted verbatim at creation
    pub details: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Inactive listings are only visible to their owner.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.active || self.owner.id == user_id
    }
}

/// Insert command for a listing.
///
/// There is no `active` field: every store persists new listings as active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub owner: User,
    pub volume: f64,
    pub min_volume: f64,
    pub partial_ok: bool,
    pub details: Map<String, Value>,
}

/// Drop reserved keys from a set of descriptive fields
pub fn strip_reserved(mut details: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_FIELDS {
        details.remove(*key);
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(active: bool, owner: Uuid) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            owner: User { id: owner },
            active,
            volume: 10.0,
            min_volume: 10.0,
            partial_ok: false,
            details: Map::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(listing(true, owner).is_visible_to(stranger));
        assert!(listing(false, owner).is_visible_to(owner));
        assert!(!listing(false, owner).is_visible_to(stranger));
    }

    #[test]
    fn test_strip_reserved() {
        let details = json!({
            "title": "Spot cargo",
            "ownerId": "someone-else",
            "owner": { "id": "someone-else" },
            "active": false,
            "id": "fixed"
        });
        let Value::Object(map) = details else { unreachable!() };

        let stripped = strip_reserved(map);

        assert_eq!(stripped.len(), 1);
        assert_eq!(stripped.get("title"), Some(&json!("Spot cargo")));
    }
}
