use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Request to create a listing
///
/// Anything besides the typed fields is kept as a descriptive field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[validate(range(min = 0.0))]
    pub volume: f64,
    #[validate(range(min = 0.0))]
    pub min_volume: f64,
    /// Absent and `null` both mean no partial fills
    #[serde(default)]
    pub partial_ok: Option<bool>,
    /// Includes any client-supplied `active`, which is ignored: new listings
    /// are always active.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CreateListingRequest {
    /// Partial fills aside, the full volume must be the minimum fill.
    pub fn satisfies_min_volume(&self) -> bool {
        self.partial_fills_allowed() || self.volume == self.min_volume
    }

    pub fn partial_fills_allowed(&self) -> bool {
        self.partial_ok.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_defaults() {
        let req: CreateListingRequest = serde_json::from_value(json!({
            "volume": 10,
            "minVolume": 10,
            "title": "Crude, Rotterdam"
        }))
        .unwrap();

        assert!(!req.partial_fills_allowed());
        assert_eq!(req.details.get("title"), Some(&json!("Crude, Rotterdam")));
        assert!(!req.details.contains_key("volume"));
    }

    #[test]
    fn test_min_volume_rule() {
        let mut req: CreateListingRequest = serde_json::from_value(json!({
            "volume": 7,
            "minVolume": 10
        }))
        .unwrap();
        assert!(!req.satisfies_min_volume());

        req.partial_ok = Some(true);
        assert!(req.satisfies_min_volume());
    }

    #[test]
    fn test_null_partial_ok_means_no_partial_fills() {
        let req: CreateListingRequest = serde_json::from_value(json!({
            "volume": 7,
            "minVolume": 10,
            "partialOk": null
        }))
        .unwrap();

        assert_eq!(req.partial_ok, None);
        assert!(!req.satisfies_min_volume());
    }

    #[test]
    fn test_any_active_value_is_accepted() {
        let req: CreateListingRequest = serde_json::from_value(json!({
            "volume": 7,
            "minVolume": 7,
            "active": "no"
        }))
        .unwrap();

        assert_eq!(req.details.get("active"), Some(&json!("no")));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_negative_volume_rejected() {
        let req: CreateListingRequest = serde_json::from_value(json!({
            "volume": -1,
            "minVolume": -1
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
