//! The versioned document model.

use serde::{Deserialize, Serialize};

/// The versioned payload: one scalar plus an identified feature list.
///
/// `features` keeps insertion order in storage; display order is a
/// separately computed view ([`Document::features_sorted`]) and is not
/// an invariant of storage order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Scalar counter. Not part of the baseline schema; defaults to 0.
    #[serde(default)]
    pub count: i64,
    /// Identified records, in insertion order.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Document {
    /// An empty document (`count` 0, no features).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a fetched baseline payload. The baseline
    /// carries no `count`, so it starts at 0.
    pub fn from_baseline(payload: BaselinePayload) -> Self {
        Self {
            count: 0,
            features: payload.features,
        }
    }

    /// The wire payload for publishing this document as a baseline.
    /// `count` is never persisted to the baseline store.
    pub fn to_baseline(&self) -> BaselinePayload {
        BaselinePayload {
            features: self.features.clone(),
        }
    }

    /// Look up a feature by id.
    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Features sorted by id, for display. Storage order is untouched.
    pub fn features_sorted(&self) -> Vec<Feature> {
        let mut sorted = self.features.clone();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }
}

/// Wire shape of the baseline resource: features only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselinePayload {
    pub features: Vec<Feature>,
}

/// An identified record. `id` is the diff identity; every other field is
/// comparison payload.
///
/// The card attributes are optional and only serialized when present;
/// the plain variant of the document carries just `id`/`name`/
/// `description`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacks: Option<Vec<Attack>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retreat_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
}

impl Feature {
    /// Create a plain feature with no card attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            hp: None,
            kind: None,
            stage: None,
            attacks: None,
            retreat_cost: None,
            rarity: None,
            card_number: None,
            set: None,
        }
    }

    /// Set the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One attack entry of the card feature variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    #[serde(default)]
    pub cost: Vec<String>,
    #[serde(default)]
    pub damage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_feature_wire_shape() {
        let feature = Feature::new("1", "Alpha").with_description("first");
        let value = serde_json::to_value(&feature).unwrap();
        // Card attributes are absent, not null.
        assert_eq!(
            value,
            json!({"id": "1", "name": "Alpha", "description": "first"})
        );
    }

    #[test]
    fn test_card_feature_roundtrip() {
        let wire = json!({
            "id": "25",
            "name": "Sparkmouse",
            "description": "",
            "hp": 60,
            "type": "Lightning",
            "stage": "Basic",
            "attacks": [{"name": "Jolt", "cost": ["L"], "damage": "20"}],
            "retreatCost": 1,
            "rarity": "Common",
            "cardNumber": "025/102",
            "set": "Base"
        });
        let feature: Feature = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(feature.kind.as_deref(), Some("Lightning"));
        assert_eq!(feature.retreat_cost, Some(1));
        assert_eq!(serde_json::to_value(&feature).unwrap(), wire);
    }

    #[test]
    fn test_document_default_count() {
        let doc: Document = serde_json::from_value(json!({
            "features": [{"id": "1", "name": "A", "description": ""}]
        }))
        .unwrap();
        assert_eq!(doc.count, 0);
    }

    #[test]
    fn test_baseline_payload_has_no_count() {
        let doc = Document {
            count: 9,
            features: vec![Feature::new("1", "A")],
        };
        let wire = serde_json::to_value(doc.to_baseline()).unwrap();
        assert!(wire.get("count").is_none());
        assert_eq!(wire["features"][0]["id"], "1");
    }

    #[test]
    fn test_features_sorted_leaves_storage_order() {
        let doc = Document {
            count: 0,
            features: vec![
                Feature::new("3", "C"),
                Feature::new("1", "A"),
                Feature::new("2", "B"),
            ],
        };
        let sorted: Vec<_> = doc.features_sorted().into_iter().map(|f| f.id).collect();
        assert_eq!(sorted, vec!["1", "2", "3"]);
        let stored: Vec<_> = doc.features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(stored, vec!["3", "1", "2"]);
    }
}
