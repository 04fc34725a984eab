//! GeoJSON types for GetFeatureInfo responses
//!
//! The query engine only consumes feature ids and property bags; geometry
//! and other GeoJSON members are tolerated in the payload and ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single feature returned by a GetFeatureInfo query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    /// Property order as sent by the server; column derivation depends on it
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// The feature id as displayed text, when one is present
    pub fn id_text(&self) -> Option<String> {
        match &self.id {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Looks up a property value by key
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    /// Layer code prefix of the feature id ("pg_block.42" -> "pg_block")
    pub fn layer_code(&self) -> Option<String> {
        self.id_text()
            .and_then(|id| id.split('.').next().map(str::to_string))
    }
}

/// Root object of a GetFeatureInfo response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Renders a property value the way the information table shows it.
///
/// Strings pass through, numbers and booleans use their JSON form; null and
/// structured values count as absent.
pub fn property_display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_collection_parsing() {
        let body = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "pg_block.42",
                    "properties": {"blok": "A10", "luas": 24.5},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [112.837, -1.578]
                    }
                }
            ]
        }
        "#;

        let collection: FeatureCollection = serde_json::from_str(body).unwrap();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(feature.id_text().as_deref(), Some("pg_block.42"));
        assert_eq!(feature.layer_code().as_deref(), Some("pg_block"));
        assert_eq!(
            feature.property("blok").and_then(property_display).as_deref(),
            Some("A10")
        );
    }

    #[test]
    fn test_property_order_preserved() {
        let body = r#"{"features": [{"id": "pg_block.1", "properties": {"zulu": 1, "alpha": 2, "mike": 3}}]}"#;
        let collection: FeatureCollection = serde_json::from_str(body).unwrap();
        let keys: Vec<&String> = collection.features[0]
            .properties
            .as_ref()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_missing_members_tolerated() {
        let collection: FeatureCollection =
            serde_json::from_str(r#"{"features": [{"properties": null}]}"#).unwrap();
        let feature = &collection.features[0];
        assert_eq!(feature.id_text(), None);
        assert_eq!(feature.property("blok"), None);

        let empty: FeatureCollection = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_property_display() {
        assert_eq!(
            property_display(&Value::String("B07".into())).as_deref(),
            Some("B07")
        );
        assert_eq!(property_display(&serde_json::json!(24.5)).as_deref(), Some("24.5"));
        assert_eq!(property_display(&Value::Null), None);
        assert_eq!(property_display(&serde_json::json!({"nested": 1})), None);
    }
}
