//! See [`Feature`].

use gview_types::Geom;
use serde_json::Value;

/// Property bag of a feature.
///
/// Uses the same JSON object representation as GeoJSON features, so property values can be strings,
/// numbers, booleans, `null` or nested arrays and objects.
pub type Properties = serde_json::Map<String, Value>;

/// A feature is one geometry with a property bag, the atomic unit of a feature layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    geometry: Option<Geom>,
    properties: Properties,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(geometry: impl Into<Geom>, properties: Properties) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties,
        }
    }

    /// Creates a feature with no geometry. Such features are kept in the layer but do not
    /// contribute to its bounds.
    pub fn without_geometry(properties: Properties) -> Self {
        Self {
            geometry: None,
            properties,
        }
    }

    /// Geometry of the feature, if it has one.
    pub fn geometry(&self) -> Option<&Geom> {
        self.geometry.as_ref()
    }

    /// Property bag of the feature.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Hashable value of the property `key`, see [`property_key`].
    pub fn property_key(&self, key: &str) -> Option<String> {
        self.properties.get(key).and_then(property_key)
    }
}

/// Canonical string form of a property value used by field indices and style memo tables.
///
/// Non-empty strings are used verbatim, numbers and booleans are converted to their JSON text.
/// `null`, empty strings, arrays and objects have no key.
pub fn property_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::props;
    use gview_types::GeoPoint2d;
    use serde_json::json;

    #[test]
    fn hashable_property_values() {
        assert_eq!(property_key(&json!("forest")), Some("forest".to_string()));
        assert_eq!(property_key(&json!(42)), Some("42".to_string()));
        assert_eq!(property_key(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(property_key(&json!(true)), Some("true".to_string()));

        assert_eq!(property_key(&json!("")), None);
        assert_eq!(property_key(&json!(null)), None);
        assert_eq!(property_key(&json!([1, 2])), None);
        assert_eq!(property_key(&json!({"a": 1})), None);
    }

    #[test]
    fn feature_property_lookup() {
        let feature = Feature::new(
            GeoPoint2d::lonlat(1.0, 2.0),
            props(json!({"kind": "road", "lanes": 2})),
        );
        assert_eq!(feature.property_key("kind"), Some("road".to_string()));
        assert_eq!(feature.property_key("lanes"), Some("2".to_string()));
        assert_eq!(feature.property_key("missing"), None);
        assert!(feature.geometry().is_some());
    }
}
