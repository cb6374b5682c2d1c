use std::collections::{BTreeMap, BTreeSet};

use crate::layer::feature::{property_key, Feature};

/// Distinct property values observed across the features of a layer.
///
/// Maps every property key to the set of its distinct hashable values (see
/// [`property_key`]). Keys that only ever hold `null`, empty strings, arrays or objects are not
/// present in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex(BTreeMap<String, BTreeSet<String>>);

impl FieldIndex {
    /// Scans the property bags of all features.
    pub fn from_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Self {
        let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for feature in features {
            for (key, value) in feature.properties() {
                let Some(value) = property_key(value) else {
                    continue;
                };

                index.entry(key.clone()).or_default().insert(value);
            }
        }

        Self(index)
    }

    /// Returns true if at least one feature has a hashable value for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Distinct values of `key`, if the key is indexed.
    pub fn values(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.0.get(key)
    }

    /// Indexed keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Number of indexed keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no key is indexed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
