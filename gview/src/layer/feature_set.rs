use gview_types::Bounds;

use crate::error::GviewError;
use crate::layer::feature::Feature;
use crate::layer::field_index::FieldIndex;

/// Features of a feature layer together with the data derived from them once at construction: the
/// bounding rectangle and the [`FieldIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    features: Vec<Feature>,
    bounds: Bounds,
    field_index: FieldIndex,
}

impl FeatureSet {
    /// Builds the set, computing the bounds over all feature geometries and indexing property
    /// values.
    ///
    /// Fails with [`GviewError::Construction`] if `features` is empty, none of the features has a
    /// coordinate to compute the bounds from, or any coordinate is NaN or infinite.
    pub fn new(features: Vec<Feature>) -> Result<Self, GviewError> {
        if features.is_empty() {
            return Err(GviewError::Construction(
                "feature layer must contain at least one feature".into(),
            ));
        }

        if let Some(index) = features.iter().position(|f| {
            f.geometry().is_some_and(|g| g.points().any(|p| !p.is_finite()))
        }) {
            return Err(GviewError::Construction(format!(
                "feature {index} has a non-finite coordinate"
            )));
        }

        let bounds = features
            .iter()
            .filter_map(|f| f.geometry().and_then(|g| g.bounds()))
            .reduce(|acc, b| acc.merge(b))
            .ok_or_else(|| {
                GviewError::Construction("none of the features has coordinates".into())
            })?;

        let field_index = FieldIndex::from_features(&features);

        Ok(Self {
            features,
            bounds,
            field_index,
        })
    }

    /// Features in input order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Bounding rectangle of all feature geometries.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Distinct property values of the features.
    pub fn field_index(&self) -> &FieldIndex {
        &self.field_index
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false for a constructed set; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
