//! [Layers](GeoLayer) are raster tile sources or sets of vector features shown on the map.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use gview_types::Bounds;
use uuid::Uuid;

use crate::error::GviewError;

mod feature;
mod feature_set;
mod field_index;
mod tile_source;

pub use feature::{property_key, Feature, Properties};
pub use feature_set::FeatureSet;
pub use field_index::FieldIndex;
pub use tile_source::TileSource;

/// Unique identifier of a layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Generates a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag of a layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Raster tile source.
    Source,
    /// Vector features.
    Feature,
}

/// Data of a layer, depending on its type.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Raster tiles loaded from a URL template.
    Source(TileSource),
    /// Vector features. The set is shared between copies of the layer.
    Feature(Arc<FeatureSet>),
}

/// A map layer.
///
/// Layers are immutable: their id, name, source key and data never change after construction.
/// Whether a layer is shown and how it is styled is stored next to it in the
/// [`LayerStore`](crate::LayerStore).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLayer {
    id: LayerId,
    name: String,
    source_key: String,
    kind: LayerKind,
}

impl GeoLayer {
    /// Creates a raster tile source layer. The URL template is used as the source key.
    pub fn tile_source(
        name: impl Into<String>,
        url_template: impl Into<String>,
        min_zoom: u32,
        max_zoom: u32,
    ) -> Result<Self, GviewError> {
        let name = validate_name(name.into())?;
        let source = TileSource::new(url_template, min_zoom, max_zoom)?;

        log::debug!("New tile layer {name} from {}", source.url_template());

        Ok(Self {
            id: LayerId::new(),
            name,
            source_key: source.url_template().to_string(),
            kind: LayerKind::Source(source),
        })
    }

    /// Creates a feature layer. Bounds and the field index are computed here, once.
    ///
    /// `source_key` identifies where the features come from (file path, URL) and is used to avoid
    /// loading the same source twice.
    pub fn features(
        name: impl Into<String>,
        source_key: impl Into<String>,
        features: Vec<Feature>,
    ) -> Result<Self, GviewError> {
        let name = validate_name(name.into())?;
        let set = FeatureSet::new(features)?;

        log::debug!("New layer {name} with bounds {:?}", set.bounds());

        Ok(Self {
            id: LayerId::new(),
            name,
            source_key: source_key.into(),
            kind: LayerKind::Feature(Arc::new(set)),
        })
    }

    /// Copy of the layer with a new id and name. The data and the source key are shared with the
    /// original.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, GviewError> {
        Ok(Self {
            id: LayerId::new(),
            name: validate_name(name.into())?,
            source_key: self.source_key.clone(),
            kind: self.kind.clone(),
        })
    }

    /// Id of the layer.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Display name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the source the layer was loaded from.
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Data of the layer.
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Type tag of the layer.
    pub fn layer_type(&self) -> LayerType {
        match self.kind {
            LayerKind::Source(_) => LayerType::Source,
            LayerKind::Feature(_) => LayerType::Feature,
        }
    }

    /// Bounds of the layer. Tile sources cover the whole world and have no bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.feature_set().map(|set| set.bounds())
    }

    /// Features of the layer, if it is a feature layer.
    pub fn feature_set(&self) -> Option<&FeatureSet> {
        match &self.kind {
            LayerKind::Source(_) => None,
            LayerKind::Feature(set) => Some(set.as_ref()),
        }
    }

    /// Distinct property values of the features, if it is a feature layer.
    pub fn field_index(&self) -> Option<&FieldIndex> {
        self.feature_set().map(FeatureSet::field_index)
    }
}

fn validate_name(name: String) -> Result<String, GviewError> {
    if name.trim().is_empty() {
        Err(GviewError::Construction("layer name cannot be empty".into()))
    } else {
        Ok(name)
    }
}
