//! Gview is the layer, style and viewport model of a map viewer. It keeps an ordered collection of
//! raster tile sources and vector feature layers, generates a default style for every layer,
//! and computes the camera position that shows a layer as a whole.
//!
//! # Quick start
//!
//! ```
//! use gview::{GeoLayer, GviewConfig, LayerAction, Map};
//! use gview::layer::Feature;
//! use gview::gview_types::latlon;
//! use serde_json::Map as Properties;
//!
//! let config = GviewConfig::default();
//! let mut map = Map::new(&config);
//!
//! let osm = GeoLayer::tile_source("OSM", "https://tile.openstreetmap.org/{z}/{x}/{y}.png", 0, 19)
//!     .expect("invalid tile source");
//! let cities = GeoLayer::features(
//!     "Cities",
//!     "cities.geojson",
//!     vec![
//!         Feature::new(latlon!(55.75, 37.62), Properties::new()),
//!         Feature::new(latlon!(59.94, 30.31), Properties::new()),
//!     ],
//! )
//! .expect("invalid layer");
//! let cities_id = cities.id();
//!
//! map.dispatch(LayerAction::Add(osm)).expect("failed to add layer");
//! map.dispatch(LayerAction::Add(cities)).expect("failed to add layer");
//! map.focus_layer(cities_id);
//!
//! assert_eq!(map.layers().ordered()[0], cities_id);
//! assert_eq!(map.view().pitch, 0.0);
//! ```
//!
//! # Main components
//!
//! * [`GeoLayer`] is an immutable layer: a [tile source](layer::TileSource) or a
//!   [set of features](layer::FeatureSet) with its bounds and [field index](layer::FieldIndex).
//! * [`Style`](style::Style) describes how a layer is drawn. Colors and sizes are
//!   [getters](style::Getter): constants or values derived from feature properties. Default
//!   styles come from the [`StyleEngine`](style::StyleEngine).
//! * [`LayerStore`] holds the layers in render order with their active flags and styles.
//! * [`Map`] owns the store and the [`ViewState`], applies [`LayerAction`]s and notifies the
//!   application through a [`Messenger`].
//! * [`ingest`] loads layers from files and from the query string of the viewer URL.
//! * [`LayerRenderer`](render::LayerRenderer) is implemented by the drawing code.

pub mod color;
pub mod config;
pub mod error;
pub mod ingest;
pub mod layer;
mod map;
mod messenger;
pub mod projection;
pub mod random;
pub mod render;
pub mod style;
mod view;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use config::GviewConfig;
pub use error::GviewError;
pub use layer::{GeoLayer, LayerId, LayerType};
pub use map::{LayerAction, LayerStore, Map};
pub use messenger::{CountingMessenger, Messenger};
pub use view::{ViewState, FOCUS_TRANSITION};

// Reexport gview_types
pub use gview_types;
