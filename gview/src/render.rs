//! Contracts between the layer collection and the code that draws it.

use crate::layer::{GeoLayer, Properties};
use crate::style::Style;

/// Draws layers.
///
/// [`LayerStore::render`](crate::LayerStore::render) calls [`LayerRenderer::draw`] once for each
/// active layer, starting with the bottom-most one, so later layers are drawn over earlier ones.
pub trait LayerRenderer {
    /// Draws one layer with the given style.
    ///
    /// Style getters are evaluated per feature with
    /// [`Getter::evaluate`](crate::style::Getter::evaluate).
    fn draw(&mut self, layer: &GeoLayer, style: &Style);
}

/// Receives the properties of the feature under the pointer.
pub trait HoverHandler {
    /// Called when the pointer moves over a feature. `None` means the pointer left all features.
    fn on_hover(&mut self, properties: Option<&Properties>);
}
