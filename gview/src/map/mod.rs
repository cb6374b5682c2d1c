use std::sync::Arc;

use gview_types::Size;

use crate::config::GviewConfig;
use crate::error::GviewError;
use crate::layer::{GeoLayer, LayerId};
use crate::messenger::Messenger;
use crate::projection::FitParams;
use crate::random::{OsRandom, RandomSource};
use crate::style::{Style, StyleEngine};
use crate::view::ViewState;

mod layer_store;

pub use layer_store::LayerStore;

/// Change of the layer collection, applied with [`Map::dispatch`].
#[derive(Debug, Clone)]
pub enum LayerAction {
    /// [`LayerStore::add`]
    Add(GeoLayer),
    /// [`LayerStore::add_unique`]
    AddUnique(GeoLayer),
    /// [`LayerStore::remove`]
    Remove(LayerId),
    /// [`LayerStore::replace`]
    Replace {
        /// Layer to remove.
        old: LayerId,
        /// Layer to put at its place.
        new: GeoLayer,
    },
    /// [`LayerStore::reorder`]
    Reorder {
        /// Current index of the layer.
        from: usize,
        /// Target index of the layer.
        to: usize,
    },
    /// [`LayerStore::toggle_active`]
    ToggleActive(LayerId),
    /// [`LayerStore::set_style`]
    SetStyle {
        /// Layer to change.
        id: LayerId,
        /// New style.
        style: Style,
    },
}

/// Map specifies a set of layers, and the view that should be rendered.
///
/// The map is the only owner of its [`LayerStore`]. All changes go through [`Map::dispatch`] one at
/// a time, and every change that modifies the store or the view requests a redraw through the
/// [`Messenger`].
pub struct Map {
    view: ViewState,
    layers: LayerStore,
    messenger: Option<Box<dyn Messenger>>,
    viewport: Size,
    fit: FitParams,
}

impl Map {
    /// Creates a new empty map with OS random generator for default styles.
    pub fn new(config: &GviewConfig) -> Self {
        Self::with_random(config, Arc::new(OsRandom))
    }

    /// Creates a new empty map taking random style colors from `random`.
    pub fn with_random(config: &GviewConfig, random: Arc<dyn RandomSource>) -> Self {
        let engine = StyleEngine::new(random).with_default_opacity(config.default_opacity);
        Self {
            view: config.initial_view,
            layers: LayerStore::new(engine),
            messenger: None,
            viewport: config.viewport,
            fit: config.fit,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns the collection of map's layers.
    pub fn layers(&self) -> &LayerStore {
        &self.layers
    }

    /// Size of the map viewport in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
        self.redraw();
    }

    /// Set the size of the map viewport in pixels.
    pub fn set_size(&mut self, new_size: Size) {
        self.viewport = new_size;
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Sets the new event messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }

    /// Applies the action to the layer store.
    ///
    /// Returns `Ok(true)` if the store was changed, and `Ok(false)` for an
    /// [`AddUnique`](LayerAction::AddUnique) of an already loaded source. Rejected style changes
    /// return an error and leave the store as it was.
    ///
    /// # Panics
    ///
    /// Panics if the action references a layer that is not in the store, or an index out of
    /// bounds. See [`LayerStore`].
    pub fn dispatch(&mut self, action: LayerAction) -> Result<bool, GviewError> {
        let changed = match action {
            LayerAction::Add(layer) => {
                self.layers.add(layer);
                true
            }
            LayerAction::AddUnique(layer) => self.layers.add_unique(layer).is_some(),
            LayerAction::Remove(id) => {
                self.layers.remove(id);
                true
            }
            LayerAction::Replace { old, new } => {
                self.layers.replace(old, new);
                true
            }
            LayerAction::Reorder { from, to } => {
                self.layers.reorder(from, to);
                from != to
            }
            LayerAction::ToggleActive(id) => {
                self.layers.toggle_active(id);
                true
            }
            LayerAction::SetStyle { id, style } => {
                self.layers.set_style(id, style)?;
                true
            }
        };

        if changed {
            self.redraw();
        }

        Ok(changed)
    }

    /// Moves the view to show the whole layer. Layers without bounds do not change the view.
    ///
    /// # Panics
    ///
    /// Panics if the layer is not in the store.
    pub fn focus_layer(&mut self, id: LayerId) {
        let Some(layer) = self.layers.layer(id) else {
            panic!("layer {id} is not in the store");
        };

        let view = self.view.focus_layer(layer, self.viewport, &self.fit);
        if view != self.view {
            self.set_view(view);
        }
    }
}
