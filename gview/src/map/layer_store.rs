use ahash::{HashMap, HashMapExt};

use crate::error::GviewError;
use crate::layer::{Feature, GeoLayer, LayerId};
use crate::render::{HoverHandler, LayerRenderer};
use crate::style::{Style, StyleEngine};

/// Ordered collection of layers with their active flags and styles.
///
/// Index 0 of the order is the top-most layer. Every layer in the store has exactly one active flag
/// and one style. All of them are added and removed together by the store operations, so they can
/// never get out of sync.
///
/// Operations that reference a layer by id panic if the layer is not in the store. Such a call is
/// a bug in the caller. The check is done before anything is changed.
///
/// ```
/// use gview::{GeoLayer, LayerStore};
///
/// let mut store = LayerStore::default();
/// let osm = GeoLayer::tile_source("OSM", "https://tile.openstreetmap.org/{z}/{x}/{y}.png", 0, 19)
///     .expect("invalid layer");
/// let id = store.add(osm);
///
/// assert_eq!(store.ordered(), &[id]);
/// assert_eq!(store.is_active(id), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    order: Vec<LayerId>,
    layers: HashMap<LayerId, GeoLayer>,
    active: HashMap<LayerId, bool>,
    styles: HashMap<LayerId, Style>,
    style_engine: StyleEngine,
}

impl LayerStore {
    /// Creates an empty store generating default styles with the given engine.
    pub fn new(style_engine: StyleEngine) -> Self {
        Self {
            order: Vec::new(),
            layers: HashMap::new(),
            active: HashMap::new(),
            styles: HashMap::new(),
            style_engine,
        }
    }

    /// Engine used for default styles.
    pub fn style_engine(&self) -> &StyleEngine {
        &self.style_engine
    }

    /// Adds the layer on top of all other layers. The layer is active and gets a new default
    /// style.
    ///
    /// # Panics
    ///
    /// Panics if a layer with the same id is already in the store.
    pub fn add(&mut self, layer: GeoLayer) -> LayerId {
        let id = layer.id();
        self.assert_absent(id);

        self.insert_at(0, layer);
        id
    }

    /// Same as [`LayerStore::add`], but does nothing if the store already has a layer with the same
    /// source key. Returns `None` in that case.
    pub fn add_unique(&mut self, layer: GeoLayer) -> Option<LayerId> {
        if self.contains_source(layer.source_key()) {
            log::debug!(
                "Layer {} skipped: source {} is already loaded",
                layer.name(),
                layer.source_key()
            );
            return None;
        }

        Some(self.add(layer))
    }

    /// Removes the layer with its active flag and style, and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the layer is not in the store.
    pub fn remove(&mut self, id: LayerId) -> GeoLayer {
        let index = self.index_of(id);
        self.remove_at(index)
    }

    /// Removes the layer `old` and puts `new` at its position. The new layer is active and gets a
    /// new default style: nothing is carried over from the old layer.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not in the store, or if the id of `new` is in the store and is not `old`.
    pub fn replace(&mut self, old: LayerId, new: GeoLayer) -> GeoLayer {
        let index = self.index_of(old);
        if new.id() != old {
            self.assert_absent(new.id());
        }

        let removed = self.remove_at(index);
        self.insert_at(index, new);
        removed
    }

    /// Moves the layer at `from` so it ends up at index `to`. The other layers keep their relative
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use gview::{GeoLayer, LayerStore};
    ///
    /// let mut store = LayerStore::default();
    /// let ids: Vec<_> = ["d", "c", "b", "a"]
    ///     .into_iter()
    ///     .map(|name| {
    ///         let url = format!("https://{name}/{{z}}/{{x}}/{{y}}.png");
    ///         store.add(GeoLayer::tile_source(name, url, 0, 19).expect("invalid layer"))
    ///     })
    ///     .collect();
    /// let (a, b, c, d) = (ids[3], ids[2], ids[1], ids[0]);
    /// assert_eq!(store.ordered(), &[a, b, c, d]);
    ///
    /// store.reorder(0, 2);
    /// assert_eq!(store.ordered(), &[b, c, a, d]);
    /// ```
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.order.len();
        assert!(from < len, "reorder source index {from} is out of bounds ({len})");
        assert!(to < len, "reorder target index {to} is out of bounds ({len})");

        let id = self.order.remove(from);
        self.order.insert(to, id);
    }

    /// Flips the active flag of the layer. Inactive layers keep their place and style but are not
    /// rendered.
    ///
    /// # Panics
    ///
    /// Panics if the layer is not in the store.
    pub fn toggle_active(&mut self, id: LayerId) {
        self.index_of(id);
        if let Some(active) = self.active.get_mut(&id) {
            *active = !*active;
        }
    }

    /// Replaces the style of the layer.
    ///
    /// The style must pass [`Style::validate`] and be of the variant matching the layer type,
    /// otherwise [`GviewError::InvalidStyle`] is returned and the store is not changed.
    ///
    /// # Panics
    ///
    /// Panics if the layer is not in the store.
    pub fn set_style(&mut self, id: LayerId, style: Style) -> Result<(), GviewError> {
        let index = self.index_of(id);
        let layer = self.layer_at(index);
        if style.layer_type() != layer.layer_type() {
            return Err(GviewError::InvalidStyle(format!(
                "{:?} style cannot be applied to {:?} layer {}",
                style.layer_type(),
                layer.layer_type(),
                layer.name()
            )));
        }
        style.validate()?;

        self.styles.insert(id, style);
        Ok(())
    }

    /// Ids of all layers, top-most first.
    pub fn ordered(&self) -> &[LayerId] {
        &self.order
    }

    /// Layer with the given id.
    pub fn layer(&self, id: LayerId) -> Option<&GeoLayer> {
        self.layers.get(&id)
    }

    /// Whether the layer is active, or `None` if it is not in the store.
    pub fn is_active(&self, id: LayerId) -> Option<bool> {
        self.active.get(&id).copied()
    }

    /// Style of the layer.
    pub fn style(&self, id: LayerId) -> Option<&Style> {
        self.styles.get(&id)
    }

    /// Position of the layer in the order, 0 being the top-most.
    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.order.iter().position(|v| *v == id)
    }

    /// Returns true if a layer loaded from `source_key` is in the store.
    pub fn contains_source(&self, source_key: &str) -> bool {
        self.layers
            .values()
            .any(|layer| layer.source_key() == source_key)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the store has no layers.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over all layers with their active flags and styles, top-most first.
    pub fn iter(&self) -> impl Iterator<Item = (&GeoLayer, bool, &Style)> + '_ {
        self.order.iter().filter_map(|id| {
            Some((
                self.layers.get(id)?,
                *self.active.get(id)?,
                self.styles.get(id)?,
            ))
        })
    }

    /// Iterates over active layers with their styles, top-most first.
    pub fn iter_active(&self) -> impl Iterator<Item = (&GeoLayer, &Style)> + '_ {
        self.iter()
            .filter(|(_, active, _)| *active)
            .map(|(layer, _, style)| (layer, style))
    }

    /// Draws all active layers, starting with the bottom-most one.
    pub fn render(&self, renderer: &mut dyn LayerRenderer) {
        let layers: Vec<_> = self.iter_active().collect();
        for (layer, style) in layers.into_iter().rev() {
            renderer.draw(layer, style);
        }
    }

    /// Feature at `index` of a feature layer.
    pub fn feature(&self, id: LayerId, index: usize) -> Option<&Feature> {
        self.layer(id)?.feature_set()?.features().get(index)
    }

    /// Passes the properties of the feature at `index` of the layer to the hover handler, or
    /// `None` if there is no such feature.
    pub fn hover(&self, id: LayerId, index: usize, handler: &mut dyn HoverHandler) {
        handler.on_hover(self.feature(id, index).map(Feature::properties));
    }

    fn index_of(&self, id: LayerId) -> usize {
        match self.position(id) {
            Some(index) => index,
            None => panic!("layer {id} is not in the store"),
        }
    }

    fn assert_absent(&self, id: LayerId) {
        assert!(
            !self.layers.contains_key(&id),
            "layer {id} is already in the store"
        );
    }

    fn layer_at(&self, index: usize) -> &GeoLayer {
        let id = self.order[index];
        match self.layers.get(&id) {
            Some(layer) => layer,
            None => panic!("layer {id} is in the order but has no entry"),
        }
    }

    fn insert_at(&mut self, index: usize, layer: GeoLayer) {
        let id = layer.id();
        let style = self.style_engine.default_style(&layer);

        log::debug!("Adding layer {} ({id}) at position {index}", layer.name());

        self.order.insert(index, id);
        self.active.insert(id, true);
        self.styles.insert(id, style);
        self.layers.insert(id, layer);
    }

    fn remove_at(&mut self, index: usize) -> GeoLayer {
        let layer = self.layer_at(index).clone();
        let id = layer.id();

        log::debug!("Removing layer {} ({id})", layer.name());

        self.order.remove(index);
        self.active.remove(&id);
        self.styles.remove(&id);
        self.layers.remove(&id);
        layer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::layer::{LayerType, Properties};
    use crate::random::FixedSequence;
    use crate::style::{FeatureStyle, SourceStyle};
    use crate::tests::{feature_layer, tile_layer};
    use assert_matches::assert_matches;
    use serde_json::json;

    type Snapshot = (Vec<LayerId>, Vec<(LayerId, bool)>, Vec<(LayerId, Style)>);

    fn snapshot(store: &LayerStore) -> Snapshot {
        let mut active: Vec<_> = store.active.iter().map(|(id, v)| (*id, *v)).collect();
        active.sort_by_key(|(id, _)| *id);
        let mut styles: Vec<_> = store
            .styles
            .iter()
            .map(|(id, style)| (*id, style.clone()))
            .collect();
        styles.sort_by_key(|(id, _)| *id);
        (store.order.clone(), active, styles)
    }

    fn assert_consistent(store: &LayerStore) {
        assert_eq!(store.layers.len(), store.order.len());
        assert_eq!(store.active.len(), store.order.len());
        assert_eq!(store.styles.len(), store.order.len());
        for id in &store.order {
            assert!(store.layers.contains_key(id));
            assert!(store.active.contains_key(id));
            assert!(store.styles.contains_key(id));
        }
    }

    fn store_with(names: &[&str]) -> (LayerStore, Vec<LayerId>) {
        let mut store = LayerStore::new(StyleEngine::new(Arc::new(FixedSequence::new(0..1000))));
        let mut ids: Vec<_> = names
            .iter()
            .rev()
            .map(|name| store.add(tile_layer(name)))
            .collect();
        ids.reverse();
        (store, ids)
    }

    #[test]
    fn add_prepends() {
        let (mut store, ids) = store_with(&["a", "b"]);
        assert_eq!(store.ordered(), &ids[..]);

        let c = store.add(feature_layer("c", "c.geojson", &[json!({})]));
        assert_eq!(store.ordered(), &[c, ids[0], ids[1]]);
        assert_eq!(store.is_active(c), Some(true));
        assert_eq!(store.style(c).map(Style::layer_type), Some(LayerType::Feature));
        assert_consistent(&store);
    }

    #[test]
    fn add_then_remove_restores_state() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.toggle_active(ids[1]);
        let before = snapshot(&store);

        let layer = feature_layer("d", "d.geojson", &[json!({"fill": "red"})]);
        let id = store.add(layer.clone());
        let removed = store.remove(id);

        assert_eq!(removed, layer);
        assert_eq!(snapshot(&store), before);
        assert!(store.layer(id).is_none());
        assert_consistent(&store);
    }

    #[test]
    fn add_unique_skips_loaded_sources() {
        let (mut store, _) = store_with(&["a"]);
        let first = feature_layer("x", "x.geojson", &[json!({})]);
        let second = feature_layer("x again", "x.geojson", &[json!({})]);

        assert!(store.add_unique(first).is_some());
        assert!(store.add_unique(second).is_none());
        assert_eq!(store.len(), 2);
        assert!(store.add_unique(tile_layer("a")).is_none());
        assert_consistent(&store);
    }

    #[test]
    fn reorder_moves_one_layer() {
        let (mut store, ids) = store_with(&["a", "b", "c", "d"]);
        store.reorder(0, 2);
        assert_eq!(store.ordered(), &[ids[1], ids[2], ids[0], ids[3]]);

        store.reorder(3, 0);
        assert_eq!(store.ordered(), &[ids[3], ids[1], ids[2], ids[0]]);

        store.reorder(1, 1);
        assert_eq!(store.ordered(), &[ids[3], ids[1], ids[2], ids[0]]);
        assert_consistent(&store);
    }

    #[test]
    fn replace_keeps_position_with_fresh_style() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        let old = ids[1];
        store.toggle_active(old);
        store
            .set_style(old, SourceStyle { opacity: 0.3 }.into())
            .expect("invalid style");

        let new = store.layer(old).expect("no layer").renamed("b2").expect("invalid name");
        let new_id = new.id();
        let removed = store.replace(old, new);

        assert_eq!(removed.id(), old);
        assert_eq!(store.ordered(), &[ids[0], new_id, ids[2]]);
        assert!(store.layer(old).is_none());
        assert!(store.is_active(old).is_none());
        assert!(store.style(old).is_none());
        assert_eq!(store.is_active(new_id), Some(true));
        assert_eq!(store.style(new_id), Some(&Style::Source(SourceStyle { opacity: 0.8 })));
        assert_eq!(store.layer(new_id).map(GeoLayer::name), Some("b2"));
        assert_consistent(&store);
    }

    #[test]
    fn toggle_changes_only_the_flag() {
        let (mut store, ids) = store_with(&["a", "b"]);
        let style = store.style(ids[0]).cloned();

        store.toggle_active(ids[0]);
        assert_eq!(store.is_active(ids[0]), Some(false));
        assert_eq!(store.is_active(ids[1]), Some(true));
        assert_eq!(store.style(ids[0]).cloned(), style);
        assert_eq!(store.ordered(), &ids[..]);

        store.toggle_active(ids[0]);
        assert_eq!(store.is_active(ids[0]), Some(true));
    }

    #[test]
    fn set_style_validates() {
        let (mut store, ids) = store_with(&["a"]);
        let feature_id = store.add(feature_layer("f", "f.geojson", &[json!({})]));

        assert_matches!(
            store.set_style(ids[0], FeatureStyle::new(0.5).into()),
            Err(GviewError::InvalidStyle(_))
        );
        assert_matches!(
            store.set_style(ids[0], SourceStyle { opacity: 2.0 }.into()),
            Err(GviewError::InvalidStyle(_))
        );
        assert_eq!(store.style(ids[0]).map(Style::opacity), Some(0.8));

        let style: Style = FeatureStyle::new(0.1).with_extruded(false).into();
        store.set_style(feature_id, style.clone()).expect("invalid style");
        assert_eq!(store.style(feature_id), Some(&style));
    }

    #[test]
    #[should_panic]
    fn remove_unknown_layer_panics() {
        let (mut store, _) = store_with(&["a"]);
        store.remove(LayerId::new());
    }

    #[test]
    fn failed_lookup_leaves_store_untouched() {
        let (store, _) = store_with(&["a", "b"]);
        let before = snapshot(&store);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut copy = store.clone();
            copy.replace(LayerId::new(), tile_layer("c"));
            copy
        }));
        assert!(result.is_err());
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    #[should_panic]
    fn reorder_out_of_bounds_panics() {
        let (mut store, _) = store_with(&["a", "b"]);
        store.reorder(0, 2);
    }

    #[test]
    #[should_panic]
    fn adding_same_layer_twice_panics() {
        let (mut store, _) = store_with(&[]);
        let layer = tile_layer("a");
        store.add(layer.clone());
        store.add(layer);
    }

    struct Recorder(Vec<String>);

    impl LayerRenderer for Recorder {
        fn draw(&mut self, layer: &GeoLayer, _style: &Style) {
            self.0.push(layer.name().to_string());
        }
    }

    #[test]
    fn render_draws_active_layers_bottom_first() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.toggle_active(ids[1]);

        let mut recorder = Recorder(vec![]);
        store.render(&mut recorder);
        assert_eq!(recorder.0, vec!["c", "a"]);

        let names: Vec<_> = store.iter_active().map(|(l, _)| l.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    struct LastHover(Option<Properties>);

    impl HoverHandler for LastHover {
        fn on_hover(&mut self, properties: Option<&Properties>) {
            self.0 = properties.cloned();
        }
    }

    #[test]
    fn hover_passes_feature_properties() {
        let (mut store, ids) = store_with(&["tiles"]);
        let id = store.add(feature_layer(
            "f",
            "f",
            &[json!({"name": "first"}), json!({"name": "second"})],
        ));

        let mut handler = LastHover(None);
        store.hover(id, 1, &mut handler);
        assert_eq!(
            handler.0.as_ref().and_then(|p| p.get("name")),
            Some(&json!("second"))
        );

        store.hover(ids[0], 0, &mut handler);
        assert!(handler.0.is_none());
    }
}
