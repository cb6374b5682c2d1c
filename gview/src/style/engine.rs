use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::layer::{FieldIndex, GeoLayer, LayerKind};
use crate::random::{OsRandom, RandomSource};
use crate::style::{FeatureStyle, Generator, Getter, SourceStyle, Style, Units};
use crate::Color;

/// Property that fill colors are bound to when the features have it.
pub const FILL_FIELD: &str = "fill";
/// Property that stroke colors are bound to when the features have it.
pub const STROKE_FIELD: &str = "stroke";

const DEFAULT_OPACITY: f64 = 0.8;

/// Generates default styles for new layers.
#[derive(Clone)]
pub struct StyleEngine {
    random: Arc<dyn RandomSource>,
    default_opacity: f64,
}

impl StyleEngine {
    /// Creates a new engine taking random colors from `random`.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            random,
            default_opacity: DEFAULT_OPACITY,
        }
    }

    /// Creates a new instance from a copy of the current, but with the given default opacity.
    pub fn with_default_opacity(self, default_opacity: f64) -> Self {
        Self {
            default_opacity,
            ..self
        }
    }

    /// Opacity of generated styles.
    pub fn default_opacity(&self) -> f64 {
        self.default_opacity
    }

    /// Default style for the layer.
    ///
    /// Source layers only get the default opacity. For feature layers, fill and stroke colors are
    /// bound to the [`FILL_FIELD`] and [`STROKE_FIELD`] properties if the features have them, and
    /// are random constants otherwise. Widths and radii are 1 pixel, and polygons are extruded.
    pub fn default_style(&self, layer: &GeoLayer) -> Style {
        match layer.kind() {
            LayerKind::Source(_) => SourceStyle {
                opacity: self.default_opacity,
            }
            .into(),
            LayerKind::Feature(set) => {
                let index = set.field_index();
                let fill_color = self.color_getter(index, FILL_FIELD);
                let stroke_color = self.color_getter(index, STROKE_FIELD);

                FeatureStyle::new(self.default_opacity)
                    .with_fill_color(fill_color)
                    .with_stroke_color(stroke_color)
                    .with_stroke_width(Getter::Raw(1.0), Units::Pixels, 1.0)
                    .with_point_radius(Getter::Raw(1.0), Units::Pixels, 1.0)
                    .with_extruded(true)
                    .into()
            }
        }
    }

    /// Samples a random color.
    pub fn random_color(&self) -> Color {
        Color::random(self.random.as_ref())
    }

    /// Generator of random colors for field getters.
    pub fn color_generator(&self) -> Generator<Color> {
        let random = self.random.clone();
        Arc::new(move || Color::random(random.as_ref()))
    }

    /// Color getter bound to `field` if the index has it, or a random constant otherwise.
    pub fn color_getter(&self, index: &FieldIndex, field: &str) -> Getter<Color> {
        let default = Getter::Raw(self.random_color());
        if index.contains_key(field) {
            default.with_field(Some(field), self.color_generator())
        } else {
            default
        }
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(Arc::new(OsRandom))
    }
}

impl Debug for StyleEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("default_opacity", &self.default_opacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedSequence;
    use crate::tests::{feature_layer, point_feature, tile_layer};
    use assert_matches::assert_matches;
    use serde_json::json;

    fn engine() -> StyleEngine {
        StyleEngine::new(Arc::new(FixedSequence::new([10, 20, 30, 40, 50, 60, 70, 80, 90])))
    }

    #[test]
    fn source_layer_gets_opacity_only() {
        let style = engine().default_style(&tile_layer("osm"));
        assert_eq!(style, Style::Source(SourceStyle { opacity: 0.8 }));
    }

    #[test]
    fn feature_layer_without_color_fields() {
        let layer = feature_layer("a", "a.geojson", &[json!({"name": "x"})]);
        let style = engine().default_style(&layer);
        let style = style.as_feature().expect("not a feature style");

        assert_eq!(style.opacity, 0.8);
        assert_eq!(style.fill_color, Some(Getter::Raw(Color::rgb(10, 20, 30))));
        assert_eq!(style.stroke_color, Some(Getter::Raw(Color::rgb(40, 50, 60))));
        assert_eq!(style.stroke_width, Some(Getter::Raw(1.0)));
        assert_eq!(style.stroke_width_units, Units::Pixels);
        assert_eq!(style.stroke_width_scale, 1.0);
        assert_eq!(style.point_radius, Some(Getter::Raw(1.0)));
        assert_eq!(style.point_radius_scale, 1.0);
        assert_eq!(style.extruded, Some(true));
    }

    #[test]
    fn color_fields_are_bound() {
        let layer = feature_layer(
            "a",
            "a.geojson",
            &[json!({"fill": "red"}), json!({"fill": "red"}), json!({"fill": "blue"})],
        );
        let style = engine().default_style(&layer);
        let style = style.as_feature().expect("not a feature style");

        let fill = style.fill_color.as_ref().expect("no fill");
        assert_eq!(fill.field(), Some(FILL_FIELD));
        assert_matches!(style.stroke_color, Some(Getter::Raw(_)));

        let red = fill.evaluate(&point_feature(0.0, 0.0, json!({"fill": "red"})));
        let blue = fill.evaluate(&point_feature(0.0, 0.0, json!({"fill": "blue"})));
        let other = fill.evaluate(&point_feature(0.0, 0.0, json!({})));

        assert_eq!(red, fill.evaluate(&point_feature(1.0, 1.0, json!({"fill": "red"}))));
        assert_ne!(red, blue);
        assert_eq!(&other, fill.default_value());
    }

    #[test]
    fn generated_styles_are_valid() {
        let engine = StyleEngine::default().with_default_opacity(0.5);
        let layer = feature_layer("a", "a", &[json!({"fill": 1, "stroke": true})]);
        let style = engine.default_style(&layer);
        assert!(style.validate().is_ok());
        assert_eq!(style.opacity(), 0.5);
    }
}
