//! Visual styles of layers.
//!
//! Every layer in the [`LayerStore`](crate::LayerStore) has exactly one [`Style`]. Styles are
//! replaced as a whole: there is no partial update of a single attribute.

use serde::{Deserialize, Serialize};

use crate::error::GviewError;
use crate::layer::LayerType;
use crate::Color;

mod engine;
mod getter;

pub use engine::{StyleEngine, FILL_FIELD, STROKE_FIELD};
pub use getter::{FieldGetter, Generator, Getter};

/// Smallest allowed scale factor of stroke widths and point radii.
pub const MIN_SCALE: f64 = 1.0;
/// Largest allowed scale factor of stroke widths and point radii.
pub const MAX_SCALE: f64 = 9.0;

/// Units of a size attribute.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Meters on the ground.
    Meters,
    /// Units of the common (world) coordinate space.
    Common,
    /// Screen pixels.
    #[default]
    Pixels,
}

/// Style of a layer. The variant matches the [`LayerType`] of the layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// Style of a raster tile source.
    Source(SourceStyle),
    /// Style of a feature layer.
    Feature(FeatureStyle),
}

impl Style {
    /// Opacity of the layer.
    pub fn opacity(&self) -> f64 {
        match self {
            Style::Source(style) => style.opacity,
            Style::Feature(style) => style.opacity,
        }
    }

    /// Type of the layers this style can be applied to.
    pub fn layer_type(&self) -> LayerType {
        match self {
            Style::Source(_) => LayerType::Source,
            Style::Feature(_) => LayerType::Feature,
        }
    }

    /// Feature style, if this is one.
    pub fn as_feature(&self) -> Option<&FeatureStyle> {
        match self {
            Style::Source(_) => None,
            Style::Feature(style) => Some(style),
        }
    }

    /// Checks the value ranges of the style.
    ///
    /// Opacity must be in `[0, 1]`, and size scale factors in [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn validate(&self) -> Result<(), GviewError> {
        check_opacity(self.opacity())?;

        if let Style::Feature(style) = self {
            check_scale("stroke width scale", style.stroke_width_scale)?;
            check_scale("point radius scale", style.point_radius_scale)?;
        }

        Ok(())
    }
}

impl From<SourceStyle> for Style {
    fn from(value: SourceStyle) -> Self {
        Self::Source(value)
    }
}

impl From<FeatureStyle> for Style {
    fn from(value: FeatureStyle) -> Self {
        Self::Feature(value)
    }
}

/// Style of a raster tile source.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStyle {
    /// Opacity of the layer in `[0, 1]`.
    pub opacity: f64,
}

/// Style of a feature layer.
///
/// Attributes that are `None` are not drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStyle {
    /// Opacity of the layer in `[0, 1]`.
    pub opacity: f64,
    /// Color of polygon interiors and points.
    pub fill_color: Option<Getter<Color>>,
    /// Color of lines and outlines.
    pub stroke_color: Option<Getter<Color>>,
    /// Width of lines and outlines.
    pub stroke_width: Option<Getter<f64>>,
    /// Units of `stroke_width`.
    pub stroke_width_units: Units,
    /// Multiplier of `stroke_width`.
    pub stroke_width_scale: f64,
    /// Radius of points.
    pub point_radius: Option<Getter<f64>>,
    /// Units of `point_radius`.
    pub point_radius_units: Units,
    /// Multiplier of `point_radius`.
    pub point_radius_scale: f64,
    /// Whether polygons are extruded in 3D.
    pub extruded: Option<bool>,
}

impl FeatureStyle {
    /// Creates a style with the given opacity, no colors, unit sizes in pixels and no extrusion.
    pub fn new(opacity: f64) -> Self {
        Self {
            opacity,
            fill_color: None,
            stroke_color: None,
            stroke_width: Some(Getter::Raw(1.0)),
            stroke_width_units: Units::Pixels,
            stroke_width_scale: 1.0,
            point_radius: Some(Getter::Raw(1.0)),
            point_radius_units: Units::Pixels,
            point_radius_scale: 1.0,
            extruded: None,
        }
    }

    /// Creates a new instance from a copy of the current, but with the given opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    /// Creates a new instance from a copy of the current, but with the given fill color.
    pub fn with_fill_color(self, fill_color: Getter<Color>) -> Self {
        Self {
            fill_color: Some(fill_color),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given stroke color.
    pub fn with_stroke_color(self, stroke_color: Getter<Color>) -> Self {
        Self {
            stroke_color: Some(stroke_color),
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given stroke width.
    pub fn with_stroke_width(self, width: Getter<f64>, units: Units, scale: f64) -> Self {
        Self {
            stroke_width: Some(width),
            stroke_width_units: units,
            stroke_width_scale: scale,
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given point radius.
    pub fn with_point_radius(self, radius: Getter<f64>, units: Units, scale: f64) -> Self {
        Self {
            point_radius: Some(radius),
            point_radius_units: units,
            point_radius_scale: scale,
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given extrusion flag.
    pub fn with_extruded(self, extruded: bool) -> Self {
        Self {
            extruded: Some(extruded),
            ..self
        }
    }
}

fn check_opacity(opacity: f64) -> Result<(), GviewError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(GviewError::InvalidStyle(format!(
            "opacity must be between 0 and 1, got {opacity}"
        )))
    }
}

fn check_scale(name: &str, scale: f64) -> Result<(), GviewError> {
    if (MIN_SCALE..=MAX_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(GviewError::InvalidStyle(format!(
            "{name} must be between {MIN_SCALE} and {MAX_SCALE}, got {scale}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn opacity_range() {
        assert!(Style::from(SourceStyle { opacity: 0.0 }).validate().is_ok());
        assert!(Style::from(SourceStyle { opacity: 1.0 }).validate().is_ok());
        assert_matches!(
            Style::from(SourceStyle { opacity: 1.5 }).validate(),
            Err(GviewError::InvalidStyle(_))
        );
        assert_matches!(
            Style::from(FeatureStyle::new(f64::NAN)).validate(),
            Err(GviewError::InvalidStyle(_))
        );
    }

    #[test]
    fn scale_range() {
        let style = FeatureStyle::new(0.5);
        assert!(Style::from(style.clone()).validate().is_ok());

        let wide = style
            .clone()
            .with_stroke_width(Getter::Raw(2.0), Units::Meters, 9.0);
        assert!(Style::from(wide).validate().is_ok());

        let too_wide = style
            .clone()
            .with_stroke_width(Getter::Raw(2.0), Units::Meters, 10.0);
        assert_matches!(Style::from(too_wide).validate(), Err(GviewError::InvalidStyle(_)));

        let too_small = style.with_point_radius(Getter::Raw(2.0), Units::Pixels, 0.5);
        assert_matches!(Style::from(too_small).validate(), Err(GviewError::InvalidStyle(_)));
    }

    #[test]
    fn style_variant_matches_layer_type() {
        assert_eq!(Style::from(SourceStyle { opacity: 1.0 }).layer_type(), LayerType::Source);
        assert_eq!(Style::from(FeatureStyle::new(1.0)).layer_type(), LayerType::Feature);
    }

    #[test]
    fn units_serialization() {
        assert_eq!(serde_json::to_string(&Units::Meters).expect("serialize"), "\"meters\"");
        let units: Units = serde_json::from_str("\"common\"").expect("deserialize");
        assert_eq!(units, Units::Common);
    }
}
