//! Settings of the viewer.

use std::path::Path;

use gview_types::Size;
use serde::{Deserialize, Serialize};

use crate::error::GviewError;
use crate::projection::FitParams;
use crate::view::ViewState;

/// Settings of the viewer. Every field has a default, so a JSON document only needs to list the
/// values it changes.
///
/// ```
/// use gview::GviewConfig;
///
/// let config =
///     GviewConfig::from_json_str(r#"{ "default_opacity": 0.5 }"#).expect("invalid config");
/// assert_eq!(config.default_opacity, 0.5);
/// assert_eq!(config.initial_view.max_zoom, 21.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GviewConfig {
    /// View of the map on startup.
    pub initial_view: ViewState,
    /// Parameters of fitting layer bounds into the viewport.
    pub fit: FitParams,
    /// Opacity of generated layer styles.
    pub default_opacity: f64,
    /// Size of the map viewport in pixels until the application reports the real one.
    pub viewport: Size,
    /// Lowest zoom level of tile sources added from `xyz=` parameters.
    pub xyz_min_zoom: u32,
    /// Highest zoom level of tile sources added from `xyz=` parameters.
    pub xyz_max_zoom: u32,
}

impl Default for GviewConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewState::default(),
            fit: FitParams::default(),
            default_opacity: 0.8,
            viewport: Size::new(1024.0, 768.0),
            xyz_min_zoom: 0,
            xyz_max_zoom: 19,
        }
    }
}

impl GviewConfig {
    /// Parses the config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GviewError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GviewError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loading config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Creates a new instance from a copy of the current, but with the given initial view.
    pub fn with_initial_view(self, initial_view: ViewState) -> Self {
        Self {
            initial_view,
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given default opacity.
    pub fn with_default_opacity(self, default_opacity: f64) -> Self {
        Self {
            default_opacity,
            ..self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given viewport size.
    pub fn with_viewport(self, viewport: Size) -> Self {
        Self { viewport, ..self }
    }

    /// Creates a new instance from a copy of the current, but with the given fit parameters.
    pub fn with_fit(self, fit: FitParams) -> Self {
        Self { fit, ..self }
    }

    fn validate(&self) -> Result<(), GviewError> {
        if !(0.0..=1.0).contains(&self.default_opacity) {
            return Err(GviewError::InvalidStyle(format!(
                "default opacity must be between 0 and 1, got {}",
                self.default_opacity
            )));
        }

        if self.xyz_max_zoom < self.xyz_min_zoom {
            return Err(GviewError::Construction(format!(
                "xyz max zoom {} is less than min zoom {}",
                self.xyz_max_zoom, self.xyz_min_zoom
            )));
        }

        Ok(())
    }
}
