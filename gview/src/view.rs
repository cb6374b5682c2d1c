use gview_types::Size;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::layer::GeoLayer;
use crate::projection::{fit_bounds, FitParams};

/// Duration of the fly-to transition started by [`ViewState::focus_layer`].
pub const FOCUS_TRANSITION: Duration = Duration::from_millis(1000);

/// Camera of the map: where it looks at, from which angle and within which limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Longitude of the center in degrees.
    pub longitude: f64,
    /// Latitude of the center in degrees.
    pub latitude: f64,
    /// Zoom level.
    pub zoom: f64,
    /// Tilt of the camera in degrees, 0 being straight down.
    pub pitch: f64,
    /// Rotation of the map in degrees clockwise from north.
    pub bearing: f64,
    /// Lowest allowed zoom level.
    pub min_zoom: f64,
    /// Highest allowed zoom level.
    pub max_zoom: f64,
    /// Lowest allowed pitch.
    pub min_pitch: f64,
    /// Highest allowed pitch.
    pub max_pitch: f64,
    /// If set, the renderer animates the change to this state over the given time.
    pub transition: Option<Duration>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            zoom: 1.0,
            pitch: 30.0,
            bearing: 0.0,
            min_zoom: 0.0,
            max_zoom: 21.0,
            min_pitch: 0.0,
            max_pitch: 89.9,
            transition: None,
        }
    }
}

impl ViewState {
    /// Creates a new instance from a copy of the current, but centered at the given position.
    pub fn with_center(&self, longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given zoom clamped into
    /// the zoom limits.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom)),
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given pitch clamped into
    /// the pitch limits.
    pub fn with_pitch(&self, pitch: f64) -> Self {
        Self {
            pitch: pitch.clamp(self.min_pitch, self.max_pitch.max(self.min_pitch)),
            ..*self
        }
    }

    /// Creates a new instance from a copy of the current, but with the given transition.
    pub fn with_transition(&self, transition: Option<Duration>) -> Self {
        Self {
            transition,
            ..*self
        }
    }

    /// Highest zoom level as an integer, used when fitting bounds.
    pub fn max_zoom_level(&self) -> u32 {
        if self.max_zoom.is_finite() && self.max_zoom > 0.0 {
            self.max_zoom.floor() as u32
        } else {
            0
        }
    }

    /// View that shows the whole layer in a viewport of the given size, looking straight down, with
    /// a fly-to transition.
    ///
    /// Layers without bounds (tile sources) cover the whole world, so the view is returned
    /// unchanged for them.
    pub fn focus_layer(&self, layer: &GeoLayer, viewport: Size, params: &FitParams) -> Self {
        let Some(bounds) = layer.bounds() else {
            return *self;
        };

        let fit = fit_bounds(&bounds, viewport, self.max_zoom_level(), params);
        log::debug!(
            "Focusing layer {} at {:?}, zoom {}",
            layer.name(),
            fit.center,
            fit.zoom
        );

        Self {
            longitude: fit.center.lon(),
            latitude: fit.center.lat(),
            zoom: fit.zoom as f64,
            pitch: 0.0,
            transition: Some(FOCUS_TRANSITION),
            ..*self
        }
    }
}
