//! Fitting geographic bounds into a viewport of the Web Mercator map.

use std::f64::consts::PI;

use gview_types::{Bounds, GeoPoint2d, Size};
use serde::{Deserialize, Serialize};

/// Parameters of [`fit_bounds`] that do not change between calls.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Pixel size of the whole world at zoom level 0.
    pub tile_size: Size,
    /// Bounds narrower than this many degrees are widened to it before fitting.
    pub min_span: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            tile_size: Size::new(256.0, 256.0),
            min_span: 1e-6,
        }
    }
}

/// Result of [`fit_bounds`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportFit {
    /// Center of the bounds.
    pub center: GeoPoint2d,
    /// Largest zoom level at which the bounds fit into the viewport.
    pub zoom: u32,
}

/// Calculates the center of the bounds and the largest integer zoom level at which the bounds are
/// fully visible in a viewport of the given pixel size.
///
/// The zoom is limited to `[0, max_zoom]`. Empty viewports produce zoom 0. Bounds narrower than
/// [`FitParams::min_span`] (e.g. a single point) are widened first. An axis that has no extent
/// after projection (both edges beyond the Mercator latitude limit) does not limit the zoom.
pub fn fit_bounds(
    bounds: &Bounds,
    viewport: Size,
    max_zoom: u32,
    params: &FitParams,
) -> ViewportFit {
    let bounds = bounds.with_min_span(params.min_span);

    let south = bounds.min_lat();
    let north = bounds.max_lat();
    let west = bounds.min_lon();
    let east = bounds.max_lon();

    let lat_fraction = (mercator_lat(north) - mercator_lat(south)).abs() / PI;

    let mut lng_diff = east - west;
    if lng_diff < 0.0 {
        lng_diff += 360.0;
    }
    let lng_fraction = lng_diff / 360.0;

    let lat_zoom = axis_zoom(viewport.height(), params.tile_size.height(), lat_fraction);
    let lng_zoom = axis_zoom(viewport.width(), params.tile_size.width(), lng_fraction);

    let zoom = match limit_zoom(max_zoom as f64, [lat_zoom, lng_zoom]) {
        Some(zoom) => zoom.clamp(0.0, max_zoom as f64) as u32,
        None => {
            log::debug!("Cannot fit bounds {bounds:?} into viewport {viewport:?}");
            0
        }
    };

    ViewportFit {
        center: GeoPoint2d::latlon((south + north) / 2.0, (west + east) / 2.0),
        zoom,
    }
}

/// Half of the Mercator y coordinate of the latitude, limited to `[-PI/2, PI/2]`.
fn mercator_lat(lat: f64) -> f64 {
    let sin = (lat * PI / 180.0).sin();
    let rad_x2 = ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
    rad_x2.clamp(-PI, PI) / 2.0
}

fn axis_zoom(viewport_px: f64, world_px: f64, fraction: f64) -> f64 {
    (viewport_px / world_px / fraction).log2().floor()
}

/// Smallest of `max_zoom` and the axis zooms. Skips `+inf`, gives `None` for `NaN` and `-inf`.
fn limit_zoom(max_zoom: f64, axis_zooms: [f64; 2]) -> Option<f64> {
    axis_zooms.into_iter().try_fold(max_zoom, |acc, zoom| {
        if zoom.is_nan() || zoom == f64::NEG_INFINITY {
            None
        } else {
            Some(acc.min(zoom))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Size {
        Size::new(256.0, 256.0)
    }

    #[test]
    fn fits_symmetric_bounds() {
        let bounds = Bounds::new(
            GeoPoint2d::lonlat(-10.0, -10.0),
            GeoPoint2d::lonlat(10.0, 10.0),
        );
        let fit = fit_bounds(&bounds, square(), 20, &FitParams::default());

        assert_eq!(fit.zoom, 4);
        assert_abs_diff_eq!(fit.center, GeoPoint2d::lonlat(0.0, 0.0));
    }

    #[test]
    fn larger_viewport_zooms_in() {
        let bounds = Bounds::new(
            GeoPoint2d::lonlat(-10.0, -10.0),
            GeoPoint2d::lonlat(10.0, 10.0),
        );
        let small = fit_bounds(&bounds, square(), 20, &FitParams::default());
        let large = fit_bounds(&bounds, Size::new(1024.0, 1024.0), 20, &FitParams::default());
        assert_eq!(large.zoom, small.zoom + 2);
    }

    #[test]
    fn single_point_is_limited_by_max_zoom() {
        let point = GeoPoint2d::lonlat(10.0, 50.0);
        let fit = fit_bounds(&Bounds::from_point(&point), square(), 20, &FitParams::default());

        assert_eq!(fit.zoom, 20);
        assert_abs_diff_eq!(fit.center, point, epsilon = 1e-9);
    }

    #[test]
    fn whole_world_is_zoom_zero() {
        let bounds = Bounds::new(
            GeoPoint2d::lonlat(-180.0, -90.0),
            GeoPoint2d::lonlat(180.0, 90.0),
        );
        let fit = fit_bounds(&bounds, square(), 20, &FitParams::default());
        assert_eq!(fit.zoom, 0);
    }

    #[test]
    fn empty_viewport_is_zoom_zero() {
        let bounds = Bounds::new(GeoPoint2d::lonlat(0.0, 0.0), GeoPoint2d::lonlat(1.0, 1.0));
        let fit = fit_bounds(&bounds, Size::new(0.0, 0.0), 20, &FitParams::default());
        assert_eq!(fit.zoom, 0);

        let point = Bounds::from_point(&GeoPoint2d::lonlat(0.0, 0.0));
        let params = FitParams {
            min_span: 0.0,
            ..Default::default()
        };
        assert_eq!(fit_bounds(&point, Size::new(0.0, 0.0), 20, &params).zoom, 0);
    }

    #[test]
    fn zero_span_point_is_limited_by_max_zoom() {
        let point = Bounds::from_point(&GeoPoint2d::lonlat(0.0, 0.0));
        let params = FitParams {
            min_span: 0.0,
            ..Default::default()
        };
        assert_eq!(fit_bounds(&point, square(), 20, &params).zoom, 20);
    }

    #[test]
    fn bounds_beyond_mercator_limit_are_fitted_by_longitude() {
        let bounds = Bounds::new(
            GeoPoint2d::lonlat(10.0, 86.0),
            GeoPoint2d::lonlat(11.0, 88.0),
        );
        let fit = fit_bounds(&bounds, square(), 20, &FitParams::default());

        assert_eq!(fit.zoom, 8);
        assert_abs_diff_eq!(fit.center, GeoPoint2d::lonlat(10.5, 87.0), epsilon = 1e-9);

        let south = Bounds::new(
            GeoPoint2d::lonlat(-60.0, -89.0),
            GeoPoint2d::lonlat(60.0, -87.0),
        );
        assert_eq!(fit_bounds(&south, square(), 20, &FitParams::default()).zoom, 1);
    }
}
