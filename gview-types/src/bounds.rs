use approx::AbsDiffEq;

use crate::point::GeoPoint2d;

/// Axis-aligned rectangle in longitude/latitude space.
///
/// The corners are always normalized: `min_lon <= max_lon` and `min_lat <= max_lat`, no matter in
/// what order the corners were given to the constructor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Bounds {
    /// Creates bounds from two opposite corners given in any order.
    ///
    /// ```
    /// use gview_types::{Bounds, GeoPoint2d};
    ///
    /// let bounds = Bounds::new(GeoPoint2d::lonlat(-80.0, 40.0), GeoPoint2d::lonlat(-90.0, 30.0));
    /// assert_eq!(bounds.south_west(), GeoPoint2d::lonlat(-90.0, 30.0));
    /// assert_eq!(bounds.north_east(), GeoPoint2d::lonlat(-80.0, 40.0));
    /// ```
    pub fn new(a: GeoPoint2d, b: GeoPoint2d) -> Self {
        Self {
            min_lon: a.lon().min(b.lon()),
            min_lat: a.lat().min(b.lat()),
            max_lon: a.lon().max(b.lon()),
            max_lat: a.lat().max(b.lat()),
        }
    }

    /// Bounds containing a single point.
    pub fn from_point(p: &GeoPoint2d) -> Self {
        Self {
            min_lon: p.lon(),
            min_lat: p.lat(),
            max_lon: p.lon(),
            max_lat: p.lat(),
        }
    }

    /// Smallest bounds containing all the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint2d>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |acc, p| acc.extend(p)))
    }

    /// Western edge.
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Southern edge.
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Eastern edge.
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Northern edge.
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// South-west corner.
    pub fn south_west(&self) -> GeoPoint2d {
        GeoPoint2d::lonlat(self.min_lon, self.min_lat)
    }

    /// North-east corner.
    pub fn north_east(&self) -> GeoPoint2d {
        GeoPoint2d::lonlat(self.max_lon, self.max_lat)
    }

    /// Midpoint of both axes.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::lonlat(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Returns true if the point lies inside or on the edge of the bounds.
    pub fn contains(&self, p: &GeoPoint2d) -> bool {
        self.min_lon <= p.lon()
            && self.max_lon >= p.lon()
            && self.min_lat <= p.lat()
            && self.max_lat >= p.lat()
    }

    /// Bounds grown to include the point.
    pub fn extend(&self, p: &GeoPoint2d) -> Self {
        Self {
            min_lon: self.min_lon.min(p.lon()),
            min_lat: self.min_lat.min(p.lat()),
            max_lon: self.max_lon.max(p.lon()),
            max_lat: self.max_lat.max(p.lat()),
        }
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Widens every axis narrower than `min_span` degrees symmetrically about its center. Axes
    /// that are already wide enough are left untouched.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let (min_lon, max_lon) = widen(self.min_lon, self.max_lon, min_span);
        let (min_lat, max_lat) = widen(self.min_lat, self.max_lat, min_span);
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

fn widen(min: f64, max: f64, min_span: f64) -> (f64, f64) {
    if max - min >= min_span {
        return (min, max);
    }

    let center = (min + max) / 2.0;
    let half = min_span / 2.0;
    (center - half, center + half)
}

impl AbsDiffEq for Bounds {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.south_west().abs_diff_eq(&other.south_west(), epsilon)
            && self.north_east().abs_diff_eq(&other.north_east(), epsilon)
    }
}
