//! Geometries of vector features.

use crate::bounds::Bounds;
use crate::point::GeoPoint2d;

/// Polygon with an outer ring and optional holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    /// Outer boundary.
    pub outer: Vec<GeoPoint2d>,
    /// Holes.
    pub inner: Vec<Vec<GeoPoint2d>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    pub fn new(outer: Vec<GeoPoint2d>) -> Self {
        Self {
            outer,
            inner: Vec::new(),
        }
    }

    /// Iterates over the points of all rings, outer ring first.
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint2d> + '_ {
        self.outer.iter().chain(self.inner.iter().flatten())
    }
}

/// Kind of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryType {
    /// Single point.
    Point,
    /// Several points.
    MultiPoint,
    /// Open or closed line.
    LineString,
    /// Several lines.
    MultiLineString,
    /// Polygon.
    Polygon,
    /// Several polygons.
    MultiPolygon,
    /// Mix of other geometries.
    GeometryCollection,
}

/// Geometry in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geom {
    /// Single point.
    Point(GeoPoint2d),
    /// Several points.
    MultiPoint(Vec<GeoPoint2d>),
    /// Line.
    LineString(Vec<GeoPoint2d>),
    /// Several lines.
    MultiLineString(Vec<Vec<GeoPoint2d>>),
    /// Polygon.
    Polygon(Polygon),
    /// Several polygons.
    MultiPolygon(Vec<Polygon>),
    /// Mix of other geometries.
    GeometryCollection(Vec<Geom>),
}

impl Geom {
    /// Kind of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geom::Point(_) => GeometryType::Point,
            Geom::MultiPoint(_) => GeometryType::MultiPoint,
            Geom::LineString(_) => GeometryType::LineString,
            Geom::MultiLineString(_) => GeometryType::MultiLineString,
            Geom::Polygon(_) => GeometryType::Polygon,
            Geom::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geom::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Iterates over every vertex of the geometry.
    pub fn points(&self) -> Box<dyn Iterator<Item = &GeoPoint2d> + '_> {
        match self {
            Geom::Point(p) => Box::new(std::iter::once(p)),
            Geom::MultiPoint(points) | Geom::LineString(points) => Box::new(points.iter()),
            Geom::MultiLineString(lines) => Box::new(lines.iter().flatten()),
            Geom::Polygon(polygon) => Box::new(polygon.points()),
            Geom::MultiPolygon(polygons) => Box::new(polygons.iter().flat_map(Polygon::points)),
            Geom::GeometryCollection(geometries) => {
                Box::new(geometries.iter().flat_map(Geom::points))
            }
        }
    }

    /// Bounding rectangle of the geometry, or `None` if it has no vertices.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points())
    }
}

impl From<GeoPoint2d> for Geom {
    fn from(value: GeoPoint2d) -> Self {
        Geom::Point(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Geom::Polygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_bounds_cover_all_members() {
        let geom = Geom::GeometryCollection(vec![
            Geom::Point(GeoPoint2d::lonlat(5.0, 5.0)),
            Geom::Polygon(Polygon {
                outer: vec![
                    GeoPoint2d::lonlat(0.0, 0.0),
                    GeoPoint2d::lonlat(1.0, 0.0),
                    GeoPoint2d::lonlat(1.0, 1.0),
                ],
                inner: vec![vec![GeoPoint2d::lonlat(-2.0, 0.5)]],
            }),
        ]);

        let bounds = geom.bounds().expect("no bounds");
        assert_eq!(bounds.south_west(), GeoPoint2d::lonlat(-2.0, 0.0));
        assert_eq!(bounds.north_east(), GeoPoint2d::lonlat(5.0, 5.0));
        assert_eq!(geom.geometry_type(), GeometryType::GeometryCollection);
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert!(Geom::MultiPoint(vec![]).bounds().is_none());
        assert!(Geom::GeometryCollection(vec![]).bounds().is_none());
    }
}
