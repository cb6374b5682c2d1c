//! Conversion of GeoJSON geometries into [`Geom`].

use geojson::{PolygonType, Position, Value};

use crate::error::TypesError;
use crate::geometry::{Geom, Polygon};
use crate::point::GeoPoint2d;

impl TryFrom<&geojson::Geometry> for Geom {
    type Error = TypesError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        Geom::try_from(&value.value)
    }
}

impl TryFrom<&Value> for Geom {
    type Error = TypesError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Point(p) => Geom::Point(convert_position(p)?),
            Value::MultiPoint(points) => Geom::MultiPoint(convert_line(points)?),
            Value::LineString(points) => Geom::LineString(convert_line(points)?),
            Value::MultiLineString(lines) => Geom::MultiLineString(
                lines
                    .iter()
                    .map(|l| convert_line(l))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Polygon(polygon) => Geom::Polygon(convert_polygon(polygon)?),
            Value::MultiPolygon(mp) => Geom::MultiPolygon(
                mp.iter()
                    .map(convert_polygon)
                    .collect::<Result<_, _>>()?,
            ),
            Value::GeometryCollection(geometries) => Geom::GeometryCollection(
                geometries
                    .iter()
                    .map(Geom::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn convert_position(position: &Position) -> Result<GeoPoint2d, TypesError> {
    if position.len() < 2 {
        return Err(TypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        ));
    }

    let point = GeoPoint2d::lonlat(position[0], position[1]);
    if !point.is_finite() {
        return Err(TypesError::Conversion(format!(
            "point coordinates must be finite, got {position:?}"
        )));
    }

    Ok(point)
}

fn convert_line(points: &[Position]) -> Result<Vec<GeoPoint2d>, TypesError> {
    points.iter().map(convert_position).collect()
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon, TypesError> {
    let mut rings = polygon.iter();
    let outer = match rings.next() {
        Some(ring) => convert_line(ring)?,
        None => {
            return Err(TypesError::Conversion(
                "polygon must have an outer ring".to_string(),
            ))
        }
    };

    Ok(Polygon {
        outer,
        inner: rings.map(|r| convert_line(r)).collect::<Result<_, _>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn polygon_with_hole() {
        let value = Value::Polygon(vec![
            vec![
                vec![0.0, 0.0],
                vec![4.0, 0.0],
                vec![4.0, 4.0],
                vec![0.0, 0.0],
            ],
            vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![1.0, 1.0]],
        ]);

        let geom = Geom::try_from(&value).expect("conversion failed");
        assert_matches!(&geom, Geom::Polygon(p) if p.inner.len() == 1);
        let bounds = geom.bounds().expect("no bounds");
        assert_eq!(bounds.north_east(), GeoPoint2d::lonlat(4.0, 4.0));
    }

    #[test]
    fn short_position_is_rejected() {
        let value = Value::Point(vec![1.0]);
        assert_matches!(Geom::try_from(&value), Err(TypesError::Conversion(_)));
    }

    #[test]
    fn positions_are_lon_lat() {
        let value = Value::Point(vec![-73.9, 40.7, 12.0]);
        let geom = Geom::try_from(&value).expect("conversion failed");
        assert_eq!(geom, Geom::Point(GeoPoint2d::latlon(40.7, -73.9)));
    }
}
