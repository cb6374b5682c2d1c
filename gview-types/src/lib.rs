//! Geographic primitives used by `gview`: points, bounds, geometries and sizes.
//!
//! With the `geojson` feature enabled, GeoJSON geometries can be converted into [`Geom`] with
//! `TryFrom`.

pub mod bounds;
pub mod error;
pub mod geometry;
mod point;
pub mod size;

#[cfg(feature = "geojson")]
mod geojson;

pub use bounds::Bounds;
pub use error::TypesError;
pub use geometry::{Geom, GeometryType, Polygon};
pub use point::GeoPoint2d;
pub use size::Size;
