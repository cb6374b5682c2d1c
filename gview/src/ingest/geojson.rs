use std::str::FromStr;

use geojson::GeoJson;
use gview_types::Geom;

use crate::error::GviewError;
use crate::ingest::LayerGroup;
use crate::layer::Feature;

/// Decodes a GeoJSON document into one group of features.
///
/// The document can be a feature collection, a single feature or a bare geometry. Features with
/// `null` geometry are kept. Any invalid geometry makes the whole document a
/// [`GviewError::Format`] error.
pub fn decode_geojson(
    name: impl Into<String>,
    source_key: impl Into<String>,
    text: &str,
) -> Result<LayerGroup, GviewError> {
    let name = name.into();
    let geojson = GeoJson::from_str(text)
        .map_err(|err| GviewError::Format(format!("{name} is not valid GeoJSON: {err}")))?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .map(convert_feature)
            .collect::<Result<Vec<_>, _>>()?,
        GeoJson::Feature(feature) => vec![convert_feature(feature)?],
        GeoJson::Geometry(geometry) => {
            vec![Feature::new(convert_geometry(&geometry)?, Default::default())]
        }
    };

    log::debug!("Decoded {} features from {name}", features.len());

    Ok(LayerGroup {
        name,
        source_key: source_key.into(),
        features,
    })
}

fn convert_feature(feature: geojson::Feature) -> Result<Feature, GviewError> {
    let properties = feature.properties.unwrap_or_default();
    match &feature.geometry {
        Some(geometry) => Ok(Feature::new(convert_geometry(geometry)?, properties)),
        None => Ok(Feature::without_geometry(properties)),
    }
}

fn convert_geometry(geometry: &geojson::Geometry) -> Result<Geom, GviewError> {
    Geom::try_from(geometry).map_err(|err| GviewError::Format(err.to_string()))
}
