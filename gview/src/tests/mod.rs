use gview_types::GeoPoint2d;
use serde_json::Value;

use crate::layer::{Feature, GeoLayer, Properties};

pub fn props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        other => panic!("properties must be a JSON object, got {other}"),
    }
}

pub fn point_feature(lon: f64, lat: f64, properties: Value) -> Feature {
    Feature::new(GeoPoint2d::lonlat(lon, lat), props(properties))
}

pub fn feature_layer(name: &str, source_key: &str, properties: &[Value]) -> GeoLayer {
    let features = properties
        .iter()
        .enumerate()
        .map(|(i, p)| point_feature(i as f64, i as f64, p.clone()))
        .collect();
    GeoLayer::features(name, source_key, features).expect("invalid test layer")
}

pub fn tile_layer(name: &str) -> GeoLayer {
    GeoLayer::tile_source(name, format!("https://{name}/{{z}}/{{x}}/{{y}}.png"), 0, 19)
        .expect("invalid test layer")
}
