// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use geo::Polygon;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> Geometry {
    Geometry::new(Value::from(polygon))
}

/// Builds a `FeatureCollection` from zone ids paired with optional geometry
/// and a property bag. `None` geometry produces a `Feature` with a null
/// geometry field, which is valid GeoJSON for "we know the id, not the
/// shape" responses.
pub fn feature_collection_from_zones(
    zones: Vec<(String, Option<Polygon<f64>>, JsonObject)>,
) -> FeatureCollection {
    let features = zones
        .into_iter()
        .map(|(zone_id, geometry, mut properties)| {
            properties.insert("zoneId".to_string(), JsonValue::String(zone_id.clone()));
            Feature {
                bbox: None,
                geometry: geometry.as_ref().map(polygon_to_geojson),
                id: Some(geojson::feature::Id::String(zone_id)),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
