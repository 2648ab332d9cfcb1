// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `application/geo+json` encoder: one `Feature` per
//! `(zone, datetime?)` row, dropping rows whose data columns are entirely
//! null.

use crate::assembler::AssembledData;
use dggs_geom::polygon_to_geojson;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

pub fn encode(data: &AssembledData) -> FeatureCollection {
    let mut features = Vec::new();

    for depth in &data.depths {
        let table = &depth.table;
        for (row, zone_id) in table.zone_ids.iter().enumerate() {
            let mut properties = JsonObject::new();
            let mut any_value = false;

            for meta in &table.cols_meta {
                let Some(column) = table.columns.get(&meta.name) else { continue };
                let value = row_value(column, row);
                if !value.is_null() {
                    any_value = true;
                }
                properties.insert(meta.name.clone(), value);
            }

            if !any_value {
                continue;
            }

            properties.insert("zoneId".to_string(), JsonValue::String(zone_id.clone()));
            properties.insert("depth".to_string(), JsonValue::from(depth.depth));

            let geometry: Option<Geometry> = depth
                .geometry
                .as_ref()
                .and_then(|polygons| polygons.get(row))
                .map(polygon_to_geojson);

            features.push(Feature {
                bbox: None,
                geometry,
                id: Some(geojson::feature::Id::String(zone_id.clone())),
                properties: Some(properties),
                foreign_members: None,
            });
        }
    }

    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn row_value(column: &dggs_collections::TypedColumn, row: usize) -> JsonValue {
    use dggs_collections::TypedColumn;
    match column {
        TypedColumn::Float(values) => values.get(row).copied().flatten().map_or(JsonValue::Null, |v| {
            serde_json::Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
        }),
        TypedColumn::Int(values) => values.get(row).copied().flatten().map_or(JsonValue::Null, JsonValue::from),
        TypedColumn::Text(values) => values.get(row).cloned().flatten().map_or(JsonValue::Null, JsonValue::String),
        TypedColumn::Bool(values) => values.get(row).copied().flatten().map_or(JsonValue::Null, JsonValue::Bool),
    }
}
