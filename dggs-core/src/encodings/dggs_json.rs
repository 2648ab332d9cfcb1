// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! DGGS-JSON encoder. Builds the
//! `{$schema, dggrs, zoneId, depths, schema, values, dimensions?}` document
//! directly from an `AssembledData`; the UBJSON encoder reuses this
//! `serde_json::Value` tree verbatim.

use crate::assembler::AssembledData;
use dggs_collections::TypedColumn;
use serde_json::{json, Map, Value};

const SCHEMA_URI: &str = "https://developer.ogc.org/api/dggs/schemas/dggs-zone-data.json";

pub fn encode(data: &AssembledData) -> Value {
    let depths: Vec<u32> = data.depths.iter().map(|d| d.depth).collect();

    let mut property_names: Vec<String> = Vec::new();
    for depth in &data.depths {
        for meta in &depth.table.cols_meta {
            if !property_names.contains(&meta.name) {
                property_names.push(meta.name.clone());
            }
        }
    }

    let mut schema_properties = Map::new();
    for depth in &data.depths {
        for meta in &depth.table.cols_meta {
            schema_properties.entry(meta.name.clone()).or_insert_with(|| {
                json!({ "type": json_type_for(&meta.dtype) })
            });
        }
    }

    let mut values = Map::new();
    for name in &property_names {
        let mut per_depth = Vec::new();
        for depth in &data.depths {
            let Some(column) = depth.table.columns.get(name) else { continue };
            let sub_zones = depth.table.zone_ids.len();
            let count = column.len();
            per_depth.push(json!({
                "depth": depth.depth,
                "shape": { "count": count, "subZones": sub_zones },
                "data": column_to_json(column),
            }));
        }
        values.insert(name.clone(), Value::Array(per_depth));
    }

    let dimensions = data
        .depths
        .iter()
        .find_map(|d| d.table.dimensions.clone())
        .map(|dims| {
            Value::Array(
                dims.into_iter()
                    .map(|dim| {
                        json!({
                            "name": dim.name,
                            "interval": [dim.interval[0].to_rfc3339(), dim.interval[1].to_rfc3339()],
                            "grid": {
                                "cellsCount": dim.grid.cells_count,
                                "coordinates": dim.grid.coordinates.iter().map(|c| c.to_rfc3339()).collect::<Vec<_>>(),
                            },
                        })
                    })
                    .collect(),
            )
        });

    let mut doc = json!({
        "$schema": SCHEMA_URI,
        "dggrs": data.dggrs_id,
        "zoneId": data.zone_id,
        "depths": depths,
        "schema": { "properties": Value::Object(schema_properties) },
        "values": Value::Object(values),
    });

    if let Some(dimensions) = dimensions {
        doc.as_object_mut().unwrap().insert("dimensions".to_string(), dimensions);
    }

    doc
}

fn json_type_for(dtype: &str) -> &'static str {
    match dtype {
        "float64" => "number",
        "int64" => "integer",
        "bool" => "boolean",
        _ => "string",
    }
}

fn column_to_json(column: &TypedColumn) -> Value {
    match column {
        TypedColumn::Float(values) => Value::Array(values.iter().map(|v| v.map_or(Value::Null, |x| json!(x))).collect()),
        TypedColumn::Int(values) => Value::Array(values.iter().map(|v| v.map_or(Value::Null, |x| json!(x))).collect()),
        TypedColumn::Text(values) => Value::Array(values.iter().map(|v| v.clone().map_or(Value::Null, Value::String)).collect()),
        TypedColumn::Bool(values) => Value::Array(values.iter().map(|v| v.map_or(Value::Null, Value::Bool)).collect()),
    }
}
