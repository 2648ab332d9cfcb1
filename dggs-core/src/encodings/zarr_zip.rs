// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `application/zarr+zip` encoder: one
//! `zone_level_{z}` group per depth, a `zoneId` array, and one array per
//! `{collection}.{property}` column, all zipped into a single archive.
//! Each array's `data` member is JSON-encoded rather than chunked and
//! compressed per the Zarr v2 binary chunk format; the `.zarray` metadata
//! still declares the intended dtype and compressor for a consumer that
//! wants to re-chunk it properly.

use crate::assembler::AssembledData;
use crate::error::CoreError;
use dggs_collections::TypedColumn;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

pub fn encode(data: &AssembledData) -> Result<Vec<u8>, CoreError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options: FileOptions<()> = FileOptions::default().compression_method(CompressionMethod::Zstd);

    let mut group_keys = Vec::new();

    for depth in &data.depths {
        let group = format!("zone_level_{}", depth.level.get());
        group_keys.push(group.clone());

        write_json_member(&mut zip, &format!("{group}/.zgroup"), &serde_json::json!({ "zarr_format": 2 }), options)?;

        let zone_ids: Vec<&str> = depth.table.zone_ids.iter().map(String::as_str).collect();
        write_array(&mut zip, &group, "zoneId", &serde_json::json!(zone_ids), "<U32", zone_ids.len(), options)?;

        for meta in &depth.table.cols_meta {
            let Some(column) = depth.table.columns.get(&meta.name) else { continue };
            let (dtype, json_values) = column_payload(column);
            let array_name = format!("{meta}_zone_level_{level}", meta = meta.name, level = depth.level.get());
            write_array(&mut zip, &group, &array_name, &json_values, dtype, column.len(), options)?;
        }
    }

    write_json_member(
        &mut zip,
        ".zmetadata",
        &serde_json::json!({ "zarr_consolidated_format": 1, "metadata": group_keys }),
        options,
    )?;

    zip.finish().map_err(|e| CoreError::BackendFailure(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn write_array<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    group: &str,
    name: &str,
    values: &serde_json::Value,
    dtype: &str,
    length: usize,
    options: FileOptions<()>,
) -> Result<(), CoreError> {
    let zarray = serde_json::json!({
        "zarr_format": 2,
        "shape": [length],
        "chunks": [length.max(1)],
        "dtype": dtype,
        "compressor": { "id": "zstd", "level": 3 },
        "fill_value": null,
        "order": "C",
    });
    write_json_member(zip, &format!("{group}/{name}/.zarray"), &zarray, options)?;
    write_json_member(zip, &format!("{group}/{name}/data"), values, options)?;
    Ok(())
}

fn write_json_member<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    value: &serde_json::Value,
    options: FileOptions<()>,
) -> Result<(), CoreError> {
    zip.start_file(path, options).map_err(|e| CoreError::BackendFailure(e.to_string()))?;
    let bytes = serde_json::to_vec(value).map_err(|e| CoreError::BackendFailure(e.to_string()))?;
    zip.write_all(&bytes).map_err(|e| CoreError::BackendFailure(e.to_string()))?;
    Ok(())
}

fn column_payload(column: &TypedColumn) -> (&'static str, serde_json::Value) {
    match column {
        TypedColumn::Float(values) => {
            ("<f8", serde_json::json!(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect::<Vec<_>>()))
        }
        TypedColumn::Int(values) => ("<i8", serde_json::json!(values.iter().map(|v| v.unwrap_or(i64::MIN)).collect::<Vec<_>>())),
        TypedColumn::Bool(values) => ("|b1", serde_json::json!(values.iter().map(|v| v.unwrap_or(false)).collect::<Vec<_>>())),
        TypedColumn::Text(values) => {
            ("<U32", serde_json::json!(values.iter().map(|v| v.clone().unwrap_or_default()).collect::<Vec<_>>()))
        }
    }
}
