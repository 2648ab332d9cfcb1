// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! MVT tile renderer: pick a refinement level from the tile's
//! CLS, list the zones it covers, pull one collection's data for them, and
//! hand the result to the `mvt` crate for protobuf encoding. Mirrors the
//! shape of a classic `MvtService::tile` method (datasource fetch -> feature
//! build -> encode) without owning any datasource connections itself, since
//! those already live behind `CollectionProvider`.

use crate::error::MvtError;
use crate::tile_math::TileCoord;
use dggrs::ports::dggrs::GeometryKind;
use dggrs::{RefinementLevel, RelativeDepth, ZoneId};
use dggs_collections::{GetDataRequest, TypedColumn};
use dggs_registry::Registries;
use geo::Polygon;
use mvt::{GeomEncoder, GeomType, Tile, Value as MvtValue};
use std::collections::HashMap;

const DEFAULT_EXTENT: u32 = 4096;

pub struct TileRequest {
    pub collection_id: String,
    pub dggrs_id: Option<String>,
    pub tile: TileCoord,
    pub relative_depth: RelativeDepth,
}

pub async fn render_tile(registries: &Registries, request: &TileRequest) -> Result<Vec<u8>, MvtError> {
    let collection = registries
        .collections
        .get(&request.collection_id)
        .ok_or_else(|| MvtError::UnsupportedCollection(request.collection_id.clone()))?;

    let dggrs_id = request.dggrs_id.clone().unwrap_or_else(|| collection.dggrs_id.clone());
    let provider = registries.dggrs.get(&dggrs_id)?;

    let bbox = request.tile.wgs84_bbox();
    let cls_level = provider.get_zone_level_by_cls(request.tile.cls_km())?;
    let shifted = cls_level.add(request.relative_depth)?;
    let level = RefinementLevel::from(shifted.get().clamp(collection.min_refinement_level, collection.max_refinement_level));

    let listing = provider.zoneslist(Some(bbox), level, None, GeometryKind::Region, false)?;
    if listing.zones.zones.is_empty() {
        return encode_empty_tile(&request.collection_id);
    }

    let collection_provider = registries
        .provider_for(collection)
        .ok_or_else(|| MvtError::ProviderUnavailable(collection.id.clone()))?;

    let zone_id_strings: Vec<String> = listing.zones.ids().iter().map(ZoneId::to_string).collect();
    let mut data_request = GetDataRequest::new(zone_id_strings.clone(), level.get(), collection.datasource_id.clone());
    data_request.input_zone_ids_padding = false;

    let table = collection_provider.get_data(&data_request).await.unwrap_or_default();
    let row_for: HashMap<&str, usize> = table.zone_ids.iter().enumerate().map(|(i, z)| (z.as_str(), i)).collect();

    let mut tile = Tile::new(DEFAULT_EXTENT);
    let mut layer = tile.create_layer(&collection.id);

    for zone in &listing.zones.zones {
        let zone_id = zone.id.to_string();

        let geom_data = match encode_polygon(&request.tile, &zone.region, DEFAULT_EXTENT) {
            Some(data) => data,
            None => continue,
        };

        let mut feature = layer.into_feature(geom_data);
        feature = feature.add_tag_from("zoneId", &MvtValue::from(zone_id.clone()));

        if let Some(&row) = row_for.get(zone_id.as_str()) {
            for meta in &table.cols_meta {
                if let Some(column) = table.columns.get(&meta.name) {
                    if let Some(value) = mvt_value_at(column, row) {
                        feature = feature.add_tag_from(&meta.name, &value);
                    }
                }
            }
        }

        layer = feature.into_feature();
    }

    tile.add_layer(layer).map_err(|e| MvtError::Encoding(e.to_string()))?;
    tile.to_bytes().map_err(|e| MvtError::Encoding(e.to_string()))
}

fn encode_empty_tile(layer_name: &str) -> Result<Vec<u8>, MvtError> {
    let mut tile = Tile::new(DEFAULT_EXTENT);
    let layer = tile.create_layer(layer_name);
    tile.add_layer(layer).map_err(|e| MvtError::Encoding(e.to_string()))?;
    tile.to_bytes().map_err(|e| MvtError::Encoding(e.to_string()))
}

fn encode_polygon(tile: &TileCoord, polygon: &Polygon<f64>, extent: u32) -> Option<mvt::GeomData> {
    let mut encoder = GeomEncoder::new(GeomType::Polygon);
    for coord in polygon.exterior().coords() {
        let (px, py) = tile.project(*coord, extent);
        encoder = encoder.point(px, py).ok()?;
    }
    for interior in polygon.interiors() {
        for coord in interior.coords() {
            let (px, py) = tile.project(*coord, extent);
            encoder = encoder.point(px, py).ok()?;
        }
    }
    encoder.complete().ok()
}

fn mvt_value_at(column: &TypedColumn, row: usize) -> Option<MvtValue> {
    match column {
        TypedColumn::Float(v) => v.get(row).copied().flatten().map(MvtValue::from),
        TypedColumn::Int(v) => v.get(row).copied().flatten().map(MvtValue::from),
        TypedColumn::Text(v) => v.get(row).cloned().flatten().map(MvtValue::from),
        TypedColumn::Bool(v) => v.get(row).copied().flatten().map(MvtValue::from),
    }
}
