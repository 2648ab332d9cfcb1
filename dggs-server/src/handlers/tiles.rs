// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `/tiles-api/{collectionId}/{z}/{x}/{y}` and `/tiles-api/{collectionId}.json`.
//! `relative-depth` is the one tile-specific query parameter, letting a
//! caller ask for one level finer or coarser than the CLS-matched level.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dggrs::RelativeDepth;
use dggs_mvt::{render_tile, tilejson, TileCoord, TileRequest};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TilePath {
    pub collection_id: String,
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

pub async fn tile(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<TilePath>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let relative_depth = match q.get("relative-depth") {
        Some(raw) => RelativeDepth::new(raw.parse::<i32>().map_err(|_| ApiError::BadRequest("relative-depth must be an integer".to_string()))?)
            .map_err(dggs_core::CoreError::from)?,
        None => RelativeDepth::from(0u32),
    };

    let request = TileRequest {
        collection_id: path.collection_id,
        dggrs_id: q.get("dggrs").cloned(),
        tile: TileCoord::new(path.z, path.x, path.y),
        relative_depth,
    };

    let bytes = render_tile(&state.registries, &request).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/x-protobuf")], bytes).into_response())
}

pub async fn tile_json(Extension(state): Extension<Arc<AppState>>, Path(collection_file): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let collection_id = collection_file
        .strip_suffix(".json")
        .ok_or_else(|| ApiError::BadRequest(format!("expected '{collection_file}.json'")))?;
    let collection = state
        .registries
        .collections
        .get(collection_id)
        .ok_or_else(|| dggs_core::CoreError::UnsupportedCollection(collection_id.to_string()))?;
    Ok(Json(tilejson(&state.base_url, collection)))
}
