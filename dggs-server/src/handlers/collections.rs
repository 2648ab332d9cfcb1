// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `/collections`, `/collections/{id}`, and the queryables/schema pair.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Extension, Path};
use axum::Json;
use dggs_core::CoreError;
use dggs_registry::Collection;
use serde_json::{json, Value};
use std::sync::Arc;

fn collection_json(base: &str, collection: &Collection) -> Value {
    json!({
        "id": collection.id,
        "title": collection.title,
        "description": collection.description,
        "extent": {
            "spatial": collection.extent.bbox,
            "temporal": collection.extent.temporal,
        },
        "dggrsId": collection.dggrs_id,
        "minRefinementLevel": collection.min_refinement_level,
        "maxRefinementLevel": collection.max_refinement_level,
        "links": [
            { "href": format!("{base}/collections/{}", collection.id), "rel": "self", "type": "application/json" },
            { "href": format!("{base}/collections/{}/queryables", collection.id), "rel": "queryables", "type": "application/schema+json" },
            { "href": format!("{base}/collections/{}/dggs", collection.id), "rel": "http://www.opengis.net/def/rel/ogc/1.0/dggrs-list", "type": "application/json" },
        ],
    })
}

pub async fn list_collections(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let base = &state.base_url;
    let mut ids: Vec<&String> = state.registries.collections.keys().collect();
    ids.sort();
    let collections: Vec<Value> = ids.iter().map(|id| collection_json(base, &state.registries.collections[*id])).collect();
    Ok(Json(json!({ "collections": collections, "links": [{ "href": format!("{base}/collections"), "rel": "self", "type": "application/json" }] })))
}

pub async fn get_collection(Extension(state): Extension<Arc<AppState>>, Path(collection_id): Path<String>) -> Result<Json<Value>, ApiError> {
    let collection = state
        .registries
        .collections
        .get(&collection_id)
        .ok_or_else(|| CoreError::UnsupportedCollection(collection_id.clone()))?;
    Ok(Json(collection_json(&state.base_url, collection)))
}

pub async fn queryables(Extension(state): Extension<Arc<AppState>>, Path(collection_id): Path<String>) -> Result<Json<Value>, ApiError> {
    let schema = dggs_core::collection_schema(&state.registries, &collection_id).await?;
    Ok(Json(schema))
}
