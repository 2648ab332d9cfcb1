// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `/dggs`, `/dggs/{id}` and their `/collections/{id}/dggs...` variants. A
//! collection is bound to exactly one DGGRS, so the collection-scoped list
//! always has at most one entry.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Extension, Path};
use axum::Json;
use dggrs::DggrsDescriptor;
use dggs_core::CoreError;
use dggs_registry::Registries;
use serde_json::{json, Value};
use std::sync::Arc;

fn descriptor_json(base: &str, descriptor: &DggrsDescriptor) -> Value {
    json!({
        "id": descriptor.id,
        "title": descriptor.title,
        "description": descriptor.description,
        "crs": descriptor.crs,
        "definitionLink": descriptor.definition_link,
        "minRefinementLevel": descriptor.min_refinement_level.get(),
        "maxRefinementLevel": descriptor.max_refinement_level.get(),
        "defaultRefinementLevel": descriptor.default_refinement_level.get(),
        "defaultDepth": descriptor.default_depth.get(),
        "maxRelativeDepth": descriptor.max_relative_depth.get(),
        "links": [
            { "href": format!("{base}/dggs/{}", descriptor.id), "rel": "self", "type": "application/json" },
            { "href": format!("{base}/dggs/{}/zones", descriptor.id), "rel": "http://www.opengis.net/def/rel/ogc/1.0/zones", "type": "application/json" },
        ],
    })
}

fn scoped_ids<'a>(registries: &'a Registries, collection_id: Option<&str>) -> Result<Vec<&'a str>, ApiError> {
    match collection_id {
        None => Ok(registries.dggrs.ids()),
        Some(id) => {
            let collection = registries.collections.get(id).ok_or_else(|| CoreError::UnsupportedCollection(id.to_string()))?;
            Ok(vec![collection.dggrs_id.as_str()])
        }
    }
}

async fn list(state: &AppState, collection_id: Option<&str>) -> Result<Value, ApiError> {
    let mut ids = scoped_ids(&state.registries, collection_id)?;
    ids.sort();
    let mut entries = Vec::new();
    for id in ids {
        if let Ok(provider) = state.registries.dggrs.get(id) {
            entries.push(descriptor_json(&state.base_url, provider.descriptor()));
        }
    }
    Ok(json!({ "dggrs": entries }))
}

async fn get(state: &AppState, dggrs_id: &str, collection_id: Option<&str>) -> Result<Value, ApiError> {
    if let Some(id) = collection_id {
        let collection = state.registries.collections.get(id).ok_or_else(|| CoreError::UnsupportedCollection(id.to_string()))?;
        if collection.dggrs_id != dggrs_id {
            return Err(CoreError::UnsupportedDggrs(dggrs_id.to_string()).into());
        }
    }
    let provider = state.registries.dggrs.get(dggrs_id).map_err(|_| CoreError::UnsupportedDggrs(dggrs_id.to_string()))?;
    Ok(descriptor_json(&state.base_url, provider.descriptor()))
}

pub async fn list_all(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    Ok(Json(list(&state, None).await?))
}

pub async fn list_for_collection(Extension(state): Extension<Arc<AppState>>, Path(collection_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(list(&state, Some(&collection_id)).await?))
}

pub async fn get_one(Extension(state): Extension<Arc<AppState>>, Path(dggrs_id): Path<String>) -> Result<Json<Value>, ApiError> {
    Ok(Json(get(&state, &dggrs_id, None).await?))
}

pub async fn get_for_collection(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, dggrs_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(get(&state, &dggrs_id, Some(&collection_id)).await?))
}
