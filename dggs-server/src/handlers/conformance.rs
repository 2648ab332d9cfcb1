// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `GET /conformance`. Classes that reflect a fixed code capability (the
//! core pipeline, the wire encodings) are always listed; classes that
//! depend on what the deployment configured (`collections`, `tiles`) are
//! computed from the registries, not hardcoded.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

const BASE_URI: &str = "http://www.opengis.net/spec/ogcapi-dggs-1/1.0/conf";

pub async fn conformance(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mut classes = vec![
        format!("{BASE_URI}/core"),
        format!("{BASE_URI}/dggs"),
        format!("{BASE_URI}/json"),
        format!("{BASE_URI}/geojson"),
        format!("{BASE_URI}/ubjson"),
        format!("{BASE_URI}/zarr"),
    ];

    if !state.registries.collections.is_empty() {
        classes.push(format!("{BASE_URI}/collections"));
        classes.push(format!("{BASE_URI}/tiles"));
    }

    Ok(Json(json!({ "conformsTo": classes })))
}
