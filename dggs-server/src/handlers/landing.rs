// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `GET /` landing page. The reference implementation's
//! landing page links to `/conformance`, `/collections`, and `/dggs`; this
//! mirrors that shape.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn landing(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let base = &state.base_url;
    Ok(Json(json!({
        "title": "OGC API - Discrete Global Grid Systems",
        "description": "Hierarchical zone-based access to discretised Earth data",
        "links": [
            { "href": format!("{base}/"), "rel": "self", "type": "application/json", "title": "This document" },
            { "href": format!("{base}/conformance"), "rel": "conformance", "type": "application/json", "title": "Conformance classes" },
            { "href": format!("{base}/collections"), "rel": "data", "type": "application/json", "title": "Collections" },
            { "href": format!("{base}/dggs"), "rel": "http://www.opengis.net/def/rel/ogc/1.0/dggrs-list", "type": "application/json", "title": "Supported DGGRSs" },
        ],
    })))
}
