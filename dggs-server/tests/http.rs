// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drives full requests through the router without binding a socket
//! (`tower::ServiceExt::oneshot`), against a registry built directly from
//! `DggrsRegistry::bootstrap` rather than a configuration file on disk.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router};
use dggrs::DggrsRegistry;
use dggs_registry::Registries;
use dggs_server::handlers;
use dggs_server::state::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

fn empty_state() -> Arc<AppState> {
    let registries = Registries { dggrs: Arc::new(DggrsRegistry::bootstrap(None)), collection_providers: HashMap::new(), collections: HashMap::new() };
    Arc::new(AppState { registries, base_url: "http://localhost:8085".to_string() })
}

fn app() -> Router {
    Router::new()
        .route("/", get(handlers::landing::landing))
        .route("/conformance", get(handlers::conformance::conformance))
        .route("/collections", get(handlers::collections::list_collections))
        .route("/dggs", get(handlers::dggs::list_all))
        .route("/dggs/:dggrs_id", get(handlers::dggs::get_one))
        .layer(Extension(empty_state()))
}

#[tokio::test]
async fn landing_page_returns_ok_json() {
    let response = app().oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn conformance_omits_collections_class_when_none_are_configured() {
    let response = app().oneshot(Request::builder().uri("/conformance").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let classes = body["conformsTo"].as_array().unwrap();
    assert!(classes.iter().all(|c| !c.as_str().unwrap().ends_with("/collections")));
}

#[tokio::test]
async fn empty_collections_list_is_still_valid_json() {
    let response = app().oneshot(Request::builder().uri("/collections").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn known_dggrs_is_found_by_id() {
    let response = app().oneshot(Request::builder().uri("/dggs/h3").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_dggrs_yields_bad_request() {
    let response = app().oneshot(Request::builder().uri("/dggs/not-a-grid").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
