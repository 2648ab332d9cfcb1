// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! OGC API - Discrete Global Grid Systems server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dggs_server::config::Args;
use dggs_server::handlers;
use dggs_server::state::AppState;

fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build().expect("failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt().with_env_filter(filter).with_target(true).with_level(true).json().init();

    info!("starting dggs-server");

    let state = match AppState::new(std::path::Path::new(&args.config), args.dggrid_workdir.clone(), args.base_url.clone()).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("failed to initialize application state: {e:#}");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/", get(handlers::landing::landing))
        .route("/conformance", get(handlers::conformance::conformance))
        .route("/collections", get(handlers::collections::list_collections))
        .route("/collections/:collection_id", get(handlers::collections::get_collection))
        .route("/collections/:collection_id/queryables", get(handlers::collections::queryables))
        .route("/collections/:collection_id/schema", get(handlers::collections::queryables))
        .route("/dggs", get(handlers::dggs::list_all))
        .route("/dggs/:dggrs_id", get(handlers::dggs::get_one))
        .route("/collections/:collection_id/dggs", get(handlers::dggs::list_for_collection))
        .route("/collections/:collection_id/dggs/:dggrs_id", get(handlers::dggs::get_for_collection))
        .route("/dggs/:dggrs_id/zones", get(handlers::zones::zone_query))
        .route("/collections/:collection_id/dggs/:dggrs_id/zones", get(handlers::zones::zone_query_for_collection))
        .route("/dggs/:dggrs_id/zones/:zone_id", get(handlers::zones::zone_info))
        .route("/collections/:collection_id/dggs/:dggrs_id/zones/:zone_id", get(handlers::zones::zone_info_for_collection))
        .route("/dggs/:dggrs_id/zones/:zone_id/data", get(handlers::zones::zone_data))
        .route(
            "/collections/:collection_id/dggs/:dggrs_id/zones/:zone_id/data",
            get(handlers::zones::zone_data_for_collection),
        )
        .route("/tiles-api/:collection_id/:z/:x/:y", get(handlers::tiles::tile))
        .route("/tiles-api/:collection_file", get(handlers::tiles::tile_json))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse().expect("invalid listen address");

    info!("dggs-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind");
    axum::serve(listener, app).await.expect("server failed");
}
