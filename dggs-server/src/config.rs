// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI/environment arguments, in the `edr-api`/`wms-api`
//! `clap::Parser` + `env` style.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "dggs-server")]
#[command(about = "OGC API - Discrete Global Grid Systems server")]
pub struct Args {
    /// Path to the configuration document.
    #[arg(long, env = "DGGS_CONFIG")]
    pub config: String,

    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8085", env = "DGGS_LISTEN_ADDR")]
    pub listen: String,

    /// Base URL used to build absolute links in responses.
    #[arg(long, default_value = "http://localhost:8085", env = "DGGS_BASE_URL")]
    pub base_url: String,

    /// Working directory for DGGRID-backed providers (e.g. igeo7). Omit to
    /// disable DGGRID-backed grids.
    #[arg(long, env = "DGGS_DGGRID_WORKDIR")]
    pub dggrid_workdir: Option<std::path::PathBuf>,

    /// Log level, overridden by `RUST_LOG` when set.
    #[arg(long, default_value = "info", env = "DGGS_LOG_LEVEL")]
    pub log_level: String,

    /// Number of Tokio worker threads.
    #[arg(long, env = "DGGS_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}
