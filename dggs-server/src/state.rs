// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Process-lifetime shared state, limited to the three immutable
//! registries, handed to every handler behind `axum::Extension<Arc<AppState>>`.

use anyhow::{Context, Result};
use dggs_registry::Registries;
use std::path::Path;

pub struct AppState {
    pub registries: Registries,
    pub base_url: String,
}

impl AppState {
    pub async fn new(config_path: &Path, dggrid_workdir: Option<std::path::PathBuf>, base_url: String) -> Result<Self> {
        let document = dggs_registry::load_config(config_path).context("loading configuration document")?;
        let registries = dggs_registry::bootstrap(&document, dggrid_workdir).await.context("bootstrapping registries")?;
        Ok(Self { registries, base_url })
    }
}
