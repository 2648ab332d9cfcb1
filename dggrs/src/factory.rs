// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Builds the set of `DggrsProvider`s the server exposes and hands each one
//! out by id. One `DggrsRegistry` is built at startup and shared behind an
//! `Arc` for the process lifetime, matching the acquire-once resource model
//! the individual adapters (DGGAL's global context, DGGRID's scratch
//! directory) already assume.

use crate::adapters::dggal::DggalProvider;
use crate::adapters::dggrid::Igeo7Provider;
use crate::adapters::h3o::H3Provider;
use crate::constants::DEFAULT_DGGRID_EXECUTABLE;
use crate::error::port::GeoPlegmaError;
use crate::ports::dggrs::DggrsProvider;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DggrsRegistry {
    providers: HashMap<String, Arc<dyn DggrsProvider>>,
}

impl DggrsRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn DggrsProvider>) {
        let id = id.into();
        info!(dggrs = %id, "registered DGGRS provider");
        self.providers.insert(id, provider);
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn DggrsProvider>, GeoPlegmaError> {
        self.providers
            .get(id)
            .cloned()
            .ok_or_else(|| GeoPlegmaError::InvalidZoneId(format!("unknown DGGRS: {id}")))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Registers every built-in provider this workspace ships. DGGRID-backed
    /// grids are skipped (with a warning, not a hard failure) when no
    /// working directory is configured, since spinning up a scratch
    /// directory has side effects the registry shouldn't impose silently.
    pub fn bootstrap(dggrid_workdir: Option<PathBuf>) -> Self {
        let mut registry = Self::new();

        registry.register("h3", Arc::new(H3Provider::new()));

        match dggrid_workdir {
            Some(workdir) => {
                let igeo7 = Igeo7Provider::new(PathBuf::from(DEFAULT_DGGRID_EXECUTABLE), workdir);
                registry.register("igeo7", Arc::new(igeo7));
            }
            None => warn!("no DGGRID working directory configured; igeo7 provider disabled"),
        }

        match crate::adapters::dggal::known_grids() {
            Ok(grids) => {
                for grid in grids {
                    let id = grid.descriptor().id.clone();
                    registry.register(id, Arc::new(grid));
                }
            }
            Err(err) => warn!(error = %err, "DGGAL grids unavailable; skipping"),
        }

        registry
    }
}

impl Default for DggrsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
