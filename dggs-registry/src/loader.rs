// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::config::ConfigDocument;
use crate::error::RegistryError;
use std::path::Path;
use tracing::info;

pub fn load_config(path: &Path) -> Result<ConfigDocument, RegistryError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RegistryError::Unreadable(path.display().to_string(), e))?;
    let document: ConfigDocument = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        dggrs = document.dggrs.len(),
        collection_providers = document.collection_providers.len(),
        collections = document.collections.len(),
        "loaded configuration document"
    );
    Ok(document)
}
