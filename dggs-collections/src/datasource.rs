// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-datasource configuration shared by every backend. Backend-specific
/// extras (table name, file path, zarr
/// store url, STAC catalog) live in each backend's own config struct, which
/// embeds one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceConfig {
    pub data_cols: Vec<String>,
    #[serde(default)]
    pub exclude_data_cols: Vec<String>,
    pub zone_groups: HashMap<u32, String>,
    pub datetime_col: Option<String>,
    #[serde(default)]
    pub nodata_mapping: HashMap<String, serde_json::Value>,
}

impl DatasourceConfig {
    pub fn zone_id_column(&self, refinement_level: u32) -> Option<&str> {
        self.zone_groups.get(&refinement_level).map(String::as_str)
    }

    pub fn nodata_for(&self, dtype: &str) -> Option<&serde_json::Value> {
        self.nodata_mapping
            .get(dtype)
            .or_else(|| self.nodata_mapping.get("default"))
    }

    /// Resolves the final column projection: `data_cols`
    /// minus exclusions, intersected with any caller-requested inclusion
    /// list, minus any caller-requested exclusion list. `"*"` in
    /// `data_cols` means "everything the backend schema has".
    pub fn project(
        &self,
        schema_columns: &[String],
        include_properties: Option<&[String]>,
        exclude_properties: Option<&[String]>,
    ) -> Vec<String> {
        let base: Vec<String> = if self.data_cols.iter().any(|c| c == "*") {
            schema_columns.to_vec()
        } else {
            self.data_cols.clone()
        };

        let mut projected: Vec<String> = base
            .into_iter()
            .filter(|c| !self.exclude_data_cols.contains(c))
            .collect();

        if let Some(include) = include_properties {
            if !include.is_empty() {
                projected.retain(|c| include.contains(c));
            }
        }

        if let Some(exclude) = exclude_properties {
            projected.retain(|c| !exclude.contains(c));
        }

        projected
    }
}
