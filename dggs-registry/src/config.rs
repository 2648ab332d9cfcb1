// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serde model of the configuration document: three tables, `dggrs`,
//! `collection_providers`, `collections`, loaded once at startup and never
//! mutated again.

use dggs_collections::DatasourceConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigDocument {
    pub dggrs: HashMap<String, DggrsConfigEntry>,
    pub collection_providers: HashMap<String, CollectionProviderConfigEntry>,
    pub collections: HashMap<String, CollectionConfigEntry>,
}

/// One `dggrs` table row. `provider_class` must name one of the DGGRS ids
/// `dggrs::DggrsRegistry::bootstrap` compiles in (`"h3"`, `"igeo7"`, or one
/// of the DGGAL grid ids); this field selects from that compile-time map
/// rather than constructing anything itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DggrsConfigEntry {
    pub provider_class: String,
    pub title: String,
    pub description: String,
    pub definition_link: String,
}

/// Which backend kind serves a `collection_providers` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderClass {
    Sql,
    Parquet,
    Zarr,
    Stac,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionProviderConfigEntry {
    pub provider_class: ProviderClass,
    /// Backend-specific connection info: a `database_url` for `sql`, a base
    /// directory for `parquet`/`zarr`, or a catalog URL for `stac`.
    pub connection: serde_json::Value,
    pub datasources: HashMap<String, DatasourceEntry>,
}

/// A `Datasource` plus the backend-specific extra it needs: table name,
/// file path, or STAC collection id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasourceEntry {
    #[serde(flatten)]
    pub config: DatasourceConfig,
    /// Backend-specific locator: SQL table name, Parquet file path, Zarr
    /// store path, or STAC collection id.
    pub location: String,
    /// Zarr only: unix-epoch seconds for each entry along the array's time
    /// axis. Ignored by every other backend class.
    #[serde(default)]
    pub time_axis: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Extent {
    pub bbox: Option<[f64; 4]>,
    pub temporal: Option<[Option<String>; 2]>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionProviderRef {
    pub provider_id: String,
    pub dggrs_id: String,
    pub dggrs_zoneid_repr: String,
    pub min_refinement_level: u32,
    pub max_refinement_level: u32,
    pub datasource_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionConfigEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub extent: Extent,
    pub collection_provider: CollectionProviderRef,
}
