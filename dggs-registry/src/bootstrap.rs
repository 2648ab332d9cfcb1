// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns a validated `ConfigDocument` into the three immutable registries.
//! DGGRS providers come from `dggrs::DggrsRegistry`'s compile-time map;
//! collection providers are constructed here, one backend instance per
//! `collection_providers` entry, each holding its own backend handle for
//! the process lifetime.

use crate::config::{ConfigDocument, ProviderClass};
use crate::error::RegistryError;
use crate::registries::{Collection, Registries};
use dggrs::{DggrsRegistry, ZoneIdRepr};
use dggs_collections::backends::{
    ParquetDatasource, ParquetProvider, SqlDatasource, SqlProvider, StacDatasource, StacProvider,
    ZarrDatasource, ZarrProvider,
};
use dggs_collections::CollectionProvider;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub async fn bootstrap(
    config: &ConfigDocument,
    dggrid_workdir: Option<PathBuf>,
) -> Result<Registries, RegistryError> {
    let dggrs_registry = DggrsRegistry::bootstrap(dggrid_workdir);
    let known_dggrs: HashSet<&str> = dggrs_registry.ids().into_iter().collect();
    crate::validate::validate(config, &known_dggrs)?;

    let mut collection_providers: HashMap<String, Arc<dyn CollectionProvider>> = HashMap::new();
    for (provider_id, entry) in &config.collection_providers {
        let provider = build_provider(entry).await?;
        info!(provider_id, datasources = entry.datasources.len(), "built collection provider");
        collection_providers.insert(provider_id.clone(), provider);
    }

    let mut collections = HashMap::new();
    for (id, entry) in &config.collections {
        let binding = &entry.collection_provider;
        let repr = parse_repr(&binding.dggrs_zoneid_repr)?;
        collections.insert(
            id.clone(),
            Collection {
                id: id.clone(),
                title: entry.title.clone(),
                description: entry.description.clone(),
                extent: entry.extent.clone(),
                provider_id: binding.provider_id.clone(),
                dggrs_id: binding.dggrs_id.clone(),
                dggrs_zoneid_repr: repr,
                min_refinement_level: binding.min_refinement_level,
                max_refinement_level: binding.max_refinement_level,
                datasource_id: binding.datasource_id.clone(),
            },
        );
    }

    Ok(Registries { dggrs: Arc::new(dggrs_registry), collection_providers, collections })
}

fn parse_repr(raw: &str) -> Result<ZoneIdRepr, RegistryError> {
    match raw {
        "textual" => Ok(ZoneIdRepr::Textual),
        "uint64" => Ok(ZoneIdRepr::Uint64),
        "hex" => Ok(ZoneIdRepr::Hex),
        other => Err(RegistryError::Invalid(format!("unknown dggrs_zoneid_repr '{other}'"))),
    }
}

async fn build_provider(
    entry: &crate::config::CollectionProviderConfigEntry,
) -> Result<Arc<dyn CollectionProvider>, RegistryError> {
    match entry.provider_class {
        ProviderClass::Sql => {
            let database_url = entry
                .connection
                .get("database_url")
                .and_then(|v| v.as_str())
                .ok_or_else(|| RegistryError::Invalid("sql provider missing connection.database_url".to_string()))?;

            let datasources = entry
                .datasources
                .iter()
                .map(|(id, ds)| (id.clone(), SqlDatasource { table: ds.location.clone(), config: ds.config.clone() }))
                .collect();

            let provider = SqlProvider::connect(database_url, datasources).await?;
            Ok(Arc::new(provider))
        }
        ProviderClass::Parquet => {
            let base_dir = entry.connection.get("base_dir").and_then(|v| v.as_str()).unwrap_or(".");
            let datasources = entry
                .datasources
                .iter()
                .map(|(id, ds)| {
                    (
                        id.clone(),
                        ParquetDatasource { path: PathBuf::from(base_dir).join(&ds.location), config: ds.config.clone() },
                    )
                })
                .collect();
            Ok(Arc::new(ParquetProvider::new(datasources)))
        }
        ProviderClass::Zarr => {
            let base_dir = entry.connection.get("base_dir").and_then(|v| v.as_str()).unwrap_or(".");
            let datasources = entry
                .datasources
                .iter()
                .map(|(id, ds)| {
                    (
                        id.clone(),
                        ZarrDatasource {
                            store_path: PathBuf::from(base_dir).join(&ds.location),
                            config: ds.config.clone(),
                            time_axis: ds.time_axis.clone(),
                        },
                    )
                })
                .collect();
            Ok(Arc::new(ZarrProvider::new(datasources)))
        }
        ProviderClass::Stac => {
            let catalog_url = entry
                .connection
                .get("catalog_url")
                .and_then(|v| v.as_str())
                .ok_or_else(|| RegistryError::Invalid("stac provider missing connection.catalog_url".to_string()))?
                .to_string();

            let datasources = entry
                .datasources
                .iter()
                .map(|(id, ds)| {
                    (
                        id.clone(),
                        StacDatasource {
                            catalog_url: catalog_url.clone(),
                            collection_id: ds.location.clone(),
                            config: ds.config.clone(),
                        },
                    )
                })
                .collect();
            Ok(Arc::new(StacProvider::new(datasources)))
        }
    }
}
