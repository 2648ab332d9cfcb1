// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Startup validation: every `dggrsId` and
//! `providerId` a collection references must exist, and `min <=
//! max_refinement_level`. Any failure aborts startup with a non-zero exit
//! code.

use crate::config::ConfigDocument;
use crate::error::RegistryError;
use std::collections::HashSet;

pub fn validate(config: &ConfigDocument, known_dggrs_ids: &HashSet<&str>) -> Result<(), RegistryError> {
    for (id, entry) in &config.dggrs {
        if !known_dggrs_ids.contains(entry.provider_class.as_str()) {
            return Err(RegistryError::Invalid(format!(
                "dggrs entry '{id}' references unknown provider_class '{}'",
                entry.provider_class
            )));
        }
    }

    for (collection_id, collection) in &config.collections {
        let binding = &collection.collection_provider;

        if !config.dggrs.contains_key(&binding.dggrs_id) {
            return Err(RegistryError::Invalid(format!(
                "collection '{collection_id}' references unregistered dggrsId '{}'",
                binding.dggrs_id
            )));
        }

        if !config.collection_providers.contains_key(&binding.provider_id) {
            return Err(RegistryError::Invalid(format!(
                "collection '{collection_id}' references unregistered providerId '{}'",
                binding.provider_id
            )));
        }

        if binding.min_refinement_level > binding.max_refinement_level {
            return Err(RegistryError::Invalid(format!(
                "collection '{collection_id}' has min_refinement_level {} > max_refinement_level {}",
                binding.min_refinement_level, binding.max_refinement_level
            )));
        }

        let provider = &config.collection_providers[&binding.provider_id];
        if !provider.datasources.contains_key(&binding.datasource_id) {
            return Err(RegistryError::Invalid(format!(
                "collection '{collection_id}' references datasource_id '{}' not present on provider '{}'",
                binding.datasource_id, binding.provider_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CollectionConfigEntry, CollectionProviderConfigEntry, CollectionProviderRef, DatasourceEntry,
        DggrsConfigEntry, Extent, ProviderClass,
    };
    use dggs_collections::DatasourceConfig;
    use std::collections::HashMap;

    fn base_config() -> ConfigDocument {
        let mut datasources = HashMap::new();
        datasources.insert(
            "suitability".to_string(),
            DatasourceEntry {
                config: DatasourceConfig {
                    data_cols: vec!["*".to_string()],
                    exclude_data_cols: vec![],
                    zone_groups: HashMap::from([(8, "zone_id".to_string())]),
                    datetime_col: None,
                    nodata_mapping: HashMap::new(),
                },
                location: "suitability_table".to_string(),
                time_axis: vec![],
            },
        );

        let mut collection_providers = HashMap::new();
        collection_providers.insert(
            "pg-main".to_string(),
            CollectionProviderConfigEntry {
                provider_class: ProviderClass::Sql,
                connection: serde_json::json!({ "database_url": "postgres://localhost/geoplegma" }),
                datasources,
            },
        );

        let mut dggrs = HashMap::new();
        dggrs.insert(
            "igeo7".to_string(),
            DggrsConfigEntry {
                provider_class: "igeo7".to_string(),
                title: "IGEO7".to_string(),
                description: "DGGRID ISEA7H".to_string(),
                definition_link: "https://example.org/igeo7".to_string(),
            },
        );

        let mut collections = HashMap::new();
        collections.insert(
            "suitability_hytruck".to_string(),
            CollectionConfigEntry {
                title: "Hytruck suitability".to_string(),
                description: "test".to_string(),
                extent: Extent::default(),
                collection_provider: CollectionProviderRef {
                    provider_id: "pg-main".to_string(),
                    dggrs_id: "igeo7".to_string(),
                    dggrs_zoneid_repr: "textual".to_string(),
                    min_refinement_level: 6,
                    max_refinement_level: 9,
                    datasource_id: "suitability".to_string(),
                },
            },
        );

        ConfigDocument { dggrs, collection_providers, collections }
    }

    #[test]
    fn accepts_well_formed_config() {
        let config = base_config();
        let known: HashSet<&str> = HashSet::from(["igeo7"]);
        assert!(validate(&config, &known).is_ok());
    }

    #[test]
    fn rejects_unregistered_provider_id() {
        let mut config = base_config();
        config
            .collections
            .get_mut("suitability_hytruck")
            .unwrap()
            .collection_provider
            .provider_id = "missing".to_string();
        let known: HashSet<&str> = HashSet::from(["igeo7"]);
        assert!(validate(&config, &known).is_err());
    }

    #[test]
    fn rejects_inverted_refinement_range() {
        let mut config = base_config();
        config
            .collections
            .get_mut("suitability_hytruck")
            .unwrap()
            .collection_provider
            .max_refinement_level = 4;
        let known: HashSet<&str> = HashSet::from(["igeo7"]);
        assert!(validate(&config, &known).is_err());
    }
}
