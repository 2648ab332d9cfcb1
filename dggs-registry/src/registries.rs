// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Three immutable, O(1)-lookup maps: DGGRS providers, collection
//! providers, and collections. Built once at startup, shared behind `Arc`
//! for the rest of the process.

use crate::config::Extent;
use dggrs::{DggrsRegistry, ZoneIdRepr};
use dggs_collections::CollectionProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// A resolved `Collection`, with the DGGRS-zoneid
/// representation already parsed out of its config string form.
#[derive(Debug, Clone)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub extent: Extent,
    pub provider_id: String,
    pub dggrs_id: String,
    pub dggrs_zoneid_repr: ZoneIdRepr,
    pub min_refinement_level: u32,
    pub max_refinement_level: u32,
    pub datasource_id: String,
}

pub struct Registries {
    pub dggrs: Arc<DggrsRegistry>,
    pub collection_providers: HashMap<String, Arc<dyn CollectionProvider>>,
    pub collections: HashMap<String, Collection>,
}

impl Registries {
    pub fn collections_for_dggrs<'a>(&'a self, dggrs_id: &'a str) -> impl Iterator<Item = &'a Collection> {
        self.collections.values().filter(move |c| c.dggrs_id == dggrs_id)
    }

    pub fn provider_for(&self, collection: &Collection) -> Option<Arc<dyn CollectionProvider>> {
        self.collection_providers.get(&collection.provider_id).cloned()
    }
}
