// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use super::level::{RefinementLevel, RelativeDepth};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Refinement-level offset applied when converting a zone from one DGGRS
/// into another: `target_level = source_level + zonelevel_offset`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConversionEntry {
    pub zonelevel_offset: i32,
}

/// `{id, title, description, crs, defaultDepth, maxRefinementLevel, links}`
/// plus a conversion table to other DGGRS ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DggrsDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub crs: String,
    pub min_refinement_level: RefinementLevel,
    pub max_refinement_level: RefinementLevel,
    pub default_refinement_level: RefinementLevel,
    pub default_depth: RelativeDepth,
    pub max_relative_depth: RelativeDepth,
    pub definition_link: String,
    /// `target_dggrs_id -> offset` describing which other DGGRSs this
    /// provider can convert *into*.
    pub dggrs_conversion: HashMap<String, ConversionEntry>,
}

impl DggrsDescriptor {
    pub fn conversion_offset(&self, target_dggrs_id: &str) -> Option<i32> {
        self.dggrs_conversion
            .get(target_dggrs_id)
            .map(|entry| entry.zonelevel_offset)
    }
}
