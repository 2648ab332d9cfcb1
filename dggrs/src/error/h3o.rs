// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Error type for zone-related logic in the H3 (h3o) adapter.
#[derive(Debug, Error)]
pub enum H3oError {
    #[error("Invalid H3 zone ID '{zone_id}': {source}")]
    InvalidZoneID {
        zone_id: String,
        #[source]
        source: h3o::error::InvalidCellIndex,
    },

    #[error("Invalid H3 resolution for zone '{zone_id}'")]
    ResolutionLimitReached { zone_id: String },

    #[error("Invalid H3 resolution {0}")]
    InvalidResolution(#[from] h3o::error::InvalidResolution),
}
