// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::dggal::DggalError;
use crate::error::dggrid::DggridError;
use crate::error::h3o::H3oError;
use crate::models::{RefinementLevel, RelativeDepth, ZoneIdRepr};
use thiserror::Error;

/// Errors surfaced by a `DggrsProvider`. Any DGGRS-library exception is
/// translated into one of these and the HTTP layer maps `BackendFailure`-like
/// variants to 500; `ConversionUnsupported` is caught by the planner and
/// causes the affected collection to be skipped, not the whole request to
/// fail.
#[derive(Debug, Error)]
pub enum GeoPlegmaError {
    #[error("DGGAL error: {0}")]
    Dggal(#[from] DggalError),

    #[error("DGGRID error: {0}")]
    Dggrid(#[from] DggridError),

    #[error("H3o error: {0}")]
    H3o(#[from] H3oError),

    #[error("Refinement level must be non-negative, got {0}")]
    DepthBelowZero(i32),

    #[error("Relative depth must be non-negative, got {0}")]
    RelativeDepthBelowZero(i32),

    #[error("Unsupported tool/grid combination: {tool}, {grid}")]
    UnsupportedCombo { tool: String, grid: String },

    #[error(
        "Requested level {requested} exceeds maximum allowed {maximum} for grid '{grid_name}'"
    )]
    DepthLimitReached {
        grid_name: String,
        requested: RefinementLevel,
        maximum: RefinementLevel,
    },

    #[error(
        "Requested relative depth {requested} exceeds maximum allowed {maximum} for grid '{grid_name}'"
    )]
    RelativeDepthLimitReached {
        grid_name: String,
        requested: RelativeDepth,
        maximum: RelativeDepth,
    },

    #[error(
        "Base level plus relative depth {requested} exceeds maximum refinement level {maximum} for grid '{grid_name}'"
    )]
    RefinementLevelPlusRelativeDepthLimitReached {
        grid_name: String,
        requested: RelativeDepth,
        maximum: RefinementLevel,
    },

    #[error("Refinement level too large to convert to u8: {0}")]
    DepthTooLarge(RefinementLevel),

    #[error("Zone representation {0:?} is not implementable for this DGGRS")]
    UnsupportedRepresentation(ZoneIdRepr),

    #[error("Cannot derive refinement level from zone id '{zone_id}' in representation {repr:?}; supply it out-of-band")]
    LevelAmbiguous { zone_id: String, repr: ZoneIdRepr },

    #[error("Conversion from '{from}' to '{to}' is not declared")]
    ConversionUnsupported { from: String, to: String },

    #[error("Both bbox and parent zone are unset; at least one must be supplied")]
    NoZoneSelector,

    #[error("Invalid zone id '{0}'")]
    InvalidZoneId(String),
}
