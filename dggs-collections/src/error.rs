// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// `DatetimeNotDefined` is the one variant callers are expected to catch and
/// fold into "this collection contributes nothing" rather than propagate,
/// as an ordinary, matchable error kind.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("datasource '{0}' has no datetime column and no collection_timestamp was supplied")]
    DatetimeNotDefined(String),

    #[error("backend connection failed: {0}")]
    BackendFailure(String),

    #[error("datasource configuration for '{0}' is malformed: {1}")]
    MalformedDatasource(String, String),

    #[error(transparent)]
    Cql2(#[from] dggs_cql2::Cql2Error),

    #[error("unsupported aggregation method '{0}'")]
    UnsupportedAggregation(String),
}
