// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Every one of these is fatal at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("could not read configuration document at {0}: {1}")]
    Unreadable(String, std::io::Error),

    #[error("configuration document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("configuration is invalid: {0}")]
    Invalid(String),

    #[error(transparent)]
    Dggrs(#[from] dggrs::GeoPlegmaError),

    #[error(transparent)]
    Collection(#[from] dggs_collections::CollectionError),
}
