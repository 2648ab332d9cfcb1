// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MvtError {
    #[error("unknown collection '{0}'")]
    UnsupportedCollection(String),

    #[error("collection '{0}' has no reachable provider")]
    ProviderUnavailable(String),

    #[error(transparent)]
    Dggrs(#[from] dggrs::GeoPlegmaError),

    #[error(transparent)]
    Collection(#[from] dggs_collections::CollectionError),

    #[error("tile encoding failed: {0}")]
    Encoding(String),
}

impl MvtError {
    pub fn http_status(&self) -> u16 {
        match self {
            MvtError::UnsupportedCollection(_) => 400,
            MvtError::ProviderUnavailable(_) => 400,
            MvtError::Dggrs(_) => 500,
            MvtError::Collection(_) => 500,
            MvtError::Encoding(_) => 500,
        }
    }
}
