// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error kinds the HTTP layer maps to status codes. `dggs-core`
//! stays free of any HTTP-framework dependency; `http_status` hands back a
//! plain code so `dggs-server` can build its single `IntoResponse` impl
//! without this crate knowing axum exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown DGGRS '{0}'")]
    UnsupportedDggrs(String),

    #[error("unknown collection '{0}'")]
    UnsupportedCollection(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no acceptable content type for this request")]
    NotAcceptable,

    /// No collection contributed, or the computed zone set is empty. Maps to
    /// HTTP 204 with an empty body, not an error document.
    #[error("empty result")]
    Empty,

    #[error("the filter references attributes no in-scope collection can satisfy")]
    CqlAttributesUnsatisfied,

    #[error(transparent)]
    Dggrs(#[from] dggrs::GeoPlegmaError),

    #[error(transparent)]
    Collection(#[from] dggs_collections::CollectionError),

    #[error(transparent)]
    Cql2(#[from] dggs_cql2::Cql2Error),

    #[error(transparent)]
    Geom(#[from] dggs_geom::GeomError),

    #[error("backend failure: {0}")]
    BackendFailure(String),
}

impl CoreError {
    /// HTTP status this error kind maps to.
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::UnsupportedDggrs(_) | CoreError::UnsupportedCollection(_) => 400,
            CoreError::BadRequest(_) => 400,
            CoreError::NotAcceptable => 406,
            CoreError::Empty => 204,
            CoreError::CqlAttributesUnsatisfied => 400,
            CoreError::Cql2(_) => 400,
            CoreError::Geom(_) => 400,
            CoreError::Dggrs(_) => 500,
            CoreError::Collection(_) => 500,
            CoreError::BackendFailure(_) => 500,
        }
    }
}
