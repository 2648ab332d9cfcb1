// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Cql2Error {
    #[error("CQL2-text parse error: {0}")]
    TextSyntax(String),

    #[error("CQL2-JSON parse error: {0}")]
    JsonSyntax(#[from] serde_json::Error),

    #[error("unknown CQL2 JSON operator '{0}'")]
    UnknownOperator(String),

    #[error("CQL2 JSON node is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("attribute '{0}' is not queryable on this collection")]
    UnknownAttribute(String),
}
