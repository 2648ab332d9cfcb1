// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("bbox must have exactly 4 comma-separated numbers, got {0}")]
    BadBboxLength(usize),

    #[error("bbox component '{0}' is not a valid number")]
    BadBboxComponent(String),

    #[error("bbox min must be <= max on both axes")]
    InvertedBbox,

    #[error("unsupported bbox-crs '{0}'; only OGC:CRS84 is implemented")]
    UnsupportedCrs(String),
}
