// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use thiserror::Error;

/// Error type for zone-related logic in DGGRID-CLI-backed adapters.
#[derive(Debug, Error)]
pub enum DggridError {
    #[error("Invalid zone ID format: '{0}'")]
    InvalidZoneIdFormat(String),

    #[error("DGGRID produced no output for metafile {meta_path}")]
    MissingOutput { meta_path: String },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("DGGRID executable exited with a non-zero status for metafile {meta_path}")]
    ExecutionFailed { meta_path: String },
}
