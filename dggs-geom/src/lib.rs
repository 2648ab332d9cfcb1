// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bbox parsing, GeoJSON round-trip, and the `bbox-crs` passthrough the
//! query layer needs before a request ever touches a DGGRS provider.

pub mod bbox;
pub mod error;
pub mod geojson_ext;

pub use bbox::parse_bbox;
pub use error::GeomError;
pub use geojson_ext::{feature_collection_from_zones, polygon_to_geojson};
