// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Response DTOs the handlers serialise to JSON. Field names follow the OGC
//! API camelCase convention directly rather than relying on a blanket
//! rename-all, since a couple of fields (`id`, `crs`) keep their short form.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub title: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self { href: href.into(), rel: rel.into(), media_type: media_type.into(), title: None }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneInfoResponse {
    pub id: String,
    pub level: u32,
    #[serde(rename = "shapeType")]
    pub shape_type: String,
    pub crs: String,
    pub centroid: geojson::Geometry,
    pub bbox: [f64; 4],
    pub geometry: Option<geojson::Geometry>,
    #[serde(rename = "areaMetersSquare")]
    pub area_m2: f64,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZonesResponse {
    pub zones: Vec<String>,
    #[serde(rename = "returnedAreaMetersSquare")]
    pub returned_area_m2: f64,
    pub links: Vec<Link>,
}
