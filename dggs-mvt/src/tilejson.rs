// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! TileJSON metadata for `/tiles-api/{collectionId}.json`
//! (https://github.com/mapbox/tilejson-spec), mirroring the shape a
//! `MvtService::get_tilejson` method produces from its tileset config.

use dggs_registry::Collection;
use serde_json::{json, Value};

pub fn tilejson(base_url: &str, collection: &Collection) -> Value {
    let bbox = collection.extent.bbox.unwrap_or([-180.0, -85.051_128, 180.0, 85.051_128]);
    let center = [(bbox[0] + bbox[2]) / 2.0, (bbox[1] + bbox[3]) / 2.0, collection.min_refinement_level as f64];

    json!({
        "tilejson": "3.0.0",
        "name": collection.title,
        "description": collection.description,
        "scheme": "xyz",
        "format": "pbf",
        "tiles": [format!("{base_url}/tiles-api/{}/{{z}}/{{x}}/{{y}}", collection.id)],
        "bounds": bbox,
        "center": center,
        "minzoom": collection.min_refinement_level,
        "maxzoom": collection.max_refinement_level,
        "vector_layers": [
            { "id": collection.id, "description": collection.description, "minzoom": collection.min_refinement_level, "maxzoom": collection.max_refinement_level }
        ],
    })
}
