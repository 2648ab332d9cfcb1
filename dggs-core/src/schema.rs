// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `/collections/{id}/queryables` and `/collections/{id}/schema` rendering
//!: both are a JSON-Schema `properties` object built straight
//! from a collection's `get_datadictionary`, so they share one function and
//! differ only in which links the caller attaches.

use crate::error::CoreError;
use dggs_registry::Registries;
use serde_json::{json, Map, Value};

const QUERYABLES_SCHEMA_URI: &str = "https://json-schema.org/draft/2020-12/schema";

pub async fn collection_schema(registries: &Registries, collection_id: &str) -> Result<Value, CoreError> {
    let collection = registries
        .collections
        .get(collection_id)
        .ok_or_else(|| CoreError::UnsupportedCollection(collection_id.to_string()))?;

    let provider = registries
        .provider_for(collection)
        .ok_or_else(|| CoreError::UnsupportedCollection(collection_id.to_string()))?;

    let dictionary = provider.get_datadictionary(&collection.datasource_id, true).await?;

    let mut properties = Map::new();
    for (name, dtype) in &dictionary {
        properties.insert(name.clone(), json!({ "type": json_type_for(dtype) }));
    }

    Ok(json!({
        "$schema": QUERYABLES_SCHEMA_URI,
        "$id": format!("/collections/{collection_id}/schema"),
        "title": collection.title,
        "type": "object",
        "properties": Value::Object(properties),
    }))
}

fn json_type_for(dtype: &str) -> &'static str {
    match dtype {
        "float64" => "number",
        "int64" => "integer",
        "bool" => "boolean",
        _ => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_backend_dtypes_to_json_schema_types() {
        assert_eq!(json_type_for("float64"), "number");
        assert_eq!(json_type_for("int64"), "integer");
        assert_eq!(json_type_for("bool"), "boolean");
        assert_eq!(json_type_for("string"), "string");
    }
}
