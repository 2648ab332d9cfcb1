// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! STAC-catalog-backed collection provider. Resolves a datasource to a STAC
//! item search against a remote API, then reads each matched asset's
//! `properties` object as the per-zone row; used for datasources whose
//! values are asset metadata rather than bulk pixel/feature data.

use crate::datasource::DatasourceConfig;
use crate::error::CollectionError;
use crate::model::{ColumnMeta, DataTable, TypedColumn};
use crate::port::{CollectionProvider, GetDataRequest, QuantizeMethod};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

pub struct StacDatasource {
    pub catalog_url: String,
    pub collection_id: String,
    pub config: DatasourceConfig,
}

pub struct StacProvider {
    client: reqwest::Client,
    datasources: HashMap<String, StacDatasource>,
}

impl StacProvider {
    pub fn new(datasources: HashMap<String, StacDatasource>) -> Self {
        Self { client: reqwest::Client::new(), datasources }
    }

    fn datasource(&self, id: &str) -> Result<&StacDatasource, CollectionError> {
        self.datasources
            .get(id)
            .ok_or_else(|| CollectionError::MalformedDatasource(id.to_string(), "not registered".to_string()))
    }

    async fn search_items(&self, ds: &StacDatasource, zone_ids: &[String]) -> Result<Vec<Value>, CollectionError> {
        let url = format!("{}/search", ds.catalog_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "collections": [ds.collection_id],
            "query": { "zoneId": { "in": zone_ids } },
            "limit": zone_ids.len().max(1),
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?
            .error_for_status()
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        Ok(parsed
            .get("features")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CollectionProvider for StacProvider {
    async fn get_data(&self, request: &GetDataRequest) -> Result<DataTable, CollectionError> {
        let ds = self.datasource(&request.datasource_id)?;
        if ds.config.zone_id_column(request.refinement_level).is_none() {
            return Ok(DataTable::default());
        }

        if request.include_datetime && ds.config.datetime_col.is_none() && request.collection_timestamp.is_none() {
            return Err(CollectionError::DatetimeNotDefined(request.datasource_id.clone()));
        }

        let items = self.search_items(ds, &request.zone_ids).await?;

        let mut by_zone: HashMap<String, Value> = HashMap::new();
        for item in items {
            let properties = item.get("properties").cloned().unwrap_or(Value::Null);
            if let Some(zone) = properties.get("zoneId").and_then(Value::as_str) {
                by_zone.insert(zone.to_string(), properties);
            }
        }

        let schema: Vec<String> = by_zone
            .values()
            .next()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().filter(|k| k.as_str() != "zoneId").cloned().collect())
            .unwrap_or_default();

        let projection = ds.config.project(
            &schema,
            request.include_properties.as_deref(),
            request.exclude_properties.as_deref(),
        );
        if projection.is_empty() {
            return Ok(DataTable::default());
        }

        let output_zones = if request.input_zone_ids_padding {
            request.zone_ids.clone()
        } else {
            request.zone_ids.iter().filter(|z| by_zone.contains_key(*z)).cloned().collect()
        };

        let mut columns = HashMap::new();
        let mut cols_meta = Vec::new();

        for field in &projection {
            let values: Vec<Option<String>> = output_zones
                .iter()
                .map(|z| {
                    by_zone
                        .get(z)
                        .and_then(|props| props.get(field))
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                })
                .collect();

            cols_meta.push(ColumnMeta { name: field.clone(), dtype: "string".to_string() });
            columns.insert(field.clone(), TypedColumn::Text(values));
        }

        Ok(DataTable { zone_ids: output_zones, cols_meta, columns, datetimes: None, dimensions: None })
    }

    async fn get_datadictionary(
        &self,
        datasource_id: &str,
        include_zone_id: bool,
    ) -> Result<HashMap<String, String>, CollectionError> {
        let ds = self.datasource(datasource_id)?;
        let items = self.search_items(ds, &[]).await.unwrap_or_default();
        let schema: Vec<String> = items
            .first()
            .and_then(|i| i.get("properties"))
            .and_then(Value::as_object)
            .map(|obj| obj.keys().filter(|k| k.as_str() != "zoneId").cloned().collect())
            .unwrap_or_default();

        let mut dict: HashMap<String, String> = ds
            .config
            .project(&schema, None, None)
            .into_iter()
            .map(|c| (c, "string".to_string()))
            .collect();

        if include_zone_id {
            dict.insert("zoneId".to_string(), "string".to_string());
        }
        Ok(dict)
    }

    fn supports_quantization(&self) -> bool {
        false
    }

    async fn quantize_zones(
        &self,
        _table: &DataTable,
        _zone_id_column: &str,
        _datetime_column: Option<&str>,
        method: QuantizeMethod,
    ) -> Result<DataTable, CollectionError> {
        Err(CollectionError::UnsupportedAggregation(format!(
            "STAC-backed datasources do not support {method:?} aggregation"
        )))
    }
}
