// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::CollectionError;
use crate::model::DataTable;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dggs_cql2::Expression;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMethod {
    Sum,
    Mean,
    Max,
    Min,
    Median,
    Mode,
}

impl QuantizeMethod {
    pub fn parse(name: &str) -> Result<Self, CollectionError> {
        Ok(match name {
            "sum" => Self::Sum,
            "mean" => Self::Mean,
            "max" => Self::Max,
            "min" => Self::Min,
            "median" => Self::Median,
            "mode" => Self::Mode,
            other => return Err(CollectionError::UnsupportedAggregation(other.to_string())),
        })
    }
}

/// Arguments for `get_data`, grouped into a struct since several of its
/// nine fields are optional; a long positional signature would be
/// unreadable at call sites in the planner and assembler.
#[derive(Debug, Clone, Default)]
pub struct GetDataRequest {
    pub zone_ids: Vec<String>,
    pub refinement_level: u32,
    pub datasource_id: String,
    pub cql_filter: Option<Expression>,
    pub include_datetime: bool,
    pub include_properties: Option<Vec<String>>,
    pub exclude_properties: Option<Vec<String>>,
    pub input_zone_ids_padding: bool,
    pub collection_timestamp: Option<DateTime<Utc>>,
}

impl GetDataRequest {
    pub fn new(zone_ids: Vec<String>, refinement_level: u32, datasource_id: impl Into<String>) -> Self {
        Self {
            zone_ids,
            refinement_level,
            datasource_id: datasource_id.into(),
            input_zone_ids_padding: true,
            ..Default::default()
        }
    }
}

/// One backend/datasource's worth of zone-aggregated data.
#[async_trait]
pub trait CollectionProvider: Send + Sync {
    async fn get_data(&self, request: &GetDataRequest) -> Result<DataTable, CollectionError>;

    async fn get_datadictionary(
        &self,
        datasource_id: &str,
        include_zone_id: bool,
    ) -> Result<HashMap<String, String>, CollectionError>;

    /// Not every backend can aggregate fine zones up to a coarser level;
    /// those that can't simply don't override this default, which signals
    /// "ask the planner to pick a different refinement level instead."
    fn supports_quantization(&self) -> bool {
        false
    }

    async fn quantize_zones(
        &self,
        _table: &DataTable,
        _zone_id_column: &str,
        _datetime_column: Option<&str>,
        _method: QuantizeMethod,
    ) -> Result<DataTable, CollectionError> {
        Err(CollectionError::UnsupportedAggregation(
            "this provider does not support quantization".to_string(),
        ))
    }
}
