// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parquet-file-backed collection provider. Each datasource is one file on
//! disk, read whole into an Arrow `RecordBatch` per request; zone filtering
//! happens in-process since CQL2 pushdown into the parquet row-group reader
//! isn't needed at the sizes this backend targets.

use crate::datasource::DatasourceConfig;
use crate::error::CollectionError;
use crate::model::{ColumnMeta, DataTable, TypedColumn};
use crate::port::{CollectionProvider, GetDataRequest, QuantizeMethod};
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

pub struct ParquetDatasource {
    pub path: PathBuf,
    pub config: DatasourceConfig,
}

pub struct ParquetProvider {
    datasources: HashMap<String, ParquetDatasource>,
}

impl ParquetProvider {
    pub fn new(datasources: HashMap<String, ParquetDatasource>) -> Self {
        Self { datasources }
    }

    fn datasource(&self, id: &str) -> Result<&ParquetDatasource, CollectionError> {
        self.datasources
            .get(id)
            .ok_or_else(|| CollectionError::MalformedDatasource(id.to_string(), "not registered".to_string()))
    }

    fn read_batch(&self, ds: &ParquetDatasource) -> Result<RecordBatch, CollectionError> {
        let file = File::open(&ds.path).map_err(|e| CollectionError::BackendFailure(e.to_string()))?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?
            .build()
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        let batches: Vec<RecordBatch> = reader
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        arrow::compute::concat_batches(&batches[0].schema(), &batches)
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))
    }
}

#[async_trait]
impl CollectionProvider for ParquetProvider {
    async fn get_data(&self, request: &GetDataRequest) -> Result<DataTable, CollectionError> {
        let ds = self.datasource(&request.datasource_id)?;
        let Some(zone_col) = ds.config.zone_id_column(request.refinement_level) else {
            return Ok(DataTable::default());
        };

        if request.include_datetime && ds.config.datetime_col.is_none() && request.collection_timestamp.is_none() {
            return Err(CollectionError::DatetimeNotDefined(request.datasource_id.clone()));
        }

        let batch = self.read_batch(ds)?;
        let schema: Vec<String> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        let projection = ds.config.project(
            &schema,
            request.include_properties.as_deref(),
            request.exclude_properties.as_deref(),
        );
        if projection.is_empty() {
            return Ok(DataTable::default());
        }

        let zone_array = batch
            .column_by_name(zone_col)
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| CollectionError::MalformedDatasource(request.datasource_id.clone(), format!("missing zone column {zone_col}")))?;

        let mut row_of_zone: HashMap<&str, usize> = HashMap::new();
        for (row, zone) in zone_array.iter().enumerate() {
            if let Some(z) = zone {
                row_of_zone.entry(z).or_insert(row);
            }
        }

        let output_zones = if request.input_zone_ids_padding {
            request.zone_ids.clone()
        } else {
            request.zone_ids.iter().filter(|z| row_of_zone.contains_key(z.as_str())).cloned().collect()
        };

        let mut columns: HashMap<String, TypedColumn> = HashMap::new();
        let mut cols_meta = Vec::new();

        for col_name in &projection {
            let Some(array) = batch.column_by_name(col_name) else { continue };
            let typed = extract_column(array, &output_zones, &row_of_zone);
            cols_meta.push(ColumnMeta { name: col_name.clone(), dtype: typed.dtype_name().to_string() });
            columns.insert(col_name.clone(), typed);
        }

        Ok(DataTable { zone_ids: output_zones, cols_meta, columns, datetimes: None, dimensions: None })
    }

    async fn get_datadictionary(
        &self,
        datasource_id: &str,
        include_zone_id: bool,
    ) -> Result<HashMap<String, String>, CollectionError> {
        let ds = self.datasource(datasource_id)?;
        let batch = self.read_batch(ds)?;
        let schema: Vec<String> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        let projection = ds.config.project(&schema, None, None);

        let mut dict: HashMap<String, String> = HashMap::new();
        for name in projection {
            if let Some(array) = batch.column_by_name(&name) {
                dict.insert(name, arrow_dtype_name(array).to_string());
            }
        }

        if include_zone_id {
            if let Some(zone_col) = ds.config.zone_groups.values().next() {
                dict.insert(zone_col.clone(), "string".to_string());
            }
        }

        Ok(dict)
    }

    fn supports_quantization(&self) -> bool {
        true
    }

    async fn quantize_zones(
        &self,
        table: &DataTable,
        _zone_id_column: &str,
        _datetime_column: Option<&str>,
        method: QuantizeMethod,
    ) -> Result<DataTable, CollectionError> {
        crate::aggregate::quantize(table, method)
    }
}

fn extract_column(array: &dyn Array, output_zones: &[String], row_of_zone: &HashMap<&str, usize>) -> TypedColumn {
    let row_for = |z: &str| row_of_zone.get(z).copied();

    if let Some(floats) = array.as_any().downcast_ref::<Float64Array>() {
        TypedColumn::Float(
            output_zones
                .iter()
                .map(|z| row_for(z).filter(|&r| !floats.is_null(r)).map(|r| floats.value(r)))
                .collect(),
        )
    } else if let Some(ints) = array.as_any().downcast_ref::<Int64Array>() {
        TypedColumn::Int(
            output_zones
                .iter()
                .map(|z| row_for(z).filter(|&r| !ints.is_null(r)).map(|r| ints.value(r)))
                .collect(),
        )
    } else if let Some(strings) = array.as_any().downcast_ref::<StringArray>() {
        TypedColumn::Text(
            output_zones
                .iter()
                .map(|z| row_for(z).filter(|&r| !strings.is_null(r)).map(|r| strings.value(r).to_string()))
                .collect(),
        )
    } else {
        TypedColumn::Text(output_zones.iter().map(|_| None).collect())
    }
}

fn arrow_dtype_name(array: &dyn Array) -> &'static str {
    if array.as_any().downcast_ref::<Float64Array>().is_some() {
        "float64"
    } else if array.as_any().downcast_ref::<Int64Array>().is_some() {
        "int64"
    } else {
        "string"
    }
}
