// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zarr-store-backed collection provider, for datasources shaped as
//! `(time, zone)` arrays rather than flat tables. One array per data
//! variable; a `zoneId` 1-D array in the same store supplies the row order.

use crate::datasource::DatasourceConfig;
use crate::error::CollectionError;
use crate::model::{ColumnMeta, DataTable, Dimension, DimensionGrid, TypedColumn};
use crate::port::{CollectionProvider, GetDataRequest, QuantizeMethod};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use zarrs::array::Array as ZarrArray;
use zarrs_filesystem::FilesystemStore;

pub struct ZarrDatasource {
    pub store_path: PathBuf,
    pub config: DatasourceConfig,
    /// Unix-epoch seconds for each entry along the array's time axis.
    pub time_axis: Vec<i64>,
}

pub struct ZarrProvider {
    datasources: HashMap<String, ZarrDatasource>,
}

impl ZarrProvider {
    pub fn new(datasources: HashMap<String, ZarrDatasource>) -> Self {
        Self { datasources }
    }

    fn datasource(&self, id: &str) -> Result<&ZarrDatasource, CollectionError> {
        self.datasources
            .get(id)
            .ok_or_else(|| CollectionError::MalformedDatasource(id.to_string(), "not registered".to_string()))
    }

    fn open_array(&self, ds: &ZarrDatasource, variable: &str) -> Result<ZarrArray<FilesystemStore>, CollectionError> {
        let store = Arc::new(
            FilesystemStore::new(&ds.store_path).map_err(|e| CollectionError::BackendFailure(e.to_string()))?,
        );
        ZarrArray::open(store, &format!("/{variable}")).map_err(|e| CollectionError::BackendFailure(e.to_string()))
    }

    fn zone_index(&self, ds: &ZarrDatasource) -> Result<HashMap<String, usize>, CollectionError> {
        let array = self.open_array(ds, "zoneId")?;
        let shape = array.shape().to_vec();
        let raw = array
            .retrieve_array_subset_elements::<u8>(&zarrs::array_subset::ArraySubset::new_with_shape(shape))
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;
        let joined = String::from_utf8_lossy(&raw);
        Ok(joined
            .split('\u{0}')
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, z)| (z.to_string(), i))
            .collect())
    }
}

#[async_trait]
impl CollectionProvider for ZarrProvider {
    async fn get_data(&self, request: &GetDataRequest) -> Result<DataTable, CollectionError> {
        let ds = self.datasource(&request.datasource_id)?;
        if ds.config.zone_id_column(request.refinement_level).is_none() {
            return Ok(DataTable::default());
        }

        if request.include_datetime && ds.config.datetime_col.is_none() && request.collection_timestamp.is_none() {
            return Err(CollectionError::DatetimeNotDefined(request.datasource_id.clone()));
        }

        let zone_positions = self.zone_index(ds)?;
        let projection = ds.config.project(&ds.config.data_cols.clone(), request.include_properties.as_deref(), request.exclude_properties.as_deref());
        if projection.is_empty() {
            return Ok(DataTable::default());
        }

        let output_zones = if request.input_zone_ids_padding {
            request.zone_ids.clone()
        } else {
            request.zone_ids.iter().filter(|z| zone_positions.contains_key(*z)).cloned().collect()
        };

        let mut columns = HashMap::new();
        let mut cols_meta = Vec::new();

        for variable in &projection {
            let array = self.open_array(ds, variable)?;
            let shape = array.shape().to_vec();
            let width = *shape.last().unwrap_or(&1);
            let flat: Vec<f64> = array
                .retrieve_array_subset_elements::<f64>(&zarrs::array_subset::ArraySubset::new_with_shape(shape))
                .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

            let values: Vec<Option<f64>> = output_zones
                .iter()
                .map(|z| zone_positions.get(z).and_then(|&col| flat.get(col % width.max(1)).copied()))
                .collect();

            cols_meta.push(ColumnMeta { name: variable.clone(), dtype: "float64".to_string() });
            columns.insert(variable.clone(), TypedColumn::Float(values));
        }

        let dimensions = if request.include_datetime {
            let coords: Vec<DateTime<Utc>> = ds
                .time_axis
                .iter()
                .map(|&secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now))
                .collect();
            coords.first().copied().zip(coords.last().copied()).map(|(start, end)| {
                vec![Dimension {
                    name: ds.config.datetime_col.clone().unwrap_or_else(|| "time".to_string()),
                    interval: [start, end],
                    grid: DimensionGrid { cells_count: coords.len(), coordinates: coords.clone() },
                }]
            })
        } else {
            None
        };

        Ok(DataTable { zone_ids: output_zones, cols_meta, columns, datetimes: None, dimensions })
    }

    async fn get_datadictionary(
        &self,
        datasource_id: &str,
        include_zone_id: bool,
    ) -> Result<HashMap<String, String>, CollectionError> {
        let ds = self.datasource(datasource_id)?;
        let mut dict: HashMap<String, String> = ds
            .config
            .project(&ds.config.data_cols.clone(), None, None)
            .into_iter()
            .map(|v| (v, "float64".to_string()))
            .collect();

        if include_zone_id {
            dict.insert("zoneId".to_string(), "string".to_string());
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
