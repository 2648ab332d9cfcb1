// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Columnar-SQL-backed collection provider. One `SqlProvider` wraps one
//! Postgres pool and can serve many datasources (tables), mirroring the
//! `storage::Catalog` pool-per-provider pattern used elsewhere in the
//! ecosystem pack.

use crate::datasource::DatasourceConfig;
use crate::error::CollectionError;
use crate::model::{ColumnMeta, DataTable, TypedColumn};
use crate::port::{CollectionProvider, GetDataRequest, QuantizeMethod};
use async_trait::async_trait;
use dggs_cql2::lower::{lower, Dialect, DatetimeFieldMapper};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use tracing::{info, warn};

struct PostgresDialect;
impl Dialect for PostgresDialect {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{name}\"")
    }
}

pub struct SqlDatasource {
    pub table: String,
    pub config: DatasourceConfig,
}

pub struct SqlProvider {
    pool: PgPool,
    datasources: HashMap<String, SqlDatasource>,
}

impl SqlProvider {
    pub async fn connect(
        database_url: &str,
        datasources: HashMap<String, SqlDatasource>,
    ) -> Result<Self, CollectionError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        info!(datasources = datasources.len(), "connected SQL collection provider");
        Ok(Self { pool, datasources })
    }

    fn datasource(&self, id: &str) -> Result<&SqlDatasource, CollectionError> {
        self.datasources
            .get(id)
            .ok_or_else(|| CollectionError::MalformedDatasource(id.to_string(), "not registered".to_string()))
    }
}

#[async_trait]
impl CollectionProvider for SqlProvider {
    async fn get_data(&self, request: &GetDataRequest) -> Result<DataTable, CollectionError> {
        let ds = self.datasource(&request.datasource_id)?;
        let Some(zone_col) = ds.config.zone_id_column(request.refinement_level) else {
            return Ok(DataTable::default());
        };

        if request.include_datetime && ds.config.datetime_col.is_none() && request.collection_timestamp.is_none() {
            return Err(CollectionError::DatetimeNotDefined(request.datasource_id.clone()));
        }

        let schema = get_schema_columns(&self.pool, &ds.table).await?;
        let schema_columns: Vec<String> = schema.keys().cloned().collect();
        let projection = ds.config.project(
            &schema_columns,
            request.include_properties.as_deref(),
            request.exclude_properties.as_deref(),
        );
        if projection.is_empty() {
            return Ok(DataTable::default());
        }

        let mut sql = format!(
            "SELECT {zone_col}, {cols} FROM {table} WHERE {zone_col} = ANY($1)",
            cols = projection.join(", "),
            table = ds.table,
        );

        if let Some(filter) = &request.cql_filter {
            let mapper = DatetimeFieldMapper { datetime_col: ds.config.datetime_col.as_deref() };
            let where_clause = lower(filter, &PostgresDialect, &mapper)?;
            sql.push_str(" AND ");
            sql.push_str(&where_clause);
        }

        let rows = sqlx::query(&sql)
            .bind(&request.zone_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

        let mut by_zone: HashMap<String, sqlx::postgres::PgRow> = HashMap::new();
        for row in rows {
            let zone: String = row.try_get(zone_col).unwrap_or_default();
            by_zone.insert(zone, row);
        }

        let output_zones = if request.input_zone_ids_padding {
            request.zone_ids.clone()
        } else {
            request.zone_ids.iter().filter(|z| by_zone.contains_key(*z)).cloned().collect()
        };

        let mut columns: HashMap<String, TypedColumn> = HashMap::new();
        let mut cols_meta = Vec::new();

        for col_name in &projection {
            let dtype = schema.get(col_name).map(|t| column_dtype(t)).unwrap_or("string");
            let column = match dtype {
                "float64" => TypedColumn::Float(
                    output_zones
                        .iter()
                        .map(|zone| by_zone.get(zone).and_then(|row| row.try_get::<f64, _>(col_name.as_str()).ok()))
                        .collect(),
                ),
                "int64" => TypedColumn::Int(
                    output_zones
                        .iter()
                        .map(|zone| by_zone.get(zone).and_then(|row| row.try_get::<i64, _>(col_name.as_str()).ok()))
                        .collect(),
                ),
                "bool" => TypedColumn::Bool(
                    output_zones
                        .iter()
                        .map(|zone| by_zone.get(zone).and_then(|row| row.try_get::<bool, _>(col_name.as_str()).ok()))
                        .collect(),
                ),
                _ => TypedColumn::Text(
                    output_zones
                        .iter()
                        .map(|zone| by_zone.get(zone).and_then(|row| row.try_get::<String, _>(col_name.as_str()).ok()))
                        .collect(),
                ),
            };
            cols_meta.push(ColumnMeta { name: col_name.clone(), dtype: dtype.to_string() });
            columns.insert(col_name.clone(), column);
        }

        Ok(DataTable {
            zone_ids: output_zones,
            cols_meta,
            columns,
            datetimes: None,
            dimensions: None,
        })
    }

    async fn get_datadictionary(
        &self,
        datasource_id: &str,
        include_zone_id: bool,
    ) -> Result<HashMap<String, String>, CollectionError> {
        let ds = self.datasource(datasource_id)?;
        let schema = get_schema_columns(&self.pool, &ds.table).await?;
        let schema_columns: Vec<String> = schema.keys().cloned().collect();
        let projection = ds.config.project(&schema_columns, None, None);

        let mut dict: HashMap<String, String> = projection
            .into_iter()
            .map(|c| {
                let dtype = schema.get(&c).map(|t| column_dtype(t)).unwrap_or("string");
                (c, dtype.to_string())
            })
            .collect();

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
        zone_id_column: &str,
        _datetime_column: Option<&str>,
        method: QuantizeMethod,
    ) -> Result<DataTable, CollectionError> {
        warn!(method = ?method, zone_id_column, "quantizing SQL-backed table in-process");
        crate::aggregate::quantize(table, method)
    }
}

/// Column name -> Postgres `information_schema.columns.data_type` (e.g.
/// `"double precision"`, `"integer"`, `"boolean"`, `"text"`), the input to
/// `column_dtype`.
async fn get_schema_columns(pool: &PgPool, table: &str) -> Result<HashMap<String, String>, CollectionError> {
    let rows = sqlx::query("SELECT column_name, data_type FROM information_schema.columns WHERE table_name = $1")
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| CollectionError::BackendFailure(e.to_string()))?;

    Ok(rows
        .iter()
        .filter_map(|r| {
            let name = r.try_get::<String, _>("column_name").unwrap_or_default();
            let data_type = r.try_get::<String, _>("data_type").unwrap_or_default();
            (!name.is_empty()).then_some((name, data_type))
        })
        .collect())
}

fn column_dtype(data_type: &str) -> &'static str {
    match data_type {
        "real" | "double precision" | "numeric" | "decimal" => "float64",
        "smallint" | "integer" | "bigint" => "int64",
        "boolean" => "bool",
        _ => "string",
    }
}
