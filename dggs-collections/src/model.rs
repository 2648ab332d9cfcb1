// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! An explicit columnar intermediate in place of a pandas/xarray-shaped
//! representation: `{zones, datetimes?, columns}` plus
//! the handful of operations the assembler needs (outer-join on zone,
//! groupby-mode, nodata substitution). Backend providers translate their own
//! native result shape into this on the way out.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TypedColumn {
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl TypedColumn {
    pub fn len(&self) -> usize {
        match self {
            TypedColumn::Float(v) => v.len(),
            TypedColumn::Int(v) => v.len(),
            TypedColumn::Text(v) => v.len(),
            TypedColumn::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype_name(&self) -> &'static str {
        match self {
            TypedColumn::Float(_) => "float64",
            TypedColumn::Int(_) => "int64",
            TypedColumn::Text(_) => "string",
            TypedColumn::Bool(_) => "bool",
        }
    }

    /// Fills `None` slots with the datasource's nodata sentinel for this
    /// dtype, the last step before DGGS-JSON/Zarr encoding.
    pub fn with_nodata(&self, sentinel: &serde_json::Value) -> TypedColumn {
        match self {
            TypedColumn::Float(v) => TypedColumn::Float(
                v.iter()
                    .map(|x| x.or_else(|| sentinel.as_f64()))
                    .collect(),
            ),
            TypedColumn::Int(v) => TypedColumn::Int(
                v.iter().map(|x| x.or_else(|| sentinel.as_i64())).collect(),
            ),
            TypedColumn::Text(v) => TypedColumn::Text(
                v.iter()
                    .map(|x| x.clone().or_else(|| sentinel.as_str().map(str::to_string)))
                    .collect(),
            ),
            TypedColumn::Bool(v) => TypedColumn::Bool(
                v.iter().map(|x| x.or_else(|| sentinel.as_bool())).collect(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnMeta {
    pub name: String,
    pub dtype: String,
}

#[derive(Debug, Clone)]
pub struct DimensionGrid {
    pub cells_count: usize,
    pub coordinates: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Dimension {
    pub name: String,
    pub interval: [DateTime<Utc>; 2],
    pub grid: DimensionGrid,
}

/// One `get_data` response: zone-aligned rows, typed columns, and whatever
/// the datetime dimension looks like if one was requested.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub zone_ids: Vec<String>,
    pub cols_meta: Vec<ColumnMeta>,
    pub columns: HashMap<String, TypedColumn>,
    pub datetimes: Option<Vec<DateTime<Utc>>>,
    pub dimensions: Option<Vec<Dimension>>,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.zone_ids.is_empty()
    }

    /// Outer-joins `self` and `other` on `(zoneId, datetime?)`, used by the
    /// assembler to merge per-collection tables at one absolute level.
    /// Column name collisions are not possible since every caller has
    /// already prefixed with `"{collection_id}."`. Every column from both
    /// sides is reindexed against the merged zone set first, so a zone
    /// present on only one side gets `None` for the other side's columns
    /// instead of leaving the columns at their original, shorter length.
    pub fn outer_join(mut self, other: DataTable) -> DataTable {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }

        let mut union_zones = self.zone_ids.clone();
        for z in &other.zone_ids {
            if !union_zones.contains(z) {
                union_zones.push(z.clone());
            }
        }

        let self_index: HashMap<&str, usize> = self.zone_ids.iter().enumerate().map(|(i, z)| (z.as_str(), i)).collect();
        let other_index: HashMap<&str, usize> = other.zone_ids.iter().enumerate().map(|(i, z)| (z.as_str(), i)).collect();

        let mut columns: HashMap<String, TypedColumn> = HashMap::with_capacity(self.columns.len() + other.columns.len());
        for (name, col) in self.columns {
            columns.insert(name, reindex_column(&col, &union_zones, &self_index));
        }
        for (name, col) in other.columns {
            columns.insert(name, reindex_column(&col, &union_zones, &other_index));
        }

        self.cols_meta.extend(other.cols_meta);
        self.zone_ids = union_zones;
        self.columns = columns;
        self
    }
}

fn reindex_column(col: &TypedColumn, union_zones: &[String], index: &HashMap<&str, usize>) -> TypedColumn {
    let positions: Vec<Option<usize>> = union_zones.iter().map(|z| index.get(z.as_str()).copied()).collect();
    match col {
        TypedColumn::Float(v) => TypedColumn::Float(positions.iter().map(|p| p.and_then(|i| v[i])).collect()),
        TypedColumn::Int(v) => TypedColumn::Int(positions.iter().map(|p| p.and_then(|i| v[i])).collect()),
        TypedColumn::Text(v) => TypedColumn::Text(positions.iter().map(|p| p.and_then(|i| v[i].clone())).collect()),
        TypedColumn::Bool(v) => TypedColumn::Bool(positions.iter().map(|p| p.and_then(|i| v[i])).collect()),
    }
}
