// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Collapsing duplicate zone rows produced when a finer-resolution table is
//! re-expressed at a coarser DGGRS zone (several source zones landing on one
//! target zone after conversion). Grouping is by zone id only; a requested
//! datetime column is accepted for interface symmetry with
//! `CollectionProvider::quantize_zones` but a table's time dimension already
//! lives in `DataTable::datetimes`, not in a per-row column, so there is
//! nothing further to split on here.

use crate::error::CollectionError;
use crate::model::{DataTable, TypedColumn};
use crate::port::QuantizeMethod;
use std::collections::HashMap;

pub fn quantize(table: &DataTable, method: QuantizeMethod) -> Result<DataTable, CollectionError> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, zone) in table.zone_ids.iter().enumerate() {
        if !groups.contains_key(zone.as_str()) {
            order.push(zone.clone());
        }
        groups.entry(zone.as_str()).or_default().push(idx);
    }

    let mut columns = HashMap::new();
    for meta in &table.cols_meta {
        let Some(col) = table.columns.get(&meta.name) else { continue };
        let reduced = reduce_column(col, &order, &groups, method)?;
        columns.insert(meta.name.clone(), reduced);
    }

    Ok(DataTable {
        zone_ids: order,
        cols_meta: table.cols_meta.clone(),
        columns,
        datetimes: table.datetimes.clone(),
        dimensions: table.dimensions.clone(),
    })
}

fn reduce_column(
    col: &TypedColumn,
    order: &[String],
    groups: &HashMap<&str, Vec<usize>>,
    method: QuantizeMethod,
) -> Result<TypedColumn, CollectionError> {
    match col {
        TypedColumn::Float(values) => {
            let out = order
                .iter()
                .map(|z| {
                    let idxs = &groups[z.as_str()];
                    let sample: Vec<f64> = idxs.iter().filter_map(|&i| values[i]).collect();
                    reduce_floats(&sample, method)
                })
                .collect();
            Ok(TypedColumn::Float(out))
        }
        TypedColumn::Int(values) => {
            let out = order
                .iter()
                .map(|z| {
                    let idxs = &groups[z.as_str()];
                    let sample: Vec<f64> = idxs
                        .iter()
                        .filter_map(|&i| values[i])
                        .map(|v| v as f64)
                        .collect();
                    reduce_floats(&sample, method).map(|v| v as i64)
                })
                .collect();
            Ok(TypedColumn::Int(out))
        }
        TypedColumn::Bool(values) => {
            let out = order
                .iter()
                .map(|z| {
                    let idxs = &groups[z.as_str()];
                    let trues = idxs.iter().filter(|&&i| values[i] == Some(true)).count();
                    let total = idxs.iter().filter(|&&i| values[i].is_some()).count();
                    if total == 0 {
                        None
                    } else {
                        Some(trues * 2 >= total)
                    }
                })
                .collect();
            Ok(TypedColumn::Bool(out))
        }
        TypedColumn::Text(values) => {
            if method != QuantizeMethod::Mode {
                return Err(CollectionError::UnsupportedAggregation(format!(
                    "{method:?} is not defined over text columns"
                )));
            }
            let out = order
                .iter()
                .map(|z| {
                    let idxs = &groups[z.as_str()];
                    mode_of(idxs.iter().filter_map(|&i| values[i].clone()))
                })
                .collect();
            Ok(TypedColumn::Text(out))
        }
    }
}

fn reduce_floats(sample: &[f64], method: QuantizeMethod) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(match method {
        QuantizeMethod::Sum => sample.iter().sum(),
        QuantizeMethod::Mean => sample.iter().sum::<f64>() / sample.len() as f64,
        QuantizeMethod::Max => sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        QuantizeMethod::Min => sample.iter().cloned().fold(f64::INFINITY, f64::min),
        QuantizeMethod::Median => {
            let mut sorted = sample.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        QuantizeMethod::Mode => {
            let mut counts: HashMap<u64, usize> = HashMap::new();
            for v in sample {
                *counts.entry(v.to_bits()).or_insert(0) += 1;
            }
            let winner = counts.into_iter().max_by_key(|(_, c)| *c).map(|(bits, _)| bits);
            winner.map(f64::from_bits)?
        }
    })
}

fn mode_of(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts.into_iter().max_by_key(|(_, c)| *c).map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicate_zones_with_mean() {
        let mut columns = HashMap::new();
        columns.insert(
            "temp".to_string(),
            TypedColumn::Float(vec![Some(10.0), Some(20.0), Some(5.0)]),
        );
        let table = DataTable {
            zone_ids: vec!["a".into(), "a".into(), "b".into()],
            cols_meta: vec![crate::model::ColumnMeta { name: "temp".into(), dtype: "float64".into() }],
            columns,
            datetimes: None,
            dimensions: None,
        };

        let out = quantize(&table, QuantizeMethod::Mean).unwrap();
        assert_eq!(out.zone_ids, vec!["a".to_string(), "b".to_string()]);
        match &out.columns["temp"] {
            TypedColumn::Float(v) => assert_eq!(v, &vec![Some(15.0), Some(5.0)]),
            _ => panic!("expected float column"),
        }
    }
}
