// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data-retrieval assembler: expand one zone into its
//! relative-depth descendants, pull per-collection data at every resulting
//! absolute level, and outer-join the per-collection tables so the encoders
//! see one merged table per depth.

use crate::error::CoreError;
use dggrs::ports::dggrs::GeometryKind;
use dggrs::{DggrsConverter, GeometricConverter, RefinementLevel, RelativeDepth, ZoneId};
use dggs_collections::{aggregate, DataTable, GetDataRequest, QuantizeMethod};
use dggs_cql2::Expression;
use dggs_registry::Registries;
use geo::Polygon;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    DggsJson,
    GeoJson,
    Ubjson,
    ZarrZip,
}

pub struct DataRequest {
    pub dggrs_id: String,
    pub zone_id: String,
    pub collection_id: Option<String>,
    pub zone_depths: Vec<RelativeDepth>,
    pub filter: Option<Expression>,
    pub include_datetime: bool,
    pub include_properties: Option<Vec<String>>,
    pub exclude_properties: Option<Vec<String>>,
    pub geometry: GeometryKind,
    pub returntype: ReturnType,
}

pub struct DepthTable {
    pub level: RefinementLevel,
    pub depth: u32,
    pub table: DataTable,
    pub geometry: Option<Vec<Polygon<f64>>>,
}

pub struct AssembledData {
    pub dggrs_id: String,
    pub zone_id: String,
    pub base_level: RefinementLevel,
    pub depths: Vec<DepthTable>,
}

pub async fn assemble_data(registries: &Registries, request: &DataRequest) -> Result<AssembledData, CoreError> {
    let provider = registries
        .dggrs
        .get(&request.dggrs_id)
        .map_err(|_| CoreError::UnsupportedDggrs(request.dggrs_id.clone()))?;

    let zone_id = ZoneId::textual(&request.zone_id);
    let base_level = provider.get_cells_zone_level(std::slice::from_ref(&zone_id))?[0];

    let relative_levels: BTreeSet<RefinementLevel> = request
        .zone_depths
        .iter()
        .map(|d| base_level.add(*d))
        .collect::<Result<_, _>>()?;

    let non_base_levels: Vec<RefinementLevel> = relative_levels.iter().copied().filter(|l| *l != base_level).collect();

    let base_geometry: Option<Vec<Polygon<f64>>> = if request.geometry == GeometryKind::Region {
        let region = provider
            .zonesinfo(std::slice::from_ref(&zone_id))?
            .into_iter()
            .next()
            .and_then(|info| info.geometry);
        region.map(|polygon| vec![polygon])
    } else {
        None
    };

    let mut expansion: BTreeMap<RefinementLevel, (Vec<ZoneId>, Option<Vec<Polygon<f64>>>)> = BTreeMap::new();
    expansion.insert(base_level, (vec![zone_id.clone()], base_geometry));

    if !non_base_levels.is_empty() {
        let relative = provider.get_relative_zonelevels(&zone_id, base_level, &non_base_levels, request.geometry)?;
        for (level, entry) in relative {
            expansion.insert(level, (entry.zone_ids, entry.geometry));
        }
    }

    let in_scope: Vec<&dggs_registry::Collection> = match &request.collection_id {
        Some(id) => registries.collections.get(id).into_iter().collect(),
        None => registries.collections.values().collect(),
    };

    let mut depths = Vec::new();
    let mut any_contribution = false;

    for (level, (zones_at_level, geometry)) in &expansion {
        let depth = level.get().saturating_sub(base_level.get());
        let mut merged = DataTable::default();

        for collection in &in_scope {
            let level_offset = if collection.dggrs_id == request.dggrs_id {
                0
            } else {
                provider.descriptor().conversion_offset(&collection.dggrs_id).unwrap_or(0)
            };
            let collection_level = level.get() as i32 + level_offset;
            if collection_level < 0 || collection.max_refinement_level < collection_level as u32 {
                continue;
            }
            let Some(collection_provider) = registries.provider_for(collection) else { continue };

            let source_textuals: Vec<String> = zones_at_level.iter().map(|z| z.to_string()).collect();

            let (target_ids, target_level, source_of): (Vec<ZoneId>, RefinementLevel, Vec<String>) =
                if collection.dggrs_id == request.dggrs_id {
                    (zones_at_level.clone(), *level, source_textuals.clone())
                } else {
                    let Ok(target_provider) = registries.dggrs.get(&collection.dggrs_id) else { continue };
                    match GeometricConverter.convert(provider.as_ref(), zones_at_level, target_provider.as_ref(), &collection.dggrs_id) {
                        Ok(result) if !result.records.is_empty() => {
                            let sources: Vec<String> = result.records.iter().map(|r| r.source.to_string()).collect();
                            let targets: Vec<ZoneId> = result.records.into_iter().map(|r| r.target).collect();
                            (targets, result.target_level, sources)
                        }
                        _ => continue,
                    }
                };

            let repr_ids = if collection.dggrs_zoneid_repr == dggrs::ZoneIdRepr::Textual {
                target_ids
            } else {
                let target_provider = match registries.dggrs.get(&collection.dggrs_id) {
                    Ok(p) => p,
                    Err(_) => continue,
                };
                match target_provider.zone_id_from_textual(&target_ids, collection.dggrs_zoneid_repr) {
                    Ok(ids) => ids,
                    Err(_) => continue,
                }
            };

            let pad = request.returntype != ReturnType::GeoJson;
            let zone_id_strings: Vec<String> = repr_ids.iter().map(|z| z.to_string()).collect();
            let mut data_request = GetDataRequest::new(zone_id_strings.clone(), target_level.get(), collection.datasource_id.clone());
            data_request.input_zone_ids_padding = pad;
            data_request.cql_filter = request.filter.clone();
            data_request.include_datetime = request.include_datetime;
            data_request.include_properties = prefixed_for(collection, &request.include_properties);
            data_request.exclude_properties = prefixed_for(collection, &request.exclude_properties);

            let mut table = match collection_provider.get_data(&data_request).await {
                Ok(t) if !t.is_empty() => t,
                _ => continue,
            };

            // back-convert to the request's own zones, collapsing fan-out by
            // mode aggregation when several source zones shared one target.
            // `get_data` may have dropped rows for zones it had no data for
            // (padding is off for GeoJSON requests), so table.zone_ids can be
            // a strict subset of zone_id_strings: map each surviving row
            // through the positional zone_id_strings/source_of pairing
            // rather than assuming the two are the same length.
            let repr_to_source: HashMap<&str, &str> =
                zone_id_strings.iter().map(String::as_str).zip(source_of.iter().map(String::as_str)).collect();
            table.zone_ids = table
                .zone_ids
                .iter()
                .map(|repr| repr_to_source.get(repr.as_str()).map(|s| s.to_string()).unwrap_or_else(|| repr.clone()))
                .collect();
            let table = if collection.dggrs_id != request.dggrs_id {
                aggregate::quantize(&table, QuantizeMethod::Mode)?
            } else {
                table
            };

            let prefixed = prefix_columns(table, &collection.id);
            any_contribution = true;
            merged = merged.outer_join(prefixed);
        }

        depths.push(DepthTable { level: *level, depth, table: merged, geometry: geometry.clone() });
    }

    if !any_contribution {
        return Err(CoreError::Empty);
    }

    Ok(AssembledData { dggrs_id: request.dggrs_id.clone(), zone_id: request.zone_id.clone(), base_level, depths })
}

fn prefixed_for(collection: &dggs_registry::Collection, list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().map(|props| {
        props
            .iter()
            .filter_map(|p| p.strip_prefix(&format!("{}.", collection.id)).map(str::to_string))
            .collect()
    })
}

fn prefix_columns(table: DataTable, collection_id: &str) -> DataTable {
    let cols_meta = table
        .cols_meta
        .iter()
        .map(|m| dggs_collections::ColumnMeta { name: format!("{collection_id}.{}", m.name), dtype: m.dtype.clone() })
        .collect();

    let columns = table
        .columns
        .into_iter()
        .map(|(name, col)| (format!("{collection_id}.{name}"), col))
        .collect();

    DataTable { zone_ids: table.zone_ids, cols_meta, columns, datetimes: table.datetimes, dimensions: table.dimensions }
}
