// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zone-query planner: resolve a bbox/parent/level query
//! against the DGGRS, then for each collection whose datasource can satisfy
//! the CQL filter, narrow the candidate set down to zones that collection
//! actually carries data for.

use crate::error::CoreError;
use dggrs::ports::dggrs::GeometryKind;
use dggrs::{DggrsConverter, GeometricConverter, RefinementLevel, ZoneId};
use dggs_collections::GetDataRequest;
use dggs_cql2::Expression;
use dggs_registry::Registries;
use geo::{Polygon, Rect};

pub struct ZoneQueryRequest {
    pub dggrs_id: String,
    pub collection_id: Option<String>,
    pub bbox: Option<Rect<f64>>,
    pub zone_level: RefinementLevel,
    pub parent: Option<ZoneId>,
    pub compact: bool,
    pub limit: Option<usize>,
    pub geometry: GeometryKind,
    pub filter: Option<Expression>,
}

pub struct ZoneQueryResult {
    pub zones: Vec<String>,
    pub geometry: Vec<Option<Polygon<f64>>>,
    pub returned_area_m2: f64,
}

pub async fn plan_zone_query(registries: &Registries, request: &ZoneQueryRequest) -> Result<ZoneQueryResult, CoreError> {
    if request.bbox.is_none() && request.parent.is_none() {
        return Err(CoreError::BadRequest("zone query requires bbox, parent-zone, or both".to_string()));
    }

    let provider = registries
        .dggrs
        .get(&request.dggrs_id)
        .map_err(|_| CoreError::UnsupportedDggrs(request.dggrs_id.clone()))?;

    let listing = provider.zoneslist(
        request.bbox,
        request.zone_level,
        request.parent.as_ref(),
        request.geometry,
        request.compact,
    )?;

    if listing.zones.zones.is_empty() {
        return Err(CoreError::Empty);
    }

    let candidate_ids: Vec<ZoneId> = listing.zones.ids();
    let candidate_strings: Vec<String> = candidate_ids.iter().map(|z| z.to_string()).collect();

    let cql_attributes: Vec<String> = request
        .filter
        .as_ref()
        .map(|f| f.attributes().into_iter().filter(|a| a != dggs_cql2::DATETIME_SENTINEL).collect())
        .unwrap_or_default();

    let in_scope: Vec<&dggs_registry::Collection> = match &request.collection_id {
        Some(id) => registries.collections.get(id).into_iter().collect(),
        None => registries.collections.values().collect(),
    };

    let mut any_collection_attempted = false;
    let mut survivors: Vec<String> = Vec::new();

    for collection in in_scope {
        let Some(collection_provider) = registries.provider_for(collection) else { continue };

        if !cql_attributes.is_empty() {
            let dictionary = collection_provider
                .get_datadictionary(&collection.datasource_id, false)
                .await
                .unwrap_or_default();
            let covers_all = cql_attributes.iter().all(|attr| dictionary.contains_key(attr));
            if !covers_all {
                continue;
            }
        }

        // `source_of[i]` is the original (pre-conversion) candidate zone that
        // produced `target_ids[i]`, so survivors can be mapped back to the
        // request's own DGGRS regardless of the conversion's fan-out.
        let (target_ids, target_level, source_of): (Vec<ZoneId>, RefinementLevel, Vec<String>) =
            if collection.dggrs_id == request.dggrs_id {
                (candidate_ids.clone(), request.zone_level, candidate_strings.clone())
            } else {
                let Ok(target_provider) = registries.dggrs.get(&collection.dggrs_id) else { continue };
                match GeometricConverter.convert(provider.as_ref(), &candidate_ids, target_provider.as_ref(), &collection.dggrs_id) {
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

        any_collection_attempted = true;

        let zone_id_strings: Vec<String> = repr_ids.iter().map(|z| z.to_string()).collect();
        let mut data_request = GetDataRequest::new(zone_id_strings.clone(), target_level.get(), collection.datasource_id.clone());
        data_request.input_zone_ids_padding = false;
        data_request.cql_filter = request.filter.clone();

        let table = match collection_provider.get_data(&data_request).await {
            Ok(t) => t,
            Err(_) => continue,
        };

        let surviving: std::collections::HashSet<&str> = table.zone_ids.iter().map(String::as_str).collect();
        for (target_str, source_str) in zone_id_strings.iter().zip(source_of.iter()) {
            if surviving.contains(target_str.as_str()) && !survivors.iter().any(|s| s == source_str) {
                survivors.push(source_str.clone());
            }
        }
    }

    if !any_collection_attempted && !cql_attributes.is_empty() {
        return Err(CoreError::CqlAttributesUnsatisfied);
    }

    let mut final_zones = survivors;

    if final_zones.is_empty() {
        return Err(CoreError::Empty);
    }

    if let Some(limit) = request.limit {
        final_zones.truncate(limit);
    }

    let geometry = if request.geometry == GeometryKind::Region {
        final_zones
            .iter()
            .map(|z| listing.zones.zones.iter().find(|zone| zone.id.to_string() == *z).map(|zone| zone.region.clone()))
            .collect()
    } else {
        vec![None; final_zones.len()]
    };

    Ok(ZoneQueryResult { zones: final_zones, geometry, returned_area_m2: listing.returned_area_m2 })
}
