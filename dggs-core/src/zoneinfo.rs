// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zone-info resolver: describe one zone, and report whether
//! any in-scope collection actually holds data for it.

use crate::error::CoreError;
use crate::model::{Link, ZoneInfoResponse};
use dggrs::{DggrsConverter, GeometricConverter, ZoneId};
use dggs_collections::GetDataRequest;
use dggs_geom::polygon_to_geojson;
use dggs_registry::{Collection, Registries};

pub async fn resolve_zone_info(
    registries: &Registries,
    dggrs_id: &str,
    zone_textual: &str,
    collection_id: Option<&str>,
) -> Result<Option<ZoneInfoResponse>, CoreError> {
    let provider = registries
        .dggrs
        .get(dggrs_id)
        .map_err(|_| CoreError::UnsupportedDggrs(dggrs_id.to_string()))?;

    let zone_id = ZoneId::textual(zone_textual);
    let base_level = provider.get_cells_zone_level(std::slice::from_ref(&zone_id))?[0];
    let info = provider
        .zonesinfo(std::slice::from_ref(&zone_id))?
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::BadRequest(format!("zone '{zone_textual}' not found in DGGRS '{dggrs_id}'")))?;

    let in_scope: Vec<&Collection> = match collection_id {
        Some(id) => {
            let collection = registries
                .collections
                .get(id)
                .ok_or_else(|| CoreError::UnsupportedCollection(id.to_string()))?;
            vec![collection]
        }
        None => registries.collections.values().collect(),
    };

    let mut contributors = 0usize;
    for collection in in_scope {
        let Some(collection_provider) = registries.provider_for(collection) else { continue };

        let (target_ids, target_level) = if collection.dggrs_id == dggrs_id {
            (vec![zone_id.clone()], base_level)
        } else {
            let Ok(target_provider) = registries.dggrs.get(&collection.dggrs_id) else { continue };
            let converted = GeometricConverter.convert(provider.as_ref(), std::slice::from_ref(&zone_id), target_provider.as_ref(), &collection.dggrs_id);
            match converted {
                Ok(result) if !result.records.is_empty() => {
                    (result.records.into_iter().map(|r| r.target).collect(), result.target_level)
                }
                _ => continue,
            }
        };

        let repr_ids = if collection.dggrs_zoneid_repr == dggrs::ZoneIdRepr::Textual {
            target_ids
        } else {
            let target_provider = registries.dggrs.get(&collection.dggrs_id)?;
            match target_provider.zone_id_from_textual(&target_ids, collection.dggrs_zoneid_repr) {
                Ok(ids) => ids,
                Err(_) => continue,
            }
        };

        let zone_id_strings: Vec<String> = repr_ids.iter().map(|z| z.to_string()).collect();
        let mut request = GetDataRequest::new(zone_id_strings, target_level.get(), collection.datasource_id.clone());
        request.input_zone_ids_padding = false;

        match collection_provider.get_data(&request).await {
            Ok(table) if !table.is_empty() => contributors += 1,
            _ => {}
        }
    }

    if contributors == 0 {
        return Ok(None);
    }

    let bbox = [info.bbox.min().x, info.bbox.min().y, info.bbox.max().x, info.bbox.max().y];
    let centroid = geojson::Geometry::new(geojson::Value::Point(vec![info.centroid.x(), info.centroid.y()]));
    let geometry = info.geometry.as_ref().map(polygon_to_geojson);

    Ok(Some(ZoneInfoResponse {
        id: zone_textual.to_string(),
        level: base_level.get(),
        shape_type: info.shape_type.to_string(),
        crs: provider.descriptor().crs.clone(),
        centroid,
        bbox,
        geometry,
        area_m2: info.area_m2,
        links: vec![Link::new(
            format!("/dggs/{dggrs_id}/zones/{zone_textual}"),
            "self",
            "application/json",
        )],
    }))
}
