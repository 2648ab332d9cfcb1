// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zone-query (§4.5), zone-info (§4.4), and data-retrieval (§4.6), each
//! with its `/collections/{collectionId}/dggs/...` variant. Query strings
//! are taken as a raw `HashMap` since several of their names (`zone-level`,
//! `bbox-crs`, ...) aren't valid Rust field identifiers.

use crate::content_negotiation::negotiate;
use crate::error::ApiError;
use crate::params;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dggrs::ports::dggrs::GeometryKind;
use dggrs::{RefinementLevel, RelativeDepth, ZoneId, ZoneIdRepr};
use dggs_core::{assemble_data, plan_zone_query, resolve_zone_info, CoreError, DataRequest, Link, ReturnType, ZoneQueryRequest, ZonesResponse};
use dggs_geom::feature_collection_from_zones;
use std::collections::HashMap;
use std::sync::Arc;

type RawQuery = HashMap<String, String>;

// ---------- zone query ----------

pub async fn zone_query(
    Extension(state): Extension<Arc<AppState>>,
    Path(dggrs_id): Path<String>,
    Query(q): Query<RawQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    zone_query_impl(&state, dggrs_id, None, &q, &headers).await
}

pub async fn zone_query_for_collection(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, dggrs_id)): Path<(String, String)>,
    Query(q): Query<RawQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    zone_query_impl(&state, dggrs_id, Some(collection_id), &q, &headers).await
}

const ZONE_LIST_MEDIA_TYPES: &[&str] = &["application/json", "application/geo+json", "application/x-binary"];

async fn zone_query_impl(state: &AppState, dggrs_id: String, collection_id: Option<String>, q: &RawQuery, headers: &HeaderMap) -> Result<Response, ApiError> {
    let negotiated = negotiate(headers, q.get("f").map(String::as_str), ZONE_LIST_MEDIA_TYPES).ok_or(CoreError::NotAcceptable)?;

    let bbox = q.get("bbox").map(|v| params::parse_bbox(v)).transpose()?;
    let parent = q.get("parent-zone").map(|v| ZoneId::textual(v.clone()));
    let compact = params::parse_bool(q.get("compact-zone").map(String::as_str), false)?;
    let limit = q.get("limit").map(|v| v.parse::<usize>()).transpose().map_err(|_| ApiError::BadRequest("limit must be an integer".to_string()))?;

    let mut geometry = params::parse_geometry(q.get("geometry").map(String::as_str))?;
    if geometry == GeometryKind::None && negotiated == "application/geo+json" {
        geometry = GeometryKind::Region;
    }

    let filter = q.get("filter").map(|v| params::parse_filter(v)).transpose()?;
    let datetime = q.get("datetime").map(|v| params::parse_datetime(v)).transpose()?;
    let filter = params::combine_filters(filter, datetime);

    let provider = state.registries.dggrs.get(&dggrs_id).map_err(|_| CoreError::UnsupportedDggrs(dggrs_id.clone()))?;
    let zone_level = match q.get("zone-level") {
        Some(raw) => RefinementLevel::new(raw.parse::<i32>().map_err(|_| ApiError::BadRequest("zone-level must be an integer".to_string()))?).map_err(CoreError::from)?,
        None => provider.default_refinement_level(),
    };

    let request = ZoneQueryRequest { dggrs_id: dggrs_id.clone(), collection_id, bbox, zone_level, parent, compact, limit, geometry, filter };
    let result = plan_zone_query(&state.registries, &request).await?;

    match negotiated {
        "application/geo+json" => {
            let zones: Vec<(String, Option<geo::Polygon<f64>>, geojson::JsonObject)> =
                result.zones.into_iter().zip(result.geometry).map(|(id, geom)| (id, geom, geojson::JsonObject::new())).collect();
            let collection = feature_collection_from_zones(zones);
            let body = serde_json::to_string(&collection).map_err(|e| ApiError::BadRequest(e.to_string()))?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
        }
        "application/x-binary" => {
            let bytes = encode_binary_zone_list(provider.as_ref(), &result.zones)?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/x-binary")], bytes).into_response())
        }
        _ => {
            let links = vec![Link::new(format!("{}/dggs/{dggrs_id}/zones", state.base_url), "self", "application/json")];
            let response = ZonesResponse { zones: result.zones, returned_area_m2: result.returned_area_m2, links };
            Ok(Json(response).into_response())
        }
    }
}

fn encode_binary_zone_list(provider: &dyn dggrs::DggrsProvider, zones: &[String]) -> Result<Vec<u8>, ApiError> {
    let textual: Vec<ZoneId> = zones.iter().map(|z| ZoneId::textual(z.clone())).collect();
    let as_uint64 = provider.zone_id_from_textual(&textual, ZoneIdRepr::Uint64).map_err(CoreError::from)?;

    let mut out = Vec::with_capacity(8 + as_uint64.len() * 8);
    out.extend_from_slice(&(as_uint64.len() as u64).to_le_bytes());
    for zone in &as_uint64 {
        let value = zone.as_u64().ok_or_else(|| ApiError::BadRequest("DGGRS cannot express this zone as uint64".to_string()))?;
        out.extend_from_slice(&value.to_le_bytes());
    }
    Ok(out)
}

// ---------- zone info ----------

pub async fn zone_info(
    Extension(state): Extension<Arc<AppState>>,
    Path((dggrs_id, zone_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    zone_info_impl(&state, dggrs_id, zone_id, None).await
}

pub async fn zone_info_for_collection(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, dggrs_id, zone_id)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    zone_info_impl(&state, dggrs_id, zone_id, Some(collection_id)).await
}

async fn zone_info_impl(state: &AppState, dggrs_id: String, zone_id: String, collection_id: Option<String>) -> Result<Response, ApiError> {
    let info = resolve_zone_info(&state.registries, &dggrs_id, &zone_id, collection_id.as_deref()).await?;
    match info {
        Some(response) => Ok(Json(response).into_response()),
        None => Err(CoreError::Empty.into()),
    }
}

// ---------- data retrieval ----------

pub async fn zone_data(
    Extension(state): Extension<Arc<AppState>>,
    Path((dggrs_id, zone_id)): Path<(String, String)>,
    Query(q): Query<RawQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    zone_data_impl(&state, dggrs_id, zone_id, None, &q, &headers).await
}

pub async fn zone_data_for_collection(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, dggrs_id, zone_id)): Path<(String, String, String)>,
    Query(q): Query<RawQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    zone_data_impl(&state, dggrs_id, zone_id, Some(collection_id), &q, &headers).await
}

const DATA_MEDIA_TYPES: &[&str] = &["application/json", "application/geo+json", "application/ubjson", "application/zarr+zip"];

async fn zone_data_impl(
    state: &AppState,
    dggrs_id: String,
    zone_id: String,
    collection_id: Option<String>,
    q: &RawQuery,
    headers: &HeaderMap,
) -> Result<Response, ApiError> {
    let negotiated = negotiate(headers, q.get("f").map(String::as_str), DATA_MEDIA_TYPES).ok_or(CoreError::NotAcceptable)?;

    let returntype = match negotiated {
        "application/geo+json" => ReturnType::GeoJson,
        "application/ubjson" => ReturnType::Ubjson,
        "application/zarr+zip" => ReturnType::ZarrZip,
        _ => ReturnType::DggsJson,
    };

    let provider = state.registries.dggrs.get(&dggrs_id).map_err(|_| CoreError::UnsupportedDggrs(dggrs_id.clone()))?;
    let zone_depths: Vec<RelativeDepth> = match q.get("zone-depth") {
        Some(raw) => params::parse_zone_depths(raw)?,
        None => vec![provider.default_depth()],
    };

    let filter = q.get("filter").map(|v| params::parse_filter(v)).transpose()?;
    let datetime = q.get("datetime").map(|v| params::parse_datetime(v)).transpose()?;
    let filter = params::combine_filters(filter, datetime);

    let geometry = if returntype == ReturnType::GeoJson {
        let parsed = params::parse_geometry(q.get("geometry").map(String::as_str))?;
        if parsed == GeometryKind::None { GeometryKind::Region } else { parsed }
    } else {
        params::parse_geometry(q.get("geometry").map(String::as_str))?
    };

    let request = DataRequest {
        dggrs_id: dggrs_id.clone(),
        zone_id,
        collection_id,
        zone_depths,
        filter,
        include_datetime: true,
        include_properties: params::parse_property_list(q.get("properties").map(String::as_str)),
        exclude_properties: params::parse_property_list(q.get("exclude-properties").map(String::as_str)),
        geometry,
        returntype,
    };

    let assembled = assemble_data(&state.registries, &request).await?;

    match returntype {
        ReturnType::DggsJson => {
            let body = dggs_core::encode_dggs_json(&assembled);
            Ok(Json(body).into_response())
        }
        ReturnType::Ubjson => {
            let bytes = dggs_core::encode_ubjson(&assembled);
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/ubjson"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"dggs-zone-data.ubjson\""),
                ],
                bytes,
            )
                .into_response())
        }
        ReturnType::GeoJson => {
            let collection = dggs_core::encode_geojson(&assembled);
            let body = serde_json::to_string(&collection).map_err(|e| ApiError::BadRequest(e.to_string()))?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
        }
        ReturnType::ZarrZip => {
            let bytes = dggs_core::encode_zarr_zip(&assembled)?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/zarr+zip")], bytes).into_response())
        }
    }
}
