// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Accept-header / `f`-query content negotiation. `f` takes priority when
//! present and non-empty; otherwise
//! the `Accept` header is parsed with quality values and matched against
//! whatever media types the calling handler says it can produce. Falls back
//! to `f` when the UA only offers browser HTML types, since those never
//! appear in any endpoint's supported set and would otherwise always 406.

use axum::http::{header, HeaderMap};

/// Aliases accepted in the `f` query parameter, resolving to their media
/// types.
pub fn media_type_from_alias(alias: &str) -> Option<&'static str> {
    match alias.to_lowercase().as_str() {
        "json" | "application/json" => Some("application/json"),
        "geojson" | "geo+json" | "application/geo+json" => Some("application/geo+json"),
        "ubjson" | "application/ubjson" => Some("application/ubjson"),
        "zarr" | "zarr+zip" | "application/zarr+zip" => Some("application/zarr+zip"),
        "binary" | "application/x-binary" => Some("application/x-binary"),
        "mvt" | "pbf" | "application/x-protobuf" => Some("application/x-protobuf"),
        _ => None,
    }
}

/// Picks the best media type from `supported` for this request, or `None`
/// if nothing in `Accept` (or `f`) matches; callers turn that into a 406.
pub fn negotiate(headers: &HeaderMap, f_param: Option<&str>, supported: &[&'static str]) -> Option<&'static str> {
    if let Some(f) = f_param {
        if !f.is_empty() {
            return media_type_from_alias(f).filter(|m| supported.contains(m));
        }
    }

    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()).unwrap_or("*/*");

    let mut candidates: Vec<(&str, f32)> = accept
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';');
            let media_type = parts.next()?.trim();
            if media_type.is_empty() {
                return None;
            }
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .next()
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((media_type, quality))
        })
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (media_type, _) in &candidates {
        if *media_type == "*/*" || *media_type == "application/*" {
            return supported.first().copied();
        }
        if let Some(found) = supported.iter().find(|m| m == media_type) {
            return Some(found);
        }
    }

    if candidates.is_empty() {
        return supported.first().copied();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_param_takes_priority_over_accept_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        let chosen = negotiate(&headers, Some("geojson"), &["application/json", "application/geo+json"]);
        assert_eq!(chosen, Some("application/geo+json"));
    }

    #[test]
    fn empty_f_param_falls_back_to_accept_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/ubjson".parse().unwrap());
        let chosen = negotiate(&headers, Some(""), &["application/json", "application/ubjson"]);
        assert_eq!(chosen, Some("application/ubjson"));
    }

    #[test]
    fn quality_values_pick_the_highest() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/json;q=0.2, application/geo+json;q=0.9".parse().unwrap());
        let chosen = negotiate(&headers, None, &["application/json", "application/geo+json"]);
        assert_eq!(chosen, Some("application/geo+json"));
    }

    #[test]
    fn unrecognised_type_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "text/html".parse().unwrap());
        let chosen = negotiate(&headers, None, &["application/json"]);
        assert_eq!(chosen, None);
    }

    #[test]
    fn missing_accept_header_defaults_to_first_supported() {
        let headers = HeaderMap::new();
        let chosen = negotiate(&headers, None, &["application/json", "application/geo+json"]);
        assert_eq!(chosen, Some("application/json"));
    }
}
