// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsing for the notable query parameters each handler accepts. Each
//! function reports a `BadRequest` on malformed input rather than guessing;
//! none of them touch a registry.

use crate::error::ApiError;
use dggrs::ports::dggrs::GeometryKind;
use dggrs::RelativeDepth;
use dggs_cql2::{Expression, Literal, Op, DATETIME_SENTINEL};
use geo::{Coord, Rect};

pub fn parse_bbox(raw: &str) -> Result<Rect<f64>, ApiError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(ApiError::BadRequest(format!("bbox '{raw}' must have exactly 4 comma-separated values")));
    }
    let mut values = [0f64; 4];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .trim()
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("bbox '{raw}' contains a non-numeric value")))?;
    }
    Ok(Rect::new(Coord { x: values[0], y: values[1] }, Coord { x: values[2], y: values[3] }))
}

pub fn parse_geometry(raw: Option<&str>) -> Result<GeometryKind, ApiError> {
    match raw {
        None => Ok(GeometryKind::None),
        Some("zone-region") => Ok(GeometryKind::Region),
        Some("zone-centroid") => Ok(GeometryKind::Centroid),
        Some(other) => Err(ApiError::BadRequest(format!("geometry '{other}' must be 'zone-region' or 'zone-centroid'"))),
    }
}

pub fn parse_bool(raw: Option<&str>, default: bool) -> Result<bool, ApiError> {
    match raw {
        None => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(ApiError::BadRequest(format!("expected a boolean, got '{other}'"))),
    }
}

/// `zone-depth`: a single integer, an `a-b` range, or a comma-separated list
/// of either, deduplicated and sorted.
pub fn parse_zone_depths(raw: &str) -> Result<Vec<RelativeDepth>, ApiError> {
    let mut depths = Vec::new();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if let Some((lo, hi)) = segment.split_once('-') {
            let lo: u32 = lo.trim().parse().map_err(|_| ApiError::BadRequest(format!("bad zone-depth range '{segment}'")))?;
            let hi: u32 = hi.trim().parse().map_err(|_| ApiError::BadRequest(format!("bad zone-depth range '{segment}'")))?;
            if lo > hi {
                return Err(ApiError::BadRequest(format!("zone-depth range '{segment}' has lo > hi")));
            }
            for d in lo..=hi {
                depths.push(RelativeDepth::from(d));
            }
        } else {
            let d: u32 = segment.parse().map_err(|_| ApiError::BadRequest(format!("bad zone-depth '{segment}'")))?;
            depths.push(RelativeDepth::from(d));
        }
    }
    depths.sort();
    depths.dedup();
    if depths.is_empty() {
        depths.push(RelativeDepth::from(0u32));
    }
    Ok(depths)
}

pub fn parse_property_list(raw: Option<&str>) -> Option<Vec<String>> {
    raw.map(|s| s.split(',').map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
}

/// `filter`: CQL2-text or CQL2-JSON, distinguished by whether the trimmed
/// value starts with `{`").
pub fn parse_filter(raw: &str) -> Result<Expression, ApiError> {
    let trimmed = raw.trim();
    let parsed = if trimmed.starts_with('{') { Expression::try_from_json(trimmed) } else { Expression::try_from_text(trimmed) };
    parsed.map_err(|e| ApiError::BadRequest(format!("unparseable filter: {e}")))
}

/// `datetime`: an RFC3339 instant or an interval `a/b` with `..` as an open
/// end, folded into a CQL predicate on the reserved `datetime` attribute so
/// the planner's existing CQL-attribute machinery carries it through.
pub fn parse_datetime(raw: &str) -> Result<Expression, ApiError> {
    if let Some((start, end)) = raw.split_once('/') {
        let mut bounds = Vec::new();
        if start != ".." {
            bounds.push(Expression::Binary {
                op: Op::GtEq,
                left: Box::new(Expression::Property(DATETIME_SENTINEL.to_string())),
                right: Box::new(Expression::Literal(Literal::String(validate_instant(start)?))),
            });
        }
        if end != ".." {
            bounds.push(Expression::Binary {
                op: Op::LtEq,
                left: Box::new(Expression::Property(DATETIME_SENTINEL.to_string())),
                right: Box::new(Expression::Literal(Literal::String(validate_instant(end)?))),
            });
        }
        if bounds.is_empty() {
            return Err(ApiError::BadRequest("datetime interval cannot be '../..'".to_string()));
        }
        if bounds.len() == 1 {
            return Ok(bounds.into_iter().next().unwrap());
        }
        Ok(Expression::Logical { op: Op::And, args: bounds })
    } else {
        Ok(Expression::Binary {
            op: Op::Eq,
            left: Box::new(Expression::Property(DATETIME_SENTINEL.to_string())),
            right: Box::new(Expression::Literal(Literal::String(validate_instant(raw)?))),
        })
    }
}

fn validate_instant(raw: &str) -> Result<String, ApiError> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|_| raw.to_string())
        .map_err(|_| ApiError::BadRequest(format!("datetime '{raw}' is not valid RFC3339")))
}

/// ANDs an optional explicit `filter` with an optional `datetime` predicate.
pub fn combine_filters(filter: Option<Expression>, datetime: Option<Expression>) -> Option<Expression> {
    match (filter, datetime) {
        (Some(f), Some(d)) => Some(Expression::Logical { op: Op::And, args: vec![f, d] }),
        (Some(f), None) => Some(f),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_bbox() {
        let rect = parse_bbox("25.33,57.99,27.13,58.63").unwrap();
        assert_eq!(rect.min().x, 25.33);
        assert_eq!(rect.max().y, 58.63);
    }

    #[test]
    fn rejects_bbox_with_wrong_arity() {
        assert!(parse_bbox("1,2,3").is_err());
    }

    #[test]
    fn parses_zone_depth_range() {
        let depths = parse_zone_depths("0-2").unwrap();
        assert_eq!(depths, vec![RelativeDepth::from(0u32), RelativeDepth::from(1u32), RelativeDepth::from(2u32)]);
    }

    #[test]
    fn parses_zone_depth_comma_list() {
        let depths = parse_zone_depths("0,2,1").unwrap();
        assert_eq!(depths, vec![RelativeDepth::from(0u32), RelativeDepth::from(1u32), RelativeDepth::from(2u32)]);
    }

    #[test]
    fn open_ended_datetime_interval_builds_one_bound() {
        let expr = parse_datetime("2020-01-01T00:00:00Z/..").unwrap();
        assert!(matches!(expr, Expression::Binary { op: Op::GtEq, .. }));
    }

    #[test]
    fn rejects_malformed_datetime() {
        assert!(parse_datetime("not-a-date").is_err());
    }
}
