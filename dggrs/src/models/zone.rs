// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use super::level::RefinementLevel;
use geo::{Point, Polygon};
use std::fmt;

/// The wire representation a `ZoneId` was produced in, or should be rendered
/// as. The DGGRS provider is the sole authority converting between them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneIdRepr {
    /// Canonical string used on the API surface.
    Textual,
    /// Implementation-efficient packing used internally by some grids.
    Uint64,
    /// Lowercase hex of the `Uint64` form.
    Hex,
}

/// A DGGS zone identifier. A zone has one logical identity but up to three
/// wire representations; all API responses serialise as
/// `Textual` unless a binary transport is explicitly negotiated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneId {
    Textual(String),
    Uint64(u64),
    Hex(String),
}

impl ZoneId {
    pub fn textual(id: impl Into<String>) -> Self {
        ZoneId::Textual(id.into())
    }

    pub fn uint64(id: u64) -> Self {
        ZoneId::Uint64(id)
    }

    pub fn hex(id: impl Into<String>) -> Self {
        ZoneId::Hex(id.into().to_ascii_lowercase())
    }

    pub fn repr(&self) -> ZoneIdRepr {
        match self {
            ZoneId::Textual(_) => ZoneIdRepr::Textual,
            ZoneId::Uint64(_) => ZoneIdRepr::Uint64,
            ZoneId::Hex(_) => ZoneIdRepr::Hex,
        }
    }

    pub fn as_textual(&self) -> Option<&str> {
        match self {
            ZoneId::Textual(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ZoneId::Uint64(v) => Some(*v),
            ZoneId::Hex(h) => u64::from_str_radix(h, 16).ok(),
            ZoneId::Textual(_) => None,
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Textual(s) => write!(f, "{s}"),
            ZoneId::Uint64(v) => write!(f, "{v}"),
            ZoneId::Hex(h) => write!(f, "{h}"),
        }
    }
}

/// The geometric shape a zone takes in its native DGGRS.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeType {
    Hexagon,
    Pentagon,
    Triangle,
    Quad,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShapeType::Hexagon => "hexagon",
            ShapeType::Pentagon => "pentagon",
            ShapeType::Triangle => "triangle",
            ShapeType::Quad => "quad",
        };
        write!(f, "{s}")
    }
}

/// One DGGS cell at one refinement level, as returned by a provider.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    pub level: RefinementLevel,
    pub shape_type: ShapeType,
    pub region: Polygon,
    pub center: Point,
    pub vertex_count: u32,
    pub area_m2: f64,
    pub children: Option<Vec<ZoneId>>,
    pub neighbors: Option<Vec<ZoneId>>,
}

/// An ordered list of zones. Order must be preserved exactly as produced by
/// the underlying DGGRS library; it is part of the DGGS wire contract.
#[derive(Debug, Clone, Default)]
pub struct Zones {
    pub zones: Vec<Zone>,
}

impl Zones {
    pub fn ids(&self) -> Vec<ZoneId> {
        self.zones.iter().map(|z| z.id.clone()).collect()
    }
}
