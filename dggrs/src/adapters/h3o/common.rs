// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::h3o::H3oError;
use crate::error::port::GeoPlegmaError;
use crate::models::{RefinementLevel, ShapeType, ZoneId, Zone, Zones};
use geo::{Coord, LineString, Point, Polygon};
use h3o::{Boundary, CellIndex, LatLng, Resolution};

pub fn level_to_resolution(level: RefinementLevel) -> Result<Resolution, GeoPlegmaError> {
    let value: u8 = level.try_into()?;
    Resolution::try_from(value)
        .map_err(H3oError::InvalidResolution)
        .map_err(GeoPlegmaError::H3o)
}

pub fn boundary_to_polygon(boundary: &Boundary) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = boundary
        .iter()
        .map(|latlng| Coord {
            x: latlng.lng(),
            y: latlng.lat(),
        })
        .collect();

    if coords.first() != coords.last() {
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
    }

    Polygon::new(LineString::from(coords), vec![])
}

pub fn latlng_to_point(latlng: LatLng) -> Point {
    Point::new(latlng.lng(), latlng.lat())
}

pub fn shape_type(cell: CellIndex) -> ShapeType {
    if cell.is_pentagon() {
        ShapeType::Pentagon
    } else {
        ShapeType::Hexagon
    }
}

pub fn cells_to_zones(cells: Vec<CellIndex>) -> Result<Zones, GeoPlegmaError> {
    let zones: Vec<Zone> = cells
        .into_iter()
        .map(cell_to_zone)
        .collect::<Result<_, _>>()?;
    Ok(Zones { zones })
}

pub fn cell_to_zone(cell: CellIndex) -> Result<Zone, GeoPlegmaError> {
    let level = RefinementLevel::from(u8::from(cell.resolution()));
    let center = latlng_to_point(LatLng::from(cell));
    let region = boundary_to_polygon(&cell.boundary());
    let vertex_count = region.exterior().0.len().saturating_sub(1) as u32;
    let area_m2 = cell.area_km2() * 1_000_000.0;

    let children = cell.resolution().succ().map(|child_res| {
        cell.children(child_res)
            .map(|c| ZoneId::hex(c.to_string()))
            .collect::<Vec<_>>()
    });

    let neighbors: Vec<ZoneId> = cell
        .grid_disk::<Vec<CellIndex>>(1)
        .into_iter()
        .filter(|c| *c != cell)
        .map(|c| ZoneId::hex(c.to_string()))
        .collect();

    Ok(Zone {
        id: ZoneId::hex(cell.to_string()),
        level,
        shape_type: shape_type(cell),
        region,
        center,
        vertex_count,
        area_m2,
        children,
        neighbors: Some(neighbors),
    })
}

pub fn parse_cell(zone_id: &ZoneId) -> Result<CellIndex, GeoPlegmaError> {
    use std::str::FromStr;
    CellIndex::from_str(&zone_id.to_string()).map_err(|e| {
        GeoPlegmaError::H3o(H3oError::InvalidZoneID {
            zone_id: zone_id.to_string(),
            source: e,
        })
    })
}
