// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::dggal::DggalError;
use crate::models::{RefinementLevel, ShapeType, ZoneId, Zone, Zones};
use dggal_rust::dggal::{DGGRS, DGGRSZone, GeoExtent, GeoPoint};
use geo::{coord, LineString, Point, Polygon, Rect};

pub fn ids_to_zones(dggrs: &DGGRS, ids: Vec<DGGRSZone>, with_topology: bool) -> Result<Zones, DggalError> {
    let zones: Vec<Zone> = ids
        .into_iter()
        .map(|id| zone_from_id(dggrs, id, with_topology))
        .collect::<Result<_, _>>()?;

    Ok(Zones { zones })
}

pub fn zone_from_id(dggrs: &DGGRS, id: DGGRSZone, with_topology: bool) -> Result<Zone, DggalError> {
    let vertices: Vec<GeoPoint> = dggrs.getZoneWGS84Vertices(id);
    let region = to_polygon(&vertices);
    let center = to_point(&dggrs.getZoneWGS84Centroid(id));

    let vertex_count: u32 = dggrs
        .countZoneEdges(id)
        .try_into()
        .map_err(|e| DggalError::EdgeCountConversion {
            zone_id: id.to_string(),
            source: e,
        })?;

    let level = RefinementLevel::from(u32::try_from(dggrs.getZoneLevel(id)).unwrap_or(0));
    let shape_type = if vertex_count == 5 {
        ShapeType::Pentagon
    } else {
        ShapeType::Quad
    };

    let (children, neighbors) = if with_topology {
        let children = Some(
            dggrs
                .getZoneChildren(id)
                .into_iter()
                .map(|z| ZoneId::uint64(z))
                .collect(),
        );

        let mut nb_types: [i32; 6] = [0; 6];
        let neighbors = Some(
            dggrs
                .getZoneNeighbors(id, &mut nb_types)
                .into_iter()
                .map(|z| ZoneId::uint64(z))
                .collect(),
        );
        (children, neighbors)
    } else {
        (None, None)
    };

    Ok(Zone {
        id: ZoneId::uint64(id),
        level,
        shape_type,
        region,
        center,
        vertex_count,
        area_m2: 0.0,
        children,
        neighbors,
    })
}

fn to_point(pt: &GeoPoint) -> Point<f64> {
    Point::new(pt.lon.to_degrees(), pt.lat.to_degrees())
}

fn to_polygon(points: &[GeoPoint]) -> Polygon<f64> {
    let mut coords: Vec<_> = points
        .iter()
        .map(|pt| coord! { x: pt.lon.to_degrees(), y: pt.lat.to_degrees() })
        .collect();

    if coords.first() != coords.last() {
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
    }

    Polygon::new(LineString::from(coords), vec![])
}

pub fn to_geo_point(pt: Point) -> GeoPoint {
    GeoPoint {
        lat: pt.y().to_radians(),
        lon: pt.x().to_radians(),
    }
}

pub fn bbox_to_geoextent(bbox: &Rect<f64>) -> GeoExtent {
    GeoExtent {
        ll: GeoPoint {
            lat: bbox.min().y.to_radians(),
            lon: bbox.min().x.to_radians(),
        },
        ur: GeoPoint {
            lat: bbox.max().y.to_radians(),
            lon: bbox.max().x.to_radians(),
        },
    }
}

pub fn whole_earth_geoextent() -> GeoExtent {
    bbox_to_geoextent(&Rect::new((-180.0, -90.0), (180.0, 90.0)))
}
