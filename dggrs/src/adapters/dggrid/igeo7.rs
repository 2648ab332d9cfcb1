// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! IGEO7: DGGRID's ISEA7H grid exposed as a `DggrsProvider`. Zone addresses
//! are the base-7 digit strings DGGRID emits in `OUTPUT_ADDRESS_TYPE`, e.g.
//! `0001022010`, and only the `Textual` representation is implementable:
//! DGGRID's CLI never hands back a packed integer id for this grid, so
//! `Hex`/`Uint64` requests fail with `UnsupportedRepresentation` rather than
//! inventing a packing scheme this adapter can't round-trip through the tool.

use crate::adapters::dggrid::process::DggridProcess;
use crate::error::port::GeoPlegmaError;
use crate::models::{
    ConversionEntry, DggrsDescriptor, RefinementLevel, RelativeDepth, ShapeType, ZoneId,
    ZoneIdRepr,
};
use crate::ports::dggrs::{DggrsProvider, GeometryKind, RelativeZoneLevel, ZoneListResult, ZonesInfo};
use geo::{Point, Rect};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct Igeo7Provider {
    descriptor: DggrsDescriptor,
    process: DggridProcess,
}

impl Igeo7Provider {
    pub fn new(executable: PathBuf, workdir: PathBuf) -> Self {
        let mut dggrs_conversion = HashMap::new();
        dggrs_conversion.insert("h3".to_string(), ConversionEntry { zonelevel_offset: 0 });

        Self {
            descriptor: DggrsDescriptor {
                id: "igeo7".to_string(),
                title: "IGEO7".to_string(),
                description: "DGGRID ISEA7H aperture-7 hexagonal grid".to_string(),
                crs: "OGC:CRS84".to_string(),
                min_refinement_level: RefinementLevel::new_const(0),
                max_refinement_level: RefinementLevel::new_const(15),
                default_refinement_level: RefinementLevel::new_const(8),
                default_depth: RelativeDepth::new_const(1),
                max_relative_depth: RelativeDepth::new_const(2),
                definition_link: "https://www.discreteglobalgrids.org".to_string(),
                dggrs_conversion,
            },
            process: DggridProcess::new(executable, workdir, "ISEA7H"),
        }
    }

    fn zone_bbox(&self, id: &ZoneId) -> Result<Rect, GeoPlegmaError> {
        Ok(self.zonesinfo(std::slice::from_ref(id))?[0].bbox)
    }
}

impl DggrsProvider for Igeo7Provider {
    fn descriptor(&self) -> &DggrsDescriptor {
        &self.descriptor
    }

    fn zone_id_from_textual(
        &self,
        ids: &[ZoneId],
        repr: ZoneIdRepr,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError> {
        match repr {
            ZoneIdRepr::Textual => Ok(ids.to_vec()),
            ZoneIdRepr::Hex | ZoneIdRepr::Uint64 => {
                Err(GeoPlegmaError::UnsupportedRepresentation(repr))
            }
        }
    }

    fn zone_id_to_textual(
        &self,
        ids: &[ZoneId],
        repr: ZoneIdRepr,
        _level: Option<RefinementLevel>,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError> {
        match repr {
            ZoneIdRepr::Textual => Ok(ids.to_vec()),
            ZoneIdRepr::Hex | ZoneIdRepr::Uint64 => {
                Err(GeoPlegmaError::UnsupportedRepresentation(repr))
            }
        }
    }

    fn get_cls_by_zone_level(&self, level: RefinementLevel) -> Result<f64, GeoPlegmaError> {
        // Aperture 7: edge length shrinks by sqrt(7) per level; level 0 CLS
        // for ISEA7H is approximately 8691 km (DGGRID's own resolution table).
        const LEVEL0_KM: f64 = 8691.0;
        Ok(LEVEL0_KM / 7f64.sqrt().powi(level.get() as i32))
    }

    fn get_zone_level_by_cls(&self, km: f64) -> Result<RefinementLevel, GeoPlegmaError> {
        for raw in 0..=u8::try_from(self.max_refinement_level())? {
            let level = RefinementLevel::from(raw);
            if self.get_cls_by_zone_level(level)? < km {
                return Ok(level);
            }
        }
        Ok(self.max_refinement_level())
    }

    fn get_cells_zone_level(&self, ids: &[ZoneId]) -> Result<Vec<RefinementLevel>, GeoPlegmaError> {
        ids.iter()
            .map(|id| {
                let digits = id.to_string().len() as u32;
                Ok(RefinementLevel::from(digits.saturating_sub(2)))
            })
            .collect()
    }

    fn zonesinfo(&self, ids: &[ZoneId]) -> Result<Vec<ZonesInfo>, GeoPlegmaError> {
        let level = self.get_cells_zone_level(ids)?[0];
        let zones = self.process.zones_at_level(level, true)?;

        ids.iter()
            .map(|id| {
                let zone = zones
                    .zones
                    .iter()
                    .find(|z| z.id.to_string() == id.to_string())
                    .ok_or_else(|| GeoPlegmaError::InvalidZoneId(id.to_string()))?;

                let bbox = bbox_of(&zone.region);
                Ok(ZonesInfo {
                    id: zone.id.clone(),
                    level,
                    shape_type: ShapeType::Hexagon,
                    centroid: zone.center,
                    geometry: Some(zone.region.clone()),
                    bbox,
                    area_m2: zone.area_m2,
                })
            })
            .collect()
    }

    fn zoneslist(
        &self,
        bbox: Option<Rect>,
        level: RefinementLevel,
        parent: Option<&ZoneId>,
        geometry: GeometryKind,
        _compact: bool,
    ) -> Result<ZoneListResult, GeoPlegmaError> {
        let effective_bbox = match (bbox, parent) {
            (Some(b), _) => b,
            (None, Some(p)) => self.zone_bbox(p)?,
            (None, None) => return Err(GeoPlegmaError::NoZoneSelector),
        };

        let mut zones = self.process.zones_in_bbox(level, &effective_bbox, true)?;
        let returned_area_m2 = zones.zones.iter().map(|z| z.area_m2).sum();

        if geometry == GeometryKind::None {
            for zone in &mut zones.zones {
                zone.children = None;
                zone.neighbors = None;
            }
        }

        Ok(ZoneListResult {
            zones,
            returned_area_m2,
        })
    }

    fn get_relative_zonelevels(
        &self,
        zone_id: &ZoneId,
        _base_level: RefinementLevel,
        levels: &[RefinementLevel],
        geometry: GeometryKind,
    ) -> Result<HashMap<RefinementLevel, RelativeZoneLevel>, GeoPlegmaError> {
        let bbox = self.zone_bbox(zone_id)?;
        let mut out = HashMap::new();

        for &level in levels {
            let zones = self.process.zones_in_bbox(level, &bbox, geometry != GeometryKind::None)?;
            let zone_ids: Vec<ZoneId> = zones.zones.iter().map(|z| z.id.clone()).collect();
            let geom = if geometry == GeometryKind::None {
                None
            } else {
                Some(zones.zones.iter().map(|z| z.region.clone()).collect())
            };
            out.insert(level, RelativeZoneLevel { level, zone_ids, geometry: geom });
        }

        Ok(out)
    }
}

fn bbox_of(region: &geo::Polygon) -> Rect {
    let coords: Vec<Point> = region.exterior().points().collect();
    let min = coords.iter().fold((f64::MAX, f64::MAX), |acc, p| {
        (acc.0.min(p.x()), acc.1.min(p.y()))
    });
    let max = coords.iter().fold((f64::MIN, f64::MIN), |acc, p| {
        (acc.0.max(p.x()), acc.1.max(p.y()))
    });
    Rect::new(min, max)
}
