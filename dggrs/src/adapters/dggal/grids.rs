// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! `DggalProvider` wraps a single named DGGAL grid (ISEA3H, ISEA9R, IVEA3H,
//! IVEA9R, RTEA3H, RTEA9R, ...) behind `DggrsProvider`. One struct serves
//! every grid DGGAL exposes: the grid name is a constructor argument, not a
//! type parameter, since the registry needs to build providers from a
//! configuration document rather than from compiled-in variants.

use crate::adapters::dggal::common::{bbox_to_geoextent, ids_to_zones, to_geo_point, whole_earth_geoextent, zone_from_id};
use crate::adapters::dggal::context::GLOBAL_DGGAL;
use crate::error::dggal::DggalError;
use crate::error::port::GeoPlegmaError;
use crate::models::{
    ConversionEntry, DggrsDescriptor, RefinementLevel, RelativeDepth, ZoneId, ZoneIdRepr,
};
use crate::ports::dggrs::{DggrsProvider, GeometryKind, RelativeZoneLevel, ZoneListResult, ZonesInfo};
use dggal_rust::dggal;
use dggal_rust::dggal::DGGRS;
use geo::Rect;
use std::collections::HashMap;

pub struct DggalProvider {
    descriptor: DggrsDescriptor,
}

impl DggalProvider {
    pub fn new(grid_name: &str, title: &str, description: &str) -> Result<Self, GeoPlegmaError> {
        let dggrs = get_dggrs(grid_name)?;
        let max = RefinementLevel::new(dggrs.getMaxDepth())?;

        Ok(Self {
            descriptor: DggrsDescriptor {
                id: grid_name.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                crs: "OGC:CRS84".to_string(),
                min_refinement_level: RefinementLevel::new_const(0),
                max_refinement_level: max,
                default_refinement_level: RefinementLevel::new_const(2),
                default_depth: RelativeDepth::new_const(2),
                max_relative_depth: RelativeDepth::new_const(4),
                definition_link: "https://github.com/ecere/dggal".to_string(),
                dggrs_conversion: HashMap::new(),
            },
        })
    }

    pub fn with_conversion(mut self, target_id: &str, offset: i32) -> Self {
        self.descriptor
            .dggrs_conversion
            .insert(target_id.to_string(), ConversionEntry { zonelevel_offset: offset });
        self
    }

    fn zone_from_u64(&self, id: &ZoneId) -> Result<u64, GeoPlegmaError> {
        id.as_u64()
            .or_else(|| id.as_textual().and_then(|s| s.parse().ok()))
            .ok_or_else(|| GeoPlegmaError::InvalidZoneId(id.to_string()))
    }
}

fn get_dggrs(grid_name: &str) -> Result<DGGRS, GeoPlegmaError> {
    let dggal = GLOBAL_DGGAL.lock().map_err(|_| DggalError::LockFailure)?;
    DGGRS::new(&dggal, grid_name)
        .map_err(|_| {
            GeoPlegmaError::Dggal(DggalError::UnknownGrid {
                grid_name: grid_name.to_string(),
            })
        })
}

impl DggrsProvider for DggalProvider {
    fn descriptor(&self) -> &DggrsDescriptor {
        &self.descriptor
    }

    fn zone_id_from_textual(
        &self,
        ids: &[ZoneId],
        repr: ZoneIdRepr,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError> {
        ids.iter()
            .map(|id| {
                let value = self.zone_from_u64(id)?;
                Ok(match repr {
                    ZoneIdRepr::Textual => ZoneId::textual(value.to_string()),
                    ZoneIdRepr::Uint64 => ZoneId::uint64(value),
                    ZoneIdRepr::Hex => ZoneId::hex(format!("{value:x}")),
                })
            })
            .collect()
    }

    fn zone_id_to_textual(
        &self,
        ids: &[ZoneId],
        _repr: ZoneIdRepr,
        _level: Option<RefinementLevel>,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError> {
        ids.iter()
            .map(|id| Ok(ZoneId::textual(self.zone_from_u64(id)?.to_string())))
            .collect()
    }

    fn get_cls_by_zone_level(&self, level: RefinementLevel) -> Result<f64, GeoPlegmaError> {
        // DGGAL doesn't expose a direct CLS accessor through its C API; fall
        // back to sampling one zone's geometry at this level and taking its
        // bounding box diagonal as the characteristic length.
        let dggrs = get_dggrs(&self.descriptor.id)?;
        let extent = whole_earth_geoextent();
        let sample = dggrs.listZones(i32::from(level), &extent);
        let Some(&first) = sample.first() else {
            return Ok(0.0);
        };
        let zone = zone_from_id(&dggrs, first, false)?;
        let bbox = zone.region.exterior().0.iter().fold(
            Rect::new((f64::MAX, f64::MAX), (f64::MIN, f64::MIN)),
            |acc, c| {
                Rect::new(
                    (acc.min().x.min(c.x), acc.min().y.min(c.y)),
                    (acc.max().x.max(c.x), acc.max().y.max(c.y)),
                )
            },
        );
        let dx = (bbox.max().x - bbox.min().x) * 111.0;
        let dy = (bbox.max().y - bbox.min().y) * 111.0;
        Ok((dx * dx + dy * dy).sqrt())
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
        let dggrs = get_dggrs(&self.descriptor.id)?;
        ids.iter()
            .map(|id| {
                let value = self.zone_from_u64(id)?;
                Ok(RefinementLevel::new(dggrs.getZoneLevel(value))?)
            })
            .collect()
    }

    fn zonesinfo(&self, ids: &[ZoneId]) -> Result<Vec<ZonesInfo>, GeoPlegmaError> {
        let dggrs = get_dggrs(&self.descriptor.id)?;
        ids.iter()
            .map(|id| {
                let value = self.zone_from_u64(id)?;
                let zone = zone_from_id(&dggrs, value, true)?;
                let bbox = zone
                    .region
                    .exterior()
                    .0
                    .iter()
                    .fold(Rect::new((f64::MAX, f64::MAX), (f64::MIN, f64::MIN)), |acc, c| {
                        Rect::new(
                            (acc.min().x.min(c.x), acc.min().y.min(c.y)),
                            (acc.max().x.max(c.x), acc.max().y.max(c.y)),
                        )
                    });
                Ok(ZonesInfo {
                    id: zone.id,
                    level: zone.level,
                    shape_type: zone.shape_type,
                    centroid: zone.center,
                    geometry: Some(zone.region),
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
        let dggrs = get_dggrs(&self.descriptor.id)?;

        let ids = if let Some(p) = parent {
            let parent_id = self.zone_from_u64(p)?;
            let parent_level = RefinementLevel::new(dggrs.getZoneLevel(parent_id))?;
            let depth = RelativeDepth::new(i32::from(level) - i32::from(parent_level))?;
            dggrs.getSubZones(parent_id, i32::from(depth))
        } else {
            let extent = bbox
                .map(|b| bbox_to_geoextent(&b))
                .unwrap_or_else(whole_earth_geoextent);
            dggrs.listZones(i32::from(level), &extent)
        };

        let zones = ids_to_zones(&dggrs, ids, geometry != GeometryKind::None)?;
        let returned_area_m2 = zones.zones.iter().map(|z| z.area_m2).sum();

        Ok(ZoneListResult { zones, returned_area_m2 })
    }

    fn get_relative_zonelevels(
        &self,
        zone_id: &ZoneId,
        base_level: RefinementLevel,
        levels: &[RefinementLevel],
        geometry: GeometryKind,
    ) -> Result<HashMap<RefinementLevel, RelativeZoneLevel>, GeoPlegmaError> {
        let dggrs = get_dggrs(&self.descriptor.id)?;
        let parent_id = self.zone_from_u64(zone_id)?;
        let mut out = HashMap::new();

        for &level in levels {
            let depth = RelativeDepth::new(i32::from(level) - i32::from(base_level))?;
            let ids = dggrs.getSubZones(parent_id, i32::from(depth));
            let zones = ids_to_zones(&dggrs, ids, false)?;

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

/// Convenience constructor covering the grid family DGGAL ships by default.
pub fn known_grids() -> Result<Vec<DggalProvider>, GeoPlegmaError> {
    Ok(vec![
        DggalProvider::new("ISEA3H", "ISEA3H", "Icosahedral Snyder equal-area aperture-3 hexagonal grid")?
            .with_conversion("isea9r", 0),
        DggalProvider::new("ISEA9R", "ISEA9R", "Icosahedral Snyder equal-area aperture-9 rhombic grid")?,
        DggalProvider::new("IVEA3H", "IVEA3H", "Icosahedral variant equal-area aperture-3 hexagonal grid")?,
        DggalProvider::new("IVEA9R", "IVEA9R", "Icosahedral variant equal-area aperture-9 rhombic grid")?,
        DggalProvider::new("RTEA3H", "RTEA3H", "Rhombic triacontahedron equal-area aperture-3 hexagonal grid")?,
        DggalProvider::new("RTEA9R", "RTEA9R", "Rhombic triacontahedron equal-area aperture-9 rhombic grid")?,
    ])
}
