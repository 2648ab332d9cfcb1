// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::port::GeoPlegmaError;
use crate::models::{DggrsDescriptor, RefinementLevel, RelativeDepth, ShapeType, ZoneId, ZoneIdRepr, Zones};
use geo::{Point, Polygon, Rect};
use std::collections::HashMap;

/// Which geometry, if any, a listing/expansion call should attach to zones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryKind {
    None,
    Centroid,
    Region,
}

/// Response of `zonesinfo`: per-zone descriptive metadata.
#[derive(Debug, Clone)]
pub struct ZonesInfo {
    pub id: ZoneId,
    pub level: RefinementLevel,
    pub shape_type: ShapeType,
    pub centroid: Point,
    pub geometry: Option<Polygon>,
    pub bbox: Rect,
    pub area_m2: f64,
}

/// Response of `zoneslist`: the zone set plus whatever geometry was asked
/// for and the summed nominal area of the returned set.
#[derive(Debug, Clone, Default)]
pub struct ZoneListResult {
    pub zones: Zones,
    pub returned_area_m2: f64,
}

/// One entry of `get_relative_zonelevels`'s `{level -> ...}` map.
#[derive(Debug, Clone)]
pub struct RelativeZoneLevel {
    pub level: RefinementLevel,
    pub zone_ids: Vec<ZoneId>,
    pub geometry: Option<Vec<Polygon>>,
}

/// The DGGRS port. Each adapter gives the rest of the system a uniform,
/// DGGRS-agnostic view of one specific DGGRS. All inputs are
/// textual representation unless the operation name says otherwise.
pub trait DggrsProvider: Send + Sync {
    /// Static facts about this DGGRS: id, title, crs, depth bounds, declared
    /// cross-DGGRS conversions.
    fn descriptor(&self) -> &DggrsDescriptor;

    /// Convert zone ids from `Textual` into `repr`. Fails with
    /// `UnsupportedRepresentation` if `repr` cannot be implemented for this
    /// DGGRS.
    fn zone_id_from_textual(
        &self,
        ids: &[ZoneId],
        repr: ZoneIdRepr,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError>;

    /// Inverse of `zone_id_from_textual`. `level` disambiguates
    /// representations (e.g. `Hex`) that cannot recover the refinement level
    /// on their own.
    fn zone_id_to_textual(
        &self,
        ids: &[ZoneId],
        repr: ZoneIdRepr,
        level: Option<RefinementLevel>,
    ) -> Result<Vec<ZoneId>, GeoPlegmaError>;

    /// Characteristic length scale (km) of a zone at `level`. Monotonically
    /// decreasing with level.
    fn get_cls_by_zone_level(&self, level: RefinementLevel) -> Result<f64, GeoPlegmaError>;

    /// Inverse of `get_cls_by_zone_level`: the finest level whose CLS is
    /// still below `km`. Returns the *first* matching level scanning from
    /// level 0, not the numerically closest one; tile selection depends on
    /// this exact behaviour.
    fn get_zone_level_by_cls(&self, km: f64) -> Result<RefinementLevel, GeoPlegmaError>;

    /// Refinement level implied by each id's own internal structure. Returns
    /// `LevelAmbiguous` for representations (e.g. `Hex`) that cannot
    /// disambiguate level on their own.
    fn get_cells_zone_level(&self, ids: &[ZoneId]) -> Result<Vec<RefinementLevel>, GeoPlegmaError>;

    /// Descriptive metadata for each requested zone.
    fn zonesinfo(&self, ids: &[ZoneId]) -> Result<Vec<ZonesInfo>, GeoPlegmaError>;

    /// Zones at `level` that intersect `bbox` AND descend from `parent`
    /// (either or both may be absent; at least one is required). If
    /// `compact` is true, full sibling groups collapse to their parent, so
    /// the result may contain zones above `level`. Order is whatever the
    /// underlying DGGRS library produces.
    fn zoneslist(
        &self,
        bbox: Option<Rect>,
        level: RefinementLevel,
        parent: Option<&ZoneId>,
        geometry: GeometryKind,
        compact: bool,
    ) -> Result<ZoneListResult, GeoPlegmaError>;

    /// For each absolute level in `levels` (each `>= base_level`), the full
    /// set of descendants of `zone_id` at that level.
    fn get_relative_zonelevels(
        &self,
        zone_id: &ZoneId,
        base_level: RefinementLevel,
        levels: &[RefinementLevel],
        geometry: GeometryKind,
    ) -> Result<HashMap<RefinementLevel, RelativeZoneLevel>, GeoPlegmaError>;

    fn min_refinement_level(&self) -> RefinementLevel {
        self.descriptor().min_refinement_level
    }

    fn max_refinement_level(&self) -> RefinementLevel {
        self.descriptor().max_refinement_level
    }

    fn default_refinement_level(&self) -> RefinementLevel {
        self.descriptor().default_refinement_level
    }

    fn default_depth(&self) -> RelativeDepth {
        self.descriptor().default_depth
    }

    fn max_relative_depth(&self) -> RelativeDepth {
        self.descriptor().max_relative_depth
    }
}
