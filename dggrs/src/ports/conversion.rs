// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::port::GeoPlegmaError;
use crate::models::{RefinementLevel, ZoneId};
use crate::ports::dggrs::{DggrsProvider, GeometryKind};

/// One `(source zone, target zone)` pair produced by a conversion. A single
/// source zone may appear several times when it overlaps more than one
/// target zone.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub source: ZoneId,
    pub target: ZoneId,
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub records: Vec<ConversionRecord>,
    pub target_level: RefinementLevel,
}

/// Conversion is a capability discovered by lookup, not a marker on
/// `DggrsProvider` itself: a provider pair either
/// has a declared `dggrs_conversion` entry and a `DggrsConverter` to execute
/// it, or the planner treats the collection as unconvertible and skips it.
pub trait DggrsConverter: Send + Sync {
    fn convert(
        &self,
        source: &dyn DggrsProvider,
        ids: &[ZoneId],
        target: &dyn DggrsProvider,
        target_dggrs_id: &str,
    ) -> Result<ConversionResult, GeoPlegmaError>;
}

/// Default converter: works for any pair of providers purely through the
/// `DggrsProvider` interface (no DGGRS-pair-specific code), by re-projecting
/// each source zone's bounding box into the target DGGRS at the declared
/// offset level and collecting whatever the target lists there, in place of
/// per-provider duplicated conversion logic.
pub struct GeometricConverter;

impl DggrsConverter for GeometricConverter {
    fn convert(
        &self,
        source: &dyn DggrsProvider,
        ids: &[ZoneId],
        target: &dyn DggrsProvider,
        target_dggrs_id: &str,
    ) -> Result<ConversionResult, GeoPlegmaError> {
        let offset = source
            .descriptor()
            .conversion_offset(target_dggrs_id)
            .ok_or_else(|| GeoPlegmaError::ConversionUnsupported {
                from: source.descriptor().id.clone(),
                to: target_dggrs_id.to_string(),
            })?;

        let mut records = Vec::new();
        let mut target_level = target.default_refinement_level();

        let infos = source.zonesinfo(ids)?;
        for info in infos {
            let source_level: i32 = info.level.into();
            let requested = RefinementLevel::new(source_level + offset)?;
            target_level = requested.min(target.max_refinement_level());

            let hits = target.zoneslist(
                Some(info.bbox),
                target_level,
                None,
                GeometryKind::None,
                false,
            )?;

            for zone in hits.zones.zones {
                records.push(ConversionRecord {
                    source: info.id.clone(),
                    target: zone.id,
                });
            }
        }

        Ok(ConversionResult {
            records,
            target_level,
        })
    }
}
