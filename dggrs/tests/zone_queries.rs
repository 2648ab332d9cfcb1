// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end checks against the H3 adapter through `DggrsRegistry`, the
//! way a caller actually reaches a provider (by id, not by constructing the
//! adapter directly). DGGAL and DGGRID need external resources this test
//! suite can't assume are present, so only H3 is exercised here.

use dggrs::ports::dggrs::GeometryKind;
use dggrs::{DggrsRegistry, RefinementLevel, ZoneId, ZoneIdRepr};
use geo::{Coord, Rect};

fn registry() -> DggrsRegistry {
    DggrsRegistry::bootstrap(None)
}

#[test]
fn h3_is_registered_by_default() {
    let registry = registry();
    assert!(registry.ids().contains(&"h3"));
}

#[test]
fn zoneslist_over_a_small_bbox_returns_zones() {
    let registry = registry();
    let provider = registry.get("h3").expect("h3 provider");

    let bbox = Rect::new(Coord { x: -77.0, y: 39.0 }, Coord { x: -76.0, y: 40.0 });
    let level = RefinementLevel::new_const(4);

    let listing = provider
        .zoneslist(Some(bbox), level, None, GeometryKind::None, false)
        .expect("zoneslist should succeed for a valid bbox and level");

    assert!(!listing.zones.zones.is_empty(), "expected at least one zone covering the bbox");
}

#[test]
fn zoneslist_respects_compact_by_returning_no_more_zones_than_uncompacted() {
    let registry = registry();
    let provider = registry.get("h3").expect("h3 provider");

    let bbox = Rect::new(Coord { x: -77.0, y: 39.0 }, Coord { x: -75.0, y: 41.0 });
    let level = RefinementLevel::new_const(5);

    let uncompacted = provider.zoneslist(Some(bbox), level, None, GeometryKind::None, false).unwrap();
    let compacted = provider.zoneslist(Some(bbox), level, None, GeometryKind::None, true).unwrap();

    assert!(compacted.zones.zones.len() <= uncompacted.zones.zones.len());
}

#[test]
fn unknown_dggrs_id_is_rejected() {
    let registry = registry();
    assert!(registry.get("not-a-real-dggrs").is_err());
}

#[test]
fn zone_id_round_trips_through_uint64_representation() {
    let registry = registry();
    let provider = registry.get("h3").expect("h3 provider");

    let bbox = Rect::new(Coord { x: -77.0, y: 39.0 }, Coord { x: -76.0, y: 40.0 });
    let listing = provider
        .zoneslist(Some(bbox), RefinementLevel::new_const(4), None, GeometryKind::None, false)
        .unwrap();

    let textual_ids: Vec<ZoneId> = listing.zones.ids();
    let as_uint64 = provider.zone_id_from_textual(&textual_ids, ZoneIdRepr::Uint64).expect("h3 cells convert to uint64");

    for zone in &as_uint64 {
        assert!(zone.as_u64().is_some());
    }
}
