// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! DGGRS-agnostic zone operations behind a single `DggrsProvider` port, with
//! adapters for H3 (h3o), DGGRID's ISEA7H/IGEO7 grid (CLI process), and the
//! DGGAL grid family (FFI). `DggrsRegistry` wires the adapters a deployment
//! has configured into one lookup keyed by DGGRS id.

pub mod adapters;
pub mod constants;
pub mod error;
pub mod factory;
pub mod models;
pub mod ports;

pub use error::GeoPlegmaError;
pub use factory::DggrsRegistry;
pub use models::{
    ConversionEntry, DggrsDescriptor, RefinementLevel, RelativeDepth, ShapeType, Zone, ZoneId,
    ZoneIdRepr, Zones,
};
pub use ports::conversion::{ConversionRecord, ConversionResult, DggrsConverter, GeometricConverter};
pub use ports::dggrs::{DggrsProvider, GeometryKind, RelativeZoneLevel, ZoneListResult, ZonesInfo};
