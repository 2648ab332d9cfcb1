// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::port::GeoPlegmaError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// A non-negative integer labelling a discrete global grid within a DGGRS
/// hierarchy. Level 0 is the coarsest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefinementLevel(u32);

impl RefinementLevel {
    pub const fn new_const(value: u32) -> Self {
        Self(value)
    }

    pub fn new(value: i32) -> Result<Self, GeoPlegmaError> {
        if value < 0 {
            Err(GeoPlegmaError::DepthBelowZero(value))
        } else {
            Ok(Self(value as u32))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Add a relative depth, erroring only on `u32` overflow (callers are
    /// expected to bound the result against `maxRefinementLevel` themselves).
    pub fn add(self, relative: RelativeDepth) -> Result<Self, GeoPlegmaError> {
        Ok(Self(self.0 + relative.get()))
    }

    pub fn checked_sub(self, relative: RelativeDepth) -> Option<Self> {
        self.0.checked_sub(relative.get()).map(Self)
    }
}

impl TryFrom<i32> for RefinementLevel {
    type Error = GeoPlegmaError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        RefinementLevel::new(value)
    }
}

impl From<u8> for RefinementLevel {
    fn from(value: u8) -> Self {
        Self(value as u32)
    }
}

impl From<u32> for RefinementLevel {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<RefinementLevel> for i32 {
    fn from(level: RefinementLevel) -> Self {
        level.0 as i32
    }
}

impl From<RefinementLevel> for u32 {
    fn from(level: RefinementLevel) -> Self {
        level.0
    }
}

impl TryFrom<RefinementLevel> for u8 {
    type Error = GeoPlegmaError;

    fn try_from(level: RefinementLevel) -> Result<Self, Self::Error> {
        u8::try_from(level.0).map_err(|_| GeoPlegmaError::DepthTooLarge(level))
    }
}

impl fmt::Display for RefinementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A relative level measured from a reference zone, e.g. "two levels below
/// this zone". Aperture (children-per-parent) is DGGRS-specific.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativeDepth(u32);

impl RelativeDepth {
    pub const fn new_const(value: u32) -> Self {
        Self(value)
    }

    pub fn new(value: i32) -> Result<Self, GeoPlegmaError> {
        if value < 0 {
            Err(GeoPlegmaError::RelativeDepthBelowZero(value))
        } else {
            Ok(Self(value as u32))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for RelativeDepth {
    type Error = GeoPlegmaError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        RelativeDepth::new(value)
    }
}

impl From<u8> for RelativeDepth {
    fn from(value: u8) -> Self {
        Self(value as u32)
    }
}

impl From<u32> for RelativeDepth {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<RelativeDepth> for i32 {
    fn from(depth: RelativeDepth) -> Self {
        depth.0 as i32
    }
}

impl fmt::Display for RelativeDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
