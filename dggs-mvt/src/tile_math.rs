// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! WebMercatorQuad tile geometry: WGS84 bbox of a `z/x/y` tile, its CLS
//! (tile width on the ground, used to pick a matching refinement level), and
//! the WGS84-to-tile-local-pixel projection the renderer needs.

use geo::{Coord, Rect};

const EARTH_RADIUS_M: f64 = 6_378_137.0;
const MERCATOR_EXTENT_M: f64 = std::f64::consts::PI * EARTH_RADIUS_M;

#[derive(Debug, Clone, Copy)]
pub struct TileCoord {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// WGS84 bbox covered by this tile, following the same
    /// tile-index-to-degrees formulas a WebMercatorQuad tile matrix uses.
    pub fn wgs84_bbox(&self) -> Rect<f64> {
        let n = 2f64.powi(self.z as i32);

        let lon_min = self.x as f64 / n * 360.0 - 180.0;
        let lon_max = (self.x + 1) as f64 / n * 360.0 - 180.0;

        let lat_max = (std::f64::consts::PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan().to_degrees();
        let lat_min = (std::f64::consts::PI * (1.0 - 2.0 * (self.y + 1) as f64 / n)).sinh().atan().to_degrees();

        Rect::new(Coord { x: lon_min, y: lat_min }, Coord { x: lon_max, y: lat_max })
    }

    /// Ground width of this tile in kilometres at its own latitude band,
    /// the "CLS" a refinement level is matched against.
    pub fn cls_km(&self) -> f64 {
        let n = 2f64.powi(self.z as i32);
        let full_circumference_km = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / 1000.0;
        full_circumference_km / n
    }

    fn mercator_bounds(&self) -> (f64, f64, f64, f64) {
        let n = 2f64.powi(self.z as i32);
        let tile_size = 2.0 * MERCATOR_EXTENT_M / n;
        let min_x = -MERCATOR_EXTENT_M + self.x as f64 * tile_size;
        let max_x = min_x + tile_size;
        let max_y = MERCATOR_EXTENT_M - self.y as f64 * tile_size;
        let min_y = max_y - tile_size;
        (min_x, min_y, max_x, max_y)
    }

    /// Projects a WGS84 coordinate into this tile's local pixel space
    /// (`[0, extent]`, origin top-left, y increasing downward) for MVT
    /// geometry encoding.
    pub fn project(&self, coord: Coord<f64>, extent: u32) -> (f64, f64) {
        let (min_x, min_y, max_x, _max_y) = self.mercator_bounds();
        let (merc_x, merc_y) = lonlat_to_mercator(coord.x, coord.y);
        let tile_size = max_x - min_x;
        let px = (merc_x - min_x) / tile_size * extent as f64;
        let py = extent as f64 - (merc_y - min_y) / tile_size * extent as f64;
        (px, py)
    }
}

fn lonlat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon.to_radians() * EARTH_RADIUS_M;
    let lat_clamped = lat.clamp(-85.051_128, 85.051_128);
    let y = (std::f64::consts::FRAC_PI_4 + lat_clamped.to_radians() / 2.0).tan().ln() * EARTH_RADIUS_M;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_tile_covers_the_whole_world() {
        let bbox = TileCoord::new(0, 0, 0).wgs84_bbox();
        assert!((bbox.min().x + 180.0).abs() < 1e-9);
        assert!((bbox.max().x - 180.0).abs() < 1e-9);
        assert!((bbox.min().y + 85.051_128).abs() < 1e-3);
        assert!((bbox.max().y - 85.051_128).abs() < 1e-3);
    }

    #[test]
    fn cls_halves_with_each_zoom_level() {
        let z0 = TileCoord::new(0, 0, 0).cls_km();
        let z1 = TileCoord::new(1, 0, 0).cls_km();
        assert!((z0 / 2.0 - z1).abs() < 1e-6);
    }

    #[test]
    fn projecting_the_tile_center_lands_at_half_extent() {
        let tile = TileCoord::new(1, 0, 0);
        let bbox = tile.wgs84_bbox();
        let center = Coord { x: (bbox.min().x + bbox.max().x) / 2.0, y: 0.0 };
        let (px, _py) = tile.project(center, 4096);
        assert!((px - 2048.0).abs() < 1.0);
    }
}
