// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::GeomError;
use geo::Rect;

/// Parses a `bbox` query parameter (`minx,miny,maxx,maxy`) and an optional
/// `bbox-crs`. Only `OGC:CRS84` (WGS84 lon/lat) is implemented; anything
/// else is rejected rather than silently misinterpreted.
pub fn parse_bbox(raw: &str, crs: Option<&str>) -> Result<Rect<f64>, GeomError> {
    if let Some(crs) = crs {
        if !matches!(crs, "OGC:CRS84" | "http://www.opengis.net/def/crs/OGC/1.3/CRS84") {
            return Err(GeomError::UnsupportedCrs(crs.to_string()));
        }
    }

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(GeomError::BadBboxLength(parts.len()));
    }

    let mut values = [0.0f64; 4];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .parse()
            .map_err(|_| GeomError::BadBboxComponent((*part).to_string()))?;
    }

    let [minx, miny, maxx, maxy] = values;
    if minx > maxx || miny > maxy {
        return Err(GeomError::InvertedBbox);
    }

    Ok(Rect::new((minx, miny), (maxx, maxy)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_bbox() {
        let rect = parse_bbox("25.33,57.99,27.13,58.63", None).unwrap();
        assert_eq!(rect.min().x, 25.33);
        assert_eq!(rect.max().y, 58.63);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_bbox("1,2,3", None).is_err());
    }

    #[test]
    fn rejects_unsupported_crs() {
        assert!(parse_bbox("1,2,3,4", Some("EPSG:3857")).is_err());
    }
}
