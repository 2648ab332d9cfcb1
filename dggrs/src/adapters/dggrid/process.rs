// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

//! Thin wrapper around the `dggrid` executable: write a metafile to a
//! per-process scratch working directory, run the tool, parse its AIGEN +
//! children + neighbor outputs back into `Zone`s. The working directory is
//! acquired once at provider construction and released on drop; per-request
//! handle churn is forbidden.

use crate::error::dggrid::DggridError;
use crate::error::port::GeoPlegmaError;
use crate::models::{RefinementLevel, ShapeType, ZoneId, Zone, Zones};
use geo::{LineString, Point, Polygon, Rect};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DENSIFICATION: u8 = 50;

/// A batch of scratch file paths for one DGGRID invocation.
pub struct ScratchFiles {
    pub meta: PathBuf,
    pub aigen: PathBuf,
    pub children: PathBuf,
    pub neighbor: PathBuf,
    pub bbox: PathBuf,
}

impl ScratchFiles {
    pub fn new(workdir: &Path) -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        Self {
            meta: workdir.join(&code).with_extension("meta"),
            aigen: workdir.join(&code).with_extension("gen"),
            children: workdir.join(&code).with_extension("chd"),
            neighbor: workdir.join(&code).with_extension("nbr"),
            bbox: workdir.join(&code).with_extension("bbox"),
        }
    }

    pub fn cleanup(&self) {
        for path in [&self.meta, &self.aigen, &self.children, &self.neighbor, &self.bbox] {
            let _ = fs::remove_file(path);
        }
    }
}

/// A DGGRID-CLI-backed adapter. `dggs_type` is the DGGRID `dggs_type`
/// metafile keyword (e.g. `ISEA7H` for IGEO7, `ISEA3H` for ISEA3H).
pub struct DggridProcess {
    pub executable: PathBuf,
    pub workdir: PathBuf,
    pub dggs_type: &'static str,
}

impl DggridProcess {
    pub fn new(executable: PathBuf, workdir: PathBuf, dggs_type: &'static str) -> Self {
        fs::create_dir_all(&workdir).ok();
        Self {
            executable,
            workdir,
            dggs_type,
        }
    }

    fn write_metafile(
        &self,
        scratch: &ScratchFiles,
        level: RefinementLevel,
        densify: bool,
        extra: &[(&str, String)],
    ) -> Result<(), DggridError> {
        let mut file = fs::File::create(&scratch.meta).map_err(|e| DggridError::FileWrite {
            path: scratch.meta.display().to_string(),
            source: e,
        })?;

        let write = |file: &mut fs::File| -> io::Result<()> {
            writeln!(file, "dggs_type {}", self.dggs_type)?;
            writeln!(file, "longitude_wrap_mode UNWRAP_EAST")?;
            writeln!(file, "cell_output_type AIGEN")?;
            writeln!(file, "unwrap_points FALSE")?;
            writeln!(file, "output_cell_label_type OUTPUT_ADDRESS_TYPE")?;
            writeln!(file, "precision 7")?;
            writeln!(file, "dggs_res_spec {}", level.get())?;
            writeln!(
                file,
                "cell_output_file_name {}",
                scratch.aigen.with_extension("").to_string_lossy()
            )?;
            writeln!(file, "neighbor_output_type TEXT")?;
            writeln!(
                file,
                "neighbor_output_file_name {}",
                scratch.neighbor.with_extension("").to_string_lossy()
            )?;
            writeln!(file, "children_output_type TEXT")?;
            writeln!(
                file,
                "children_output_file_name {}",
                scratch.children.with_extension("").to_string_lossy()
            )?;
            if densify {
                writeln!(file, "densification {}", DENSIFICATION)?;
            }
            for (key, value) in extra {
                writeln!(file, "{key} {value}")?;
            }
            Ok(())
        };

        write(&mut file).map_err(|e| DggridError::FileWrite {
            path: scratch.meta.display().to_string(),
            source: e,
        })
    }

    fn write_bbox(&self, scratch: &ScratchFiles, bbox: &Rect) -> Result<(), DggridError> {
        let min = bbox.min();
        let max = bbox.max();
        let mut file = fs::File::create(&scratch.bbox).map_err(|e| DggridError::FileWrite {
            path: scratch.bbox.display().to_string(),
            source: e,
        })?;

        let write = |file: &mut fs::File| -> io::Result<()> {
            let center_x = (min.x + max.x) / 2.0;
            let center_y = (min.y + max.y) / 2.0;
            writeln!(file, "1 {center_x:.7} {center_y:.7}")?;
            for (x, y) in [
                (min.x, min.y),
                (max.x, min.y),
                (max.x, max.y),
                (min.x, max.y),
                (min.x, min.y),
            ] {
                writeln!(file, "{x:.7} {y:.7}")?;
            }
            writeln!(file, "END")?;
            writeln!(file, "END")
        };

        write(&mut file).map_err(|e| DggridError::FileWrite {
            path: scratch.bbox.display().to_string(),
            source: e,
        })
    }

    fn execute(&self, scratch: &ScratchFiles) -> Result<(), DggridError> {
        let status = Command::new(&self.executable)
            .arg(&scratch.meta)
            .status()
            .map_err(|e| DggridError::FileRead {
                path: scratch.meta.display().to_string(),
                source: e,
            })?;
        if !status.success() {
            return Err(DggridError::ExecutionFailed {
                meta_path: scratch.meta.display().to_string(),
            });
        }
        Ok(())
    }

    /// Run a full zone-generation pass for the whole globe at `level`.
    pub fn zones_at_level(
        &self,
        level: RefinementLevel,
        densify: bool,
    ) -> Result<Zones, GeoPlegmaError> {
        let scratch = ScratchFiles::new(&self.workdir);
        self.write_metafile(&scratch, level, densify, &[])?;
        self.execute(&scratch)?;
        let zones = self.parse(&scratch)?;
        scratch.cleanup();
        Ok(zones)
    }

    /// Run a zone-generation pass clipped to `bbox` at `level`.
    pub fn zones_in_bbox(
        &self,
        level: RefinementLevel,
        bbox: &Rect,
        densify: bool,
    ) -> Result<Zones, GeoPlegmaError> {
        let scratch = ScratchFiles::new(&self.workdir);
        self.write_bbox(&scratch, bbox)?;
        self.write_metafile(
            &scratch,
            level,
            densify,
            &[
                ("clip_subset_type", "AIGEN".to_string()),
                (
                    "clip_region_files",
                    scratch.bbox.with_extension("").to_string_lossy().into_owned(),
                ),
            ],
        )?;
        self.execute(&scratch)?;
        let zones = self.parse(&scratch)?;
        scratch.cleanup();
        Ok(zones)
    }

    fn parse(&self, scratch: &ScratchFiles) -> Result<Zones, GeoPlegmaError> {
        let aigen = fs::read_to_string(&scratch.aigen).map_err(|e| DggridError::FileRead {
            path: scratch.aigen.display().to_string(),
            source: e,
        })?;
        let mut zones = parse_aigen(&aigen)?;

        let children_raw = fs::read_to_string(&scratch.children).unwrap_or_default();
        assign(&mut zones, parse_id_arrays(&children_raw), true);

        let neighbor_raw = fs::read_to_string(&scratch.neighbor).unwrap_or_default();
        assign(&mut zones, parse_id_arrays(&neighbor_raw), false);

        Ok(zones)
    }
}

fn parse_id_arrays(data: &str) -> HashMap<String, Vec<ZoneId>> {
    data.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let (id, rest) = parts.split_first()?;
            Some((
                id.to_string(),
                rest.iter().map(|s| ZoneId::textual(*s)).collect(),
            ))
        })
        .collect()
}

fn assign(zones: &mut Zones, mut data: HashMap<String, Vec<ZoneId>>, children: bool) {
    for zone in &mut zones.zones {
        if let Some(values) = data.remove(&zone.id.to_string()) {
            if children {
                zone.children = Some(values);
            } else {
                zone.neighbors = Some(values);
            }
        }
    }
}

/// Parse a DGGRID AIGEN cell file into `Zone`s (geometry + centroid only;
/// children/neighbors are filled in separately from the TEXT outputs).
fn parse_aigen(data: &str) -> Result<Zones, GeoPlegmaError> {
    let mut zones = Vec::new();
    let mut current_id: Option<String> = None;
    let mut center = Point::new(0.0, 0.0);
    let mut coords: Vec<(f64, f64)> = Vec::new();

    for line in data.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [id, x, y] => {
                current_id = Some((*id).to_string());
                center = Point::new(
                    x.parse().map_err(|_| DggridError::InvalidZoneIdFormat((*id).to_string()))?,
                    y.parse().map_err(|_| DggridError::InvalidZoneIdFormat((*id).to_string()))?,
                );
                coords.clear();
            }
            [x, y] => {
                coords.push((
                    x.parse().map_err(|_| DggridError::InvalidZoneIdFormat(line.to_string()))?,
                    y.parse().map_err(|_| DggridError::InvalidZoneIdFormat(line.to_string()))?,
                ));
            }
            ["END"] if coords.len() > 1 => {
                let id = current_id
                    .take()
                    .ok_or_else(|| DggridError::InvalidZoneIdFormat("missing id".to_string()))?;
                let region = Polygon::new(LineString::from(coords.clone()), vec![]);
                let vertex_count = coords.len() as u32 - 1;
                zones.push(Zone {
                    id: ZoneId::textual(id),
                    level: RefinementLevel::new_const(0),
                    shape_type: ShapeType::Hexagon,
                    region,
                    center,
                    vertex_count,
                    area_m2: 0.0,
                    children: None,
                    neighbors: None,
                });
                coords.clear();
            }
            _ => {}
        }
    }

    Ok(Zones { zones })
}
