//! CSV pose tables (`camera_data.csv`).
//!
//! Two schemas:
//! - `Simple`: `cameraLabel,x,y,z,yaw,pitch,roll`
//! - `Interop`: RealityCapture-style
//!   `#name,x,y,alt,heading,pitch,roll,f,px,py,k1,k2,k3,k4,t1,t2`
//!
//! Rows are derived from `CameraEntry` (the already-rounded JSON values).

use crate::io::json::CameraEntry;
use crate::io::SweepError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const SIMPLE_HEADER: &str = "cameraLabel,x,y,z,yaw,pitch,roll";
pub const INTEROP_HEADER: &str = "#name,x,y,alt,heading,pitch,roll,f,px,py,k1,k2,k3,k4,t1,t2";

/// Which column layout to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvSchema {
    Simple,
    #[default]
    Interop,
}

impl CsvSchema {
    pub fn header(self) -> &'static str {
        match self {
            CsvSchema::Simple => SIMPLE_HEADER,
            CsvSchema::Interop => INTEROP_HEADER,
        }
    }
}

impl std::str::FromStr for CsvSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(CsvSchema::Simple),
            "interop" | "realitycapture" | "rc" => Ok(CsvSchema::Interop),
            other => Err(format!("unknown CSV schema: {other}")),
        }
    }
}

/// Render the CSV table for `entries` in `schema`. One header line, one row
/// per entry, each line terminated by `\n`.
pub fn export_csv(entries: &[CameraEntry], schema: CsvSchema) -> String {
    let mut out = String::new();
    out.push_str(schema.header());
    out.push('\n');

    for entry in entries {
        let loc = &entry.camera_location;
        let rot = &entry.camera_rotation_deg;
        let row = match schema {
            CsvSchema::Simple => format!(
                "{},{},{},{},{},{},{}\n",
                entry.label(),
                loc.x,
                loc.y,
                loc.z,
                rot.z,
                rot.x,
                rot.y
            ),
            CsvSchema::Interop => format!(
                "{},{},{},{},{},{},{},{},0,0,0,0,0,0,0,0\n",
                entry.label(),
                loc.x,
                loc.y,
                loc.z,
                interop_heading(entry),
                rot.x,
                rot.y,
                entry.focal_length.focal_length_35mm
            ),
        };
        out.push_str(&row);
    }

    out
}

/// Camera-north heading runs opposite to the generator's yaw.
pub fn interop_heading(entry: &CameraEntry) -> f64 {
    let heading = -entry.camera_rotation_deg.z;
    if heading == 0.0 {
        0.0
    } else {
        heading
    }
}

/// Write `camera_data.csv`.
pub fn save_camera_csv(
    entries: &[CameraEntry],
    schema: CsvSchema,
    path: &Path,
) -> Result<(), SweepError> {
    let csv = export_csv(entries, schema);
    let file = File::create(path).map_err(|e| SweepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(csv.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| SweepError::io(path, e))?;

    log::info!("Camera CSV ({:?}) saved to {:?}", schema, path);
    Ok(())
}
