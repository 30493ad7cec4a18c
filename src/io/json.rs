//! JSON camera table (`camera_data.json`).
//!
//! The JSON entries are the single source for every other pose export: the
//! CSV writers only read `CameraEntry` values, never `CameraRecord`s, so the
//! two files always agree.

use crate::core::{round_to, Resolution};
use crate::io::SweepError;
use crate::sweep::CameraRecord;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Decimal places kept for positions and rotations.
pub const POSE_DECIMALS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    fn rounded(v: &Vector3<f64>) -> Self {
        Self {
            x: round_to(v.x, POSE_DECIMALS),
            y: round_to(v.y, POSE_DECIMALS),
            z: round_to(v.z, POSE_DECIMALS),
        }
    }
}

impl From<&Vector3<f64>> for Xyz {
    fn from(v: &Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocalLength {
    /// Physical focal length in mm.
    pub focal_length: f64,
    pub focal_length_px: f64,
    pub focal_length_35mm: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// One camera as written to `camera_data.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraEntry {
    pub id: usize,
    pub filename: String,
    pub tilt_angle: f64,
    pub pan_angle: f64,
    pub center_position: Xyz,
    pub radius: f64,
    pub camera_location: Xyz,
    /// Euler XYZ, radians.
    pub camera_rotation: Xyz,
    /// Euler XYZ, degrees.
    pub camera_rotation_deg: Xyz,
    pub focal_length: FocalLength,
    pub sensor: Sensor,
    pub resolution: Resolution,
}

impl From<&CameraRecord> for CameraEntry {
    fn from(record: &CameraRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename.to_string_lossy().into_owned(),
            tilt_angle: record.pose.tilt_deg,
            pan_angle: record.pose.pan_deg,
            center_position: Xyz::from(&record.center),
            radius: record.radius,
            camera_location: Xyz::rounded(&record.pose.position),
            camera_rotation: Xyz::rounded(&record.pose.orientation),
            camera_rotation_deg: Xyz::rounded(&record.pose.orientation_deg()),
            focal_length: FocalLength {
                focal_length: record.focal_length_mm,
                focal_length_px: record.focal_length_px,
                focal_length_35mm: record.focal_length_35mm,
            },
            sensor: Sensor {
                width_mm: record.sensor_width_mm,
                height_mm: record.sensor_height_mm,
            },
            resolution: record.resolution,
        }
    }
}

impl CameraEntry {
    /// Image file name without its directory.
    pub fn label(&self) -> &str {
        Path::new(&self.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.filename)
    }
}

/// Convert records to JSON entries, preserving order.
pub fn export_json(records: &[CameraRecord]) -> Vec<CameraEntry> {
    records.iter().map(CameraEntry::from).collect()
}

/// Serialize entries to `writer` as a pretty-printed JSON array (4-space indent).
pub fn write_camera_json<W: Write>(entries: &[CameraEntry], writer: W) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    entries.serialize(&mut ser)
}

/// Write `camera_data.json`.
pub fn save_camera_json(entries: &[CameraEntry], path: &Path) -> Result<(), SweepError> {
    let file = File::create(path).map_err(|e| SweepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_camera_json(entries, &mut writer).map_err(|e| SweepError::json(path, e))?;
    writer.flush().map_err(|e| SweepError::io(path, e))?;

    log::info!("Camera data saved to {:?}", path);
    Ok(())
}

/// Read a `camera_data.json` back.
pub fn load_camera_json(path: &Path) -> Result<Vec<CameraEntry>, SweepError> {
    let file = File::open(path).map_err(|e| SweepError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| SweepError::json(path, e))
}
