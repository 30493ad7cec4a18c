//! Per-camera records produced by the sweep.

use crate::core::{Lens, Resolution, SpherePose};
use nalgebra::Vector3;
use std::path::PathBuf;

/// One camera of the sweep: where it was, how it looked, and which image it wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRecord {
    /// Sequential id in enumeration order, global across the whole sweep.
    pub id: usize,
    /// Full path of the rendered image.
    pub filename: PathBuf,
    pub pose: SpherePose,
    pub center: Vector3<f64>,
    pub radius: f64,
    pub focal_length_mm: f64,
    pub focal_length_px: f64,
    pub focal_length_35mm: f64,
    pub sensor_width_mm: f64,
    pub sensor_height_mm: f64,
    pub resolution: Resolution,
}

impl CameraRecord {
    pub fn new(
        id: usize,
        filename: PathBuf,
        pose: SpherePose,
        center: Vector3<f64>,
        radius: f64,
        focal_length_mm: f64,
        lens: &Lens,
    ) -> Self {
        Self {
            id,
            filename,
            pose,
            center,
            radius,
            focal_length_mm,
            focal_length_px: lens.focal_length_px(focal_length_mm),
            focal_length_35mm: lens.focal_length_35mm(focal_length_mm),
            sensor_width_mm: lens.sensor_width_mm,
            sensor_height_mm: lens.sensor_height_mm(),
            resolution: lens.resolution,
        }
    }
}

/// Deterministic image name: `{id:04}_tilt_{tilt:03}_pan_{pan:03}_f{focal}.{ext}`.
pub fn image_filename(
    id: usize,
    tilt_deg: f64,
    pan_deg: f64,
    focal_length_mm: f64,
    extension: &str,
) -> String {
    format!(
        "{:04}_tilt_{}_pan_{}_f{}.{}",
        id,
        format_angle(tilt_deg),
        format_angle(pan_deg),
        format_focal(focal_length_mm),
        extension
    )
}

/// Integral angles are zero-padded to three digits, others keep three decimals.
fn format_angle(deg: f64) -> String {
    if deg.fract() == 0.0 {
        format!("{:03}", deg as i64)
    } else {
        format!("{:07.3}", deg)
    }
}

/// Integral focal lengths are printed bare, others keep three decimals.
fn format_focal(mm: f64) -> String {
    if mm.fract() == 0.0 {
        format!("{}", mm as i64)
    } else {
        format!("{:.3}", mm)
    }
}
