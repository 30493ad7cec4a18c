//! I/O operations for exporting sweep results.
//!
//! This module handles all file formats the pipeline writes:
//! - JSON camera table (`camera_data.json`)
//! - CSV pose tables, simple and RealityCapture-style (`camera_data.csv`)
//! - Binary PLY guide point cloud (`init_guide_points.ply`)
//! - Sweep checkpoints for resuming

pub mod checkpoint;
pub mod csv;
mod error;
pub mod json;
pub mod ply;

// Re-export public types and functions
pub use checkpoint::{load_checkpoint, save_checkpoint, SweepCheckpoint, CHECKPOINT_FILE};
pub use csv::{export_csv, save_camera_csv, CsvSchema};
pub use error::{ConfigError, RenderError, SweepError};
pub use json::{export_json, load_camera_json, save_camera_json, CameraEntry};
pub use ply::{
    load_guide_points_ply, save_guide_points_ply, synthesize_point_cloud,
    synthesize_point_cloud_file, GuideSphere, PointCloudPoint,
};
