//! Batch pipeline: sweep → JSON → CSV → guide point cloud.
//!
//! The output directory belongs to the pipeline for the whole run. Unless a
//! matching checkpoint is being resumed it is **deleted and recreated** at the
//! start of the run.

use crate::core::{aim_error, OrientationMode, SpherePose};
use crate::io::{
    export_json, load_checkpoint, save_camera_csv, save_camera_json, save_checkpoint,
    synthesize_point_cloud_file, ConfigError, CsvSchema, GuideSphere, SweepCheckpoint,
    SweepError, CHECKPOINT_FILE,
};
use crate::sweep::{generate_sweep_with, Renderer, SweepConfig, SweepOptions, SweepSettings};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

pub const CAMERA_JSON: &str = "camera_data.json";
pub const CAMERA_CSV: &str = "camera_data.csv";
pub const GUIDE_PLY: &str = "init_guide_points.ply";

/// Aim errors above this (radians) get a warning for heuristic orientation.
const AIM_TOLERANCE: f64 = 1e-6;

/// Everything a run needs, as stored in a JSON config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sweep: SweepSettings,
    /// Images and exports are written here.
    pub output_dir: PathBuf,
    pub csv_schema: CsvSchema,
    /// Points in the synthesized guide cloud.
    pub point_count: usize,
    /// Seed for the guide cloud; random when absent.
    pub seed: Option<u64>,
    /// Continue from `sweep_checkpoint.json` instead of clearing the output directory.
    pub resume: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sweep: SweepSettings::default(),
            output_dir: PathBuf::from("generated_images"),
            csv_schema: CsvSchema::default(),
            point_count: 10_000,
            seed: None,
            resume: false,
        }
    }
}

impl PipelineConfig {
    /// Load a config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SweepError> {
        let json = fs::read_to_string(path).map_err(|e| SweepError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| SweepError::json(path, e))
    }

    /// Expanded, validated sweep writing images into `output_dir`.
    pub fn sweep_config(&self) -> Result<SweepConfig, ConfigError> {
        if self.point_count == 0 {
            return Err(ConfigError::NonPositive {
                name: "point_count",
                value: 0.0,
            });
        }
        self.sweep.resolve(&self.output_dir)
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(CAMERA_JSON)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CAMERA_CSV)
    }

    pub fn ply_path(&self) -> PathBuf {
        self.output_dir.join(GUIDE_PLY)
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.output_dir.join(CHECKPOINT_FILE)
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug)]
pub struct PipelineReport {
    pub camera_count: usize,
    /// Cameras skipped because an earlier run rendered them.
    pub resumed_from: usize,
    pub guide: GuideSphere,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub ply_path: PathBuf,
}

/// Run the full pipeline.
///
/// On render failure or cancellation a checkpoint is written before the
/// error is returned; the exports are only written after a complete sweep.
pub fn run_pipeline<R: Renderer + ?Sized>(
    config: &PipelineConfig,
    renderer: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<PipelineReport, SweepError> {
    let sweep = config.sweep_config()?;
    warn_if_misaimed(&sweep);

    let resumed_from = prepare_output_dir(config, &sweep)?;

    let options = SweepOptions {
        cancel,
        resume_from: resumed_from,
    };
    let records = match generate_sweep_with(&sweep, renderer, options) {
        Ok(records) => records,
        Err(err) => {
            let completed = match &err {
                SweepError::Render { id, .. } => Some(*id),
                SweepError::Cancelled { completed } => Some(*completed),
                _ => None,
            };
            if let Some(completed) = completed {
                let checkpoint = SweepCheckpoint {
                    config: sweep.clone(),
                    completed,
                };
                save_checkpoint(&checkpoint, &config.checkpoint_path())?;
            }
            return Err(err);
        }
    };

    let entries = export_json(&records);
    let json_path = config.json_path();
    save_camera_json(&entries, &json_path)?;

    let csv_path = config.csv_path();
    save_camera_csv(&entries, config.csv_schema, &csv_path)?;

    let positions: Vec<Vector3<f64>> = entries
        .iter()
        .map(|e| Vector3::new(e.camera_location.x, e.camera_location.y, e.camera_location.z))
        .collect();
    let ply_path = config.ply_path();
    let guide =
        synthesize_point_cloud_file(&positions, config.point_count, &ply_path, config.seed)?;

    let checkpoint_path = config.checkpoint_path();
    if checkpoint_path.exists() {
        fs::remove_file(&checkpoint_path).map_err(|e| SweepError::io(&checkpoint_path, e))?;
    }

    Ok(PipelineReport {
        camera_count: records.len(),
        resumed_from,
        guide,
        json_path,
        csv_path,
        ply_path,
    })
}

/// Returns the number of cameras to skip.
fn prepare_output_dir(config: &PipelineConfig, sweep: &SweepConfig) -> Result<usize, SweepError> {
    let dir = &config.output_dir;

    if config.resume {
        if let Some(checkpoint) = load_checkpoint(&config.checkpoint_path())? {
            let completed = checkpoint.resume_point(sweep)?;
            log::info!("Resuming sweep in {:?} at camera {}", dir, completed);
            return Ok(completed);
        }
        log::info!("No checkpoint in {:?}; starting a fresh sweep", dir);
    }

    if dir.exists() {
        log::warn!("Clearing output directory {:?} (all contents are deleted)", dir);
        fs::remove_dir_all(dir).map_err(|e| SweepError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| SweepError::io(dir, e))?;
    Ok(0)
}

fn warn_if_misaimed(sweep: &SweepConfig) {
    if sweep.policy.orientation != OrientationMode::Heuristic {
        return;
    }
    // Probe a pose off the poles, where yaw matters.
    let pose = SpherePose::new(&sweep.center, sweep.radius, 45.0, 45.0, &sweep.policy);
    let err = aim_error(&pose, &sweep.center);
    if err > AIM_TOLERANCE {
        log::warn!(
            "Heuristic orientation misses the subject by {:.1}° with policy {:?}; \
             consider orientation = \"look_at\"",
            err.to_degrees(),
            sweep.policy
        );
    }
}
