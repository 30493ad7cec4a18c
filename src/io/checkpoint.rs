//! Sweep checkpoints (`sweep_checkpoint.json`).
//!
//! Written when a sweep stops early so a later run can skip the cameras that
//! were already rendered. Records themselves are not stored: they are
//! recomputed from the configuration, which must match exactly.

use crate::io::{ConfigError, SweepError};
use crate::sweep::SweepConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CHECKPOINT_FILE: &str = "sweep_checkpoint.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepCheckpoint {
    pub config: SweepConfig,
    /// Cameras `0..completed` have been rendered.
    pub completed: usize,
}

impl SweepCheckpoint {
    /// Number of cameras to skip when resuming `config`.
    ///
    /// Fails with `CheckpointMismatch` if the checkpoint belongs to a different sweep.
    pub fn resume_point(&self, config: &SweepConfig) -> Result<usize, ConfigError> {
        if &self.config != config || self.completed > config.camera_count() {
            return Err(ConfigError::CheckpointMismatch);
        }
        Ok(self.completed)
    }
}

pub fn save_checkpoint(checkpoint: &SweepCheckpoint, path: &Path) -> Result<(), SweepError> {
    let json = serde_json::to_string_pretty(checkpoint).map_err(|e| SweepError::json(path, e))?;
    fs::write(path, json).map_err(|e| SweepError::io(path, e))?;
    log::info!(
        "Checkpoint saved to {:?} ({} cameras completed)",
        path,
        checkpoint.completed
    );
    Ok(())
}

/// Load a checkpoint; `Ok(None)` if there is none at `path`.
pub fn load_checkpoint(path: &Path) -> Result<Option<SweepCheckpoint>, SweepError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path).map_err(|e| SweepError::io(path, e))?;
    let checkpoint = serde_json::from_str(&json).map_err(|e| SweepError::json(path, e))?;
    Ok(Some(checkpoint))
}
