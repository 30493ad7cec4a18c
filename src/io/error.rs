//! Error types shared by the sweep, the exporters and the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid configuration or input. Raised before any work is done.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: range produces no values")]
    EmptyRange { name: &'static str },

    #[error("{name}: step must be > 0 (got {step})")]
    NonPositiveStep { name: &'static str, step: f64 },

    #[error("{name}: {value} is outside [{min}, {max}]")]
    OutOfBounds {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name}: must be > 0 (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("point cloud synthesis needs at least one camera position")]
    NoPositions,

    #[error("checkpoint was written for a different sweep configuration")]
    CheckpointMismatch,

    #[error("invalid file {path:?}: {message}")]
    InvalidFile { path: PathBuf, message: String },
}

/// Failure reported by a renderer collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Errors that abort a sweep or an export.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "render failed for camera {id} (tilt {tilt_deg}, pan {pan_deg}, f {focal_length_mm}mm) -> {filename:?}"
    )]
    Render {
        id: usize,
        tilt_deg: f64,
        pan_deg: f64,
        focal_length_mm: f64,
        filename: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sweep cancelled after {completed} cameras")]
    Cancelled { completed: usize },
}

impl SweepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SweepError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SweepError::Json {
            path: path.into(),
            source,
        }
    }
}
