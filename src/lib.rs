//! # spherecam-rs: spherical camera sweeps for multi-view capture
//!
//! This crate generates a sweep of camera poses on a sphere around a subject,
//! renders one image per pose through a pluggable renderer, and exports the
//! poses in formats that photogrammetry and Gaussian Splatting tools read,
//! together with a synthetic guide point cloud.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - `core`: Fundamental data structures (poses, lens model, pinhole camera, math)
//! - `sweep`: Sweep configuration and the focal × tilt × pan enumeration
//! - `io`: Exports (JSON, CSV, binary PLY), checkpoints, error types
//! - `render`: Renderer implementations (image preview, no-op)
//! - `pipeline`: The batch run tying the above together
//!
//! Data flows one way: pose generation → sweep → export.

// Core data structures and math
pub mod core;

// Sweep enumeration
pub mod sweep;

// I/O operations (JSON, CSV, PLY, checkpoints)
pub mod io;

// Renderer collaborators
pub mod render;

// Batch pipeline
pub mod pipeline;

// Re-export commonly used types at crate root for convenience
pub use core::{PosePolicy, SpherePose};
pub use io::{ConfigError, CsvSchema, RenderError, SweepError};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineReport};
pub use sweep::{generate_sweep, CameraRecord, Renderer, SweepConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
