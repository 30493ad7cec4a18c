//! Sweep enumeration over the pan/tilt/focal-length grid.
//!
//! - `config`: ranges, the expanded `SweepConfig`, validation
//! - `record`: `CameraRecord` and image naming
//! - `enumerator`: the `Renderer` seam and the sweep loop

pub mod config;
pub mod enumerator;
pub mod record;

pub use config::{ImageFormat, StepRange, SweepConfig, SweepSettings};
pub use enumerator::{generate_sweep, generate_sweep_with, RenderRequest, Renderer, SweepOptions};
pub use record::{image_filename, CameraRecord};
