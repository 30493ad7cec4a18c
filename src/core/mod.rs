//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - `SpherePose`: camera position + orientation on the sweep sphere
//! - `PosePolicy`: handedness and orientation conventions
//! - `Lens`: sensor geometry and focal length conversions
//! - `Camera`: pinhole projection of a pose
//!
//! All types here are "pure data" - no I/O, no rendering logic.

pub mod camera;
pub mod lens;
pub mod math;
pub mod pose;

// Re-export public types
pub use camera::{aim_error, euler_xyz_to_matrix, forward_vector, Camera};
pub use lens::{Lens, Resolution, FULL_FRAME_WIDTH_MM};
pub use math::{centroid, mean_distance, round_to, wrap_degrees};
pub use pose::{
    compute_orientation, compute_position, look_at_orientation, OrientationMode, PosePolicy,
    Sign, SpherePose,
};
