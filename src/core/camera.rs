//! Camera model (pinhole camera built from a sphere pose).
//!
//! Cameras are used to:
//! - Project 3D points to 2D image coordinates (preview rendering)
//! - Recover the viewing direction of an Euler orientation
//! - Measure how far a pose's orientation is from aiming at the subject

use crate::core::lens::Lens;
use crate::core::pose::SpherePose;
use nalgebra::{Matrix3, Rotation3, Vector2, Vector3};

/// Rotation matrix for an XYZ Euler orientation `(x, y, z)` in radians:
/// `R = Rz(z) * Ry(y) * Rx(x)`.
pub fn euler_xyz_to_matrix(orientation: &Vector3<f64>) -> Matrix3<f64> {
    Rotation3::from_euler_angles(orientation.x, orientation.y, orientation.z).into_inner()
}

/// World-space viewing direction of a camera whose rest pose looks down -Z.
pub fn forward_vector(orientation: &Vector3<f64>) -> Vector3<f64> {
    euler_xyz_to_matrix(orientation) * Vector3::new(0.0, 0.0, -1.0)
}

/// Angle (radians) between the pose's viewing direction and the direction
/// from the camera to `target`. Zero when the camera aims exactly at it.
pub fn aim_error(pose: &SpherePose, target: &Vector3<f64>) -> f64 {
    let to_target = target - pose.position;
    if to_target.norm() == 0.0 {
        return 0.0;
    }
    // atan2 form stays accurate near 0 and π, unlike acos of the dot product.
    let forward = forward_vector(&pose.orientation);
    forward.cross(&to_target).norm().atan2(forward.dot(&to_target))
}

/// A pinhole camera with intrinsic and extrinsic parameters.
///
/// Camera space follows the computer-vision convention: +X right, +Y down,
/// +Z forward.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Focal length in X (pixels)
    pub fx: f64,

    /// Focal length in Y (pixels)
    pub fy: f64,

    /// Principal point X (pixels)
    pub cx: f64,

    /// Principal point Y (pixels)
    pub cy: f64,

    pub width: u32,
    pub height: u32,

    /// Rotation from world to camera coordinates
    pub rotation: Matrix3<f64>,

    /// Translation from world to camera coordinates
    pub translation: Vector3<f64>,
}

impl Camera {
    /// Build a camera at `pose` with square pixels and a centred principal point.
    pub fn from_pose(pose: &SpherePose, lens: &Lens, focal_length_mm: f64) -> Self {
        let f = lens.focal_length_px(focal_length_mm);
        let width = lens.resolution.width;
        let height = lens.resolution.height;

        // Rest camera looks down -Z with +Y up; flip Y and Z into CV convention.
        let flip = Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0));
        let rotation = flip * euler_xyz_to_matrix(&pose.orientation).transpose();
        let translation = -(rotation * pose.position);

        Self {
            fx: f,
            fy: f,
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            width,
            height,
            rotation,
            translation,
        }
    }

    /// p_camera = R * p_world + t
    pub fn world_to_camera(&self, point_world: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * point_world + self.translation
    }

    /// Project a point in camera coordinates to pixel coordinates.
    ///
    /// Returns None if the point is behind the camera (z <= 0).
    pub fn project(&self, point_camera: &Vector3<f64>) -> Option<Vector2<f64>> {
        if point_camera.z <= 0.0 {
            return None;
        }

        let u = self.fx * point_camera.x / point_camera.z + self.cx;
        let v = self.fy * point_camera.y / point_camera.z + self.cy;

        Some(Vector2::new(u, v))
    }

    pub fn world_to_pixel(&self, point_world: &Vector3<f64>) -> Option<Vector2<f64>> {
        self.project(&self.world_to_camera(point_world))
    }

    /// Camera center in world coordinates: C = -R^T * t
    pub fn camera_center(&self) -> Vector3<f64> {
        -self.rotation.transpose() * self.translation
    }
}
