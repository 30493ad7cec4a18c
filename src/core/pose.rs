//! Camera poses on a sphere around a subject.
//!
//! A pose is parameterized by pan (azimuth, degrees) and tilt (co-latitude
//! measured from the +Z pole, degrees). Tilt 0 is directly above the subject,
//! tilt 90 is a horizontal ring at subject height, tilt 180 is directly below.
//!
//! Orientations are XYZ Euler angles in radians, laid out as
//! `(pitch, roll, yaw)` = `(x, y, z)`, for a camera whose rest pose looks
//! down -Z with +Y up.

use crate::core::math::{deg_to_rad, rad_to_deg, wrap_degrees};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Below this horizontal length the look-at yaw is undefined (camera at a pole).
const POLE_EPSILON: f64 = 1e-9;

/// Sign applied to one axis of the generated position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// How camera orientation is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Pitch = tilt, yaw = pan (+180 if flipped). Only aims at the subject when
    /// the position chirality matches the yaw convention.
    Heuristic,
    /// Orientation from `normalize(center - position)`.
    LookAt,
}

/// Handedness and orientation conventions for a target reconstruction tool.
///
/// The default is the Blender convention (x negated, yaw flipped by 180°),
/// under which the heuristic orientation faces the subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosePolicy {
    /// Sign applied to the x offset.
    pub x_sign: Sign,
    /// Sign applied to the y offset.
    pub y_sign: Sign,
    /// Add 180° to yaw so that yaw 0 faces -Y instead of +Y.
    pub yaw_flip: bool,
    pub orientation: OrientationMode,
}

impl Default for PosePolicy {
    fn default() -> Self {
        Self {
            x_sign: Sign::Negative,
            y_sign: Sign::Positive,
            yaw_flip: true,
            orientation: OrientationMode::Heuristic,
        }
    }
}

/// A camera pose on the sweep sphere. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpherePose {
    /// World position.
    pub position: Vector3<f64>,
    /// XYZ Euler orientation in radians: (pitch, roll, yaw).
    pub orientation: Vector3<f64>,
    pub pan_deg: f64,
    pub tilt_deg: f64,
}

impl SpherePose {
    /// Compute the pose for `(pan_deg, tilt_deg)` on the sphere of `radius`
    /// around `center`, using the orientation mode from `policy`.
    pub fn new(
        center: &Vector3<f64>,
        radius: f64,
        pan_deg: f64,
        tilt_deg: f64,
        policy: &PosePolicy,
    ) -> Self {
        let position = compute_position(center, radius, pan_deg, tilt_deg, policy);
        let heuristic = compute_orientation(pan_deg, tilt_deg, policy);
        let orientation = match policy.orientation {
            OrientationMode::Heuristic => heuristic,
            OrientationMode::LookAt => look_at_orientation(&position, center, heuristic.z),
        };

        Self {
            position,
            orientation,
            pan_deg,
            tilt_deg,
        }
    }

    /// Orientation in degrees.
    pub fn orientation_deg(&self) -> Vector3<f64> {
        self.orientation.map(rad_to_deg)
    }
}

/// Position on the sphere.
///
/// With `elevation = 90 - tilt`:
/// ```text
/// x = sx * r * sin(pan) * cos(elev) + cx
/// y = sy * r * cos(elev) * cos(pan) + cy
/// z =      r * sin(elev)            + cz
/// ```
pub fn compute_position(
    center: &Vector3<f64>,
    radius: f64,
    pan_deg: f64,
    tilt_deg: f64,
    policy: &PosePolicy,
) -> Vector3<f64> {
    let pan = deg_to_rad(pan_deg);
    let elevation = deg_to_rad(90.0 - tilt_deg);

    let x = policy.x_sign.factor() * radius * pan.sin() * elevation.cos() + center.x;
    let y = policy.y_sign.factor() * radius * elevation.cos() * pan.cos() + center.y;
    let z = radius * elevation.sin() + center.z;

    Vector3::new(x, y, z)
}

/// Heuristic orientation: `(radians(tilt), 0, radians(pan [+ 180]))`.
///
/// Yaw is wrapped into `[0, 2π)` so that pan 0 and pan 360 coincide.
pub fn compute_orientation(pan_deg: f64, tilt_deg: f64, policy: &PosePolicy) -> Vector3<f64> {
    let yaw_deg = if policy.yaw_flip {
        pan_deg + 180.0
    } else {
        pan_deg
    };

    Vector3::new(
        deg_to_rad(tilt_deg),
        0.0,
        deg_to_rad(wrap_degrees(yaw_deg)),
    )
}

/// Orientation that aims the camera's -Z axis from `position` at `target`.
///
/// The rest camera looks down -Z; after `Rz(yaw) * Rx(pitch)` its forward is
/// `(-sin(yaw) sin(pitch), cos(yaw) sin(pitch), -cos(pitch))`, which inverts to
/// `pitch = acos(-d.z)` and `yaw = atan2(-d.x, d.y)`.
///
/// At the poles yaw is unconstrained and `fallback_yaw` (radians) is used.
pub fn look_at_orientation(
    position: &Vector3<f64>,
    target: &Vector3<f64>,
    fallback_yaw: f64,
) -> Vector3<f64> {
    let offset = target - position;
    let dist = offset.norm();
    if dist < POLE_EPSILON {
        return Vector3::new(0.0, 0.0, fallback_yaw);
    }
    let d = offset / dist;

    let pitch = (-d.z).clamp(-1.0, 1.0).acos();
    let horizontal = (d.x * d.x + d.y * d.y).sqrt();
    let yaw = if horizontal < POLE_EPSILON {
        fallback_yaw
    } else {
        deg_to_rad(wrap_degrees(rad_to_deg((-d.x).atan2(d.y))))
    };

    Vector3::new(pitch, 0.0, yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_ring_at_subject_height() {
        let center = Vector3::new(0.0, 0.0, 1.0);
        let policy = PosePolicy::default();
        let p = compute_position(&center, 3.0, 0.0, 90.0, &policy);

        // elevation 0: (0, sy * 3, 1.0)
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sign_policy_flips_axes() {
        let center = Vector3::zeros();
        let negative_y = PosePolicy {
            y_sign: Sign::Negative,
            ..PosePolicy::default()
        };
        let p = compute_position(&center, 2.0, 0.0, 90.0, &negative_y);
        assert_relative_eq!(p.y, -2.0, epsilon = 1e-12);

        let positive_x = PosePolicy {
            x_sign: Sign::Positive,
            ..PosePolicy::default()
        };
        let q = compute_position(&center, 2.0, 90.0, 90.0, &positive_x);
        assert_relative_eq!(q.x, 2.0, epsilon = 1e-12);
        let r = compute_position(&center, 2.0, 90.0, 90.0, &PosePolicy::default());
        assert_relative_eq!(r.x, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_poles() {
        let center = Vector3::new(0.5, -0.5, 1.0);
        let policy = PosePolicy::default();
        let top = compute_position(&center, 3.0, 45.0, 0.0, &policy);
        let bottom = compute_position(&center, 3.0, 45.0, 180.0, &policy);
        assert_relative_eq!(top, Vector3::new(0.5, -0.5, 4.0), epsilon = 1e-9);
        assert_relative_eq!(bottom, Vector3::new(0.5, -0.5, -2.0), epsilon = 1e-9);
    }

    #[test]
    fn test_heuristic_orientation_yaw_flip() {
        let flipped = compute_orientation(30.0, 60.0, &PosePolicy::default());
        assert_relative_eq!(flipped.x, 60f64.to_radians(), epsilon = 1e-12);
        assert_eq!(flipped.y, 0.0);
        assert_relative_eq!(flipped.z, 210f64.to_radians(), epsilon = 1e-12);

        let plain = PosePolicy {
            yaw_flip: false,
            ..PosePolicy::default()
        };
        let o = compute_orientation(30.0, 60.0, &plain);
        assert_relative_eq!(o.z, 30f64.to_radians(), epsilon = 1e-12);

        // 270 + 180 wraps to 90
        let wrapped = compute_orientation(270.0, 90.0, &PosePolicy::default());
        assert_relative_eq!(wrapped.z, 90f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_look_at_matches_heuristic_under_default_policy() {
        let center = Vector3::new(0.0, 0.0, 1.0);
        let policy = PosePolicy::default();
        for &(pan, tilt) in &[(0.0, 90.0), (90.0, 45.0), (200.0, 120.0), (330.0, 10.0)] {
            let pos = compute_position(&center, 3.0, pan, tilt, &policy);
            let heuristic = compute_orientation(pan, tilt, &policy);
            let look = look_at_orientation(&pos, &center, heuristic.z);
            assert_relative_eq!(look.x, heuristic.x, epsilon = 1e-9);
            assert_relative_eq!(look.z, heuristic.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_look_at_pole_uses_fallback_yaw() {
        let center = Vector3::new(0.0, 0.0, 0.0);
        let above = Vector3::new(0.0, 0.0, 5.0);
        let o = look_at_orientation(&above, &center, 1.25);
        assert_relative_eq!(o.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(o.z, 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_pose_look_at_mode() {
        let center = Vector3::new(1.0, 2.0, 0.5);
        let policy = PosePolicy {
            orientation: OrientationMode::LookAt,
            ..PosePolicy::default()
        };
        let pose = SpherePose::new(&center, 2.0, 90.0, 90.0, &policy);
        // Camera sits at -x of the subject and must look along +x: yaw 270°.
        assert_relative_eq!(pose.orientation_deg().z, 270.0, epsilon = 1e-9);
        assert_relative_eq!(pose.orientation_deg().x, 90.0, epsilon = 1e-9);
    }
}
