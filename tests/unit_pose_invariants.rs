//! Geometric invariants of the sphere pose generator.
//!
//! Each test checks a property the exporters and downstream reconstruction
//! tools rely on, with numbers small enough to verify by hand.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use spherecam_rs::core::{
    aim_error, compute_orientation, compute_position, look_at_orientation, OrientationMode,
    PosePolicy, Sign, SpherePose,
};

fn all_policies() -> Vec<PosePolicy> {
    let mut policies = Vec::new();
    for x_sign in [Sign::Positive, Sign::Negative] {
        for y_sign in [Sign::Positive, Sign::Negative] {
            for yaw_flip in [true, false] {
                policies.push(PosePolicy {
                    x_sign,
                    y_sign,
                    yaw_flip,
                    orientation: OrientationMode::Heuristic,
                });
            }
        }
    }
    policies
}

#[test]
fn test_positions_lie_on_sphere() {
    let centers = [
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(2.5, -1.0, 0.3),
        Vector3::new(-4.0, 7.0, -2.0),
    ];
    for policy in all_policies() {
        for center in &centers {
            for tilt_step in 0..=36 {
                let tilt = tilt_step as f64 * 5.0;
                for pan_step in 0..48 {
                    let pan = pan_step as f64 * 7.5;
                    let p = compute_position(center, 3.0, pan, tilt, &policy);
                    assert_relative_eq!((p - center).norm(), 3.0, epsilon = 1e-6);
                }
            }
        }
    }
}

#[test]
fn test_equator_stays_at_subject_height() {
    let center = Vector3::new(0.7, -0.2, 1.25);
    for policy in all_policies() {
        for pan_step in 0..36 {
            let p = compute_position(&center, 2.0, pan_step as f64 * 10.0, 90.0, &policy);
            assert_relative_eq!(p.z, center.z, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_pan_is_periodic() {
    let center = Vector3::new(0.0, 0.0, 1.0);
    for policy in all_policies() {
        for tilt in [0.0, 30.0, 90.0, 150.0, 180.0] {
            let a = SpherePose::new(&center, 3.0, 0.0, tilt, &policy);
            let b = SpherePose::new(&center, 3.0, 360.0, tilt, &policy);
            assert_relative_eq!(a.position, b.position, epsilon = 1e-9);
            assert_relative_eq!(a.orientation, b.orientation, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_example_literal() {
    // center (0,0,1), radius 3, pan 0, tilt 90 → (0, sy * 3, 1)
    let center = Vector3::new(0.0, 0.0, 1.0);
    for policy in all_policies() {
        let p = compute_position(&center, 3.0, 0.0, 90.0, &policy);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, policy.y_sign.factor() * 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_heuristic_orientation_values() {
    let o = compute_orientation(90.0, 45.0, &PosePolicy::default());
    assert_relative_eq!(o.x, 45f64.to_radians(), epsilon = 1e-12);
    assert_eq!(o.y, 0.0);
    assert_relative_eq!(o.z, 270f64.to_radians(), epsilon = 1e-12);
}

#[test]
fn test_heuristic_aims_at_off_axis_subject_with_matched_chirality() {
    // The center offset is applied to x and y alike, so the heuristic keeps
    // aiming at the subject even when it is off the vertical axis.
    let center = Vector3::new(1.5, -2.0, 0.8);
    let policy = PosePolicy::default();
    for &(pan, tilt) in &[(0.0, 90.0), (45.0, 30.0), (170.0, 100.0), (300.0, 160.0)] {
        let pose = SpherePose::new(&center, 3.0, pan, tilt, &policy);
        assert!(aim_error(&pose, &center) < 1e-9, "pan {pan} tilt {tilt}");
    }
}

#[test]
fn test_heuristic_misses_subject_when_y_offset_is_dropped() {
    // A generator that forgets center.y places the camera on a sphere around
    // (cx, 0, cz). The heuristic orientation then points at that phantom
    // center, while look-at from the same position finds the real subject.
    let center = Vector3::new(0.0, 1.5, 1.0);
    let policy = PosePolicy::default();
    let pan = 90.0;
    let tilt = 90.0;

    let position = compute_position(&center, 3.0, pan, tilt, &policy) - Vector3::new(0.0, center.y, 0.0);
    let heuristic = compute_orientation(pan, tilt, &policy);
    let misplaced = SpherePose {
        position,
        orientation: heuristic,
        pan_deg: pan,
        tilt_deg: tilt,
    };
    assert!(aim_error(&misplaced, &center) > 0.1);

    let corrected = SpherePose {
        orientation: look_at_orientation(&position, &center, heuristic.z),
        ..misplaced
    };
    assert!(aim_error(&corrected, &center) < 1e-9);
}

#[test]
fn test_heuristic_misses_subject_when_chirality_mismatched() {
    let center = Vector3::new(0.0, 0.0, 1.0);
    let mismatched = PosePolicy {
        x_sign: Sign::Positive,
        ..PosePolicy::default()
    };
    let pose = SpherePose::new(&center, 3.0, 90.0, 90.0, &mismatched);
    // Camera sits at +x but the heuristic yaw faces +x as well: looking away.
    assert_relative_eq!(aim_error(&pose, &center), std::f64::consts::PI, epsilon = 1e-9);

    let look_at = PosePolicy {
        orientation: OrientationMode::LookAt,
        ..mismatched
    };
    let fixed = SpherePose::new(&center, 3.0, 90.0, 90.0, &look_at);
    assert!(aim_error(&fixed, &center) < 1e-9);
}

#[test]
fn test_look_at_mode_aims_for_every_policy() {
    let center = Vector3::new(-1.0, 0.5, 2.0);
    for mut policy in all_policies() {
        policy.orientation = OrientationMode::LookAt;
        for &(pan, tilt) in &[(10.0, 20.0), (135.0, 90.0), (250.0, 170.0)] {
            let pose = SpherePose::new(&center, 2.0, pan, tilt, &policy);
            assert!(aim_error(&pose, &center) < 1e-9);
        }
    }
}
