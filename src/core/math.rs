//! Mathematical utilities (angle conversion, rounding, centroids).

use nalgebra::Vector3;

/// Convert degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Convert radians to degrees.
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Values that land within floating noise of 360 collapse to 0 so that
/// `wrap_degrees(360.0) == wrap_degrees(0.0)` holds exactly.
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if (360.0 - wrapped).abs() < 1e-9 {
        0.0
    } else {
        wrapped
    }
}

/// Round to a fixed number of decimal places.
///
/// Negative zero is normalised to `0.0` so exported tables never show `-0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Arithmetic mean of a set of points. Returns `None` for an empty slice.
pub fn centroid(points: &[Vector3<f64>]) -> Option<Vector3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}

/// Mean Euclidean distance from each point to `center`.
pub fn mean_distance(points: &[Vector3<f64>], center: &Vector3<f64>) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| (p - center).norm()).sum::<f64>() / points.len() as f64
}
