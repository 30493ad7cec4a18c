//! Sweep configuration: the parameter grid and the camera/lens setup.

use crate::core::{Lens, PosePolicy, Resolution};
use crate::io::ConfigError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tolerance (as a fraction of the step) used when testing range end points.
const RANGE_EPSILON: f64 = 1e-9;

/// Maximum tilt (co-latitude) in degrees.
pub const MAX_TILT_DEG: f64 = 180.0;

/// Pan wraps at this value.
pub const FULL_TURN_DEG: f64 = 360.0;

/// An arithmetic range `start, start + step, ...` up to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl StepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Values in `[start, end]`.
    pub fn inclusive(&self, name: &'static str) -> Result<Vec<f64>, ConfigError> {
        self.expand(name, true)
    }

    /// Values in `[start, end)`.
    pub fn half_open(&self, name: &'static str) -> Result<Vec<f64>, ConfigError> {
        self.expand(name, false)
    }

    fn expand(&self, name: &'static str, include_end: bool) -> Result<Vec<f64>, ConfigError> {
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(ConfigError::NonPositiveStep {
                name,
                step: self.step,
            });
        }

        let tolerance = self.step * RANGE_EPSILON;
        let mut values = Vec::new();
        let mut i = 0u64;
        loop {
            // Index-based to avoid accumulating error over long ranges.
            let value = self.start + i as f64 * self.step;
            let in_range = if include_end {
                value <= self.end + tolerance
            } else {
                value < self.end - tolerance
            };
            if !in_range {
                break;
            }
            values.push(value);
            i += 1;
        }

        if values.is_empty() {
            return Err(ConfigError::EmptyRange { name });
        }
        Ok(values)
    }
}

/// File format of rendered images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// Range-based sweep description, as written in configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Subject center.
    pub center: Vector3<f64>,
    /// Camera distance from the subject.
    pub radius: f64,
    /// Focal lengths in mm, inclusive.
    pub focal_length: StepRange,
    /// Tilt angles in degrees, inclusive, within [0, 180].
    pub tilt: StepRange,
    /// Pan angles in degrees, half-open, within [0, 360).
    pub pan: StepRange,
    pub sensor_width_mm: f64,
    pub resolution: Resolution,
    pub policy: PosePolicy,
    pub image_format: ImageFormat,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            center: Vector3::new(0.0, 0.0, 1.0),
            radius: 3.0,
            focal_length: StepRange::new(20.0, 50.0, 10.0),
            tilt: StepRange::new(0.0, MAX_TILT_DEG, 10.0),
            pan: StepRange::new(0.0, FULL_TURN_DEG, 10.0),
            sensor_width_mm: 36.0,
            resolution: Resolution::default(),
            policy: PosePolicy::default(),
            image_format: ImageFormat::default(),
        }
    }
}

impl SweepSettings {
    /// Expand the ranges into a validated `SweepConfig` writing images to `image_dir`.
    pub fn resolve(&self, image_dir: impl Into<PathBuf>) -> Result<SweepConfig, ConfigError> {
        let config = SweepConfig {
            center: self.center,
            radius: self.radius,
            focal_lengths: self.focal_length.inclusive("focal_length")?,
            tilt_degs: self.tilt.inclusive("tilt")?,
            pan_degs: self.pan.half_open("pan")?,
            sensor_width_mm: self.sensor_width_mm,
            resolution: self.resolution,
            policy: self.policy,
            image_format: self.image_format,
            image_dir: image_dir.into(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// A fully expanded sweep: every focal length, tilt and pan to visit.
///
/// Enumeration order is focal length (outer), tilt, pan (inner).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub focal_lengths: Vec<f64>,
    pub tilt_degs: Vec<f64>,
    pub pan_degs: Vec<f64>,
    pub sensor_width_mm: f64,
    pub resolution: Resolution,
    pub policy: PosePolicy,
    pub image_format: ImageFormat,
    /// Directory rendered images are written to.
    pub image_dir: PathBuf,
}

impl SweepConfig {
    /// Number of cameras the sweep produces.
    pub fn camera_count(&self) -> usize {
        self.focal_lengths.len() * self.tilt_degs.len() * self.pan_degs.len()
    }

    pub fn lens(&self) -> Lens {
        Lens::new(self.sensor_width_mm, self.resolution)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("radius", self.radius)?;
        require_positive("sensor_width_mm", self.sensor_width_mm)?;
        require_positive("resolution.width", self.resolution.width as f64)?;
        require_positive("resolution.height", self.resolution.height as f64)?;

        if self.focal_lengths.is_empty() {
            return Err(ConfigError::EmptyRange {
                name: "focal_length",
            });
        }
        if self.tilt_degs.is_empty() {
            return Err(ConfigError::EmptyRange { name: "tilt" });
        }
        if self.pan_degs.is_empty() {
            return Err(ConfigError::EmptyRange { name: "pan" });
        }

        for &f in &self.focal_lengths {
            require_positive("focal_length", f)?;
        }
        for &t in &self.tilt_degs {
            if !(0.0..=MAX_TILT_DEG).contains(&t) {
                return Err(ConfigError::OutOfBounds {
                    name: "tilt",
                    value: t,
                    min: 0.0,
                    max: MAX_TILT_DEG,
                });
            }
        }
        for &p in &self.pan_degs {
            if !(0.0..FULL_TURN_DEG).contains(&p) {
                return Err(ConfigError::OutOfBounds {
                    name: "pan",
                    value: p,
                    min: 0.0,
                    max: FULL_TURN_DEG,
                });
            }
        }
        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_and_half_open() {
        let tilt = StepRange::new(0.0, 180.0, 90.0);
        assert_eq!(tilt.inclusive("tilt").unwrap(), vec![0.0, 90.0, 180.0]);

        let pan = StepRange::new(0.0, 360.0, 90.0);
        assert_eq!(pan.half_open("pan").unwrap(), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_fractional_step_hits_end() {
        let r = StepRange::new(0.0, 1.0, 0.1);
        let values = r.inclusive("r").unwrap();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_zero_step_rejected() {
        let r = StepRange::new(0.0, 10.0, 0.0);
        assert!(matches!(
            r.inclusive("focal_length"),
            Err(ConfigError::NonPositiveStep { .. })
        ));
        let r = StepRange::new(0.0, 10.0, -1.0);
        assert!(matches!(
            r.half_open("pan"),
            Err(ConfigError::NonPositiveStep { .. })
        ));
    }

    #[test]
    fn test_empty_range_rejected() {
        let r = StepRange::new(50.0, 20.0, 10.0);
        assert!(matches!(
            r.inclusive("focal_length"),
            Err(ConfigError::EmptyRange { name: "focal_length" })
        ));
        // Half-open with start == end is empty.
        let r = StepRange::new(0.0, 0.0, 10.0);
        assert!(matches!(r.half_open("pan"), Err(ConfigError::EmptyRange { .. })));
    }

    #[test]
    fn test_default_settings_resolve() {
        let config = SweepSettings::default().resolve("out").unwrap();
        assert_eq!(config.focal_lengths, vec![20.0, 30.0, 40.0, 50.0]);
        assert_eq!(config.tilt_degs.len(), 19);
        assert_eq!(config.pan_degs.len(), 36);
        assert_eq!(config.camera_count(), 4 * 19 * 36);
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_tilt() {
        let mut settings = SweepSettings::default();
        settings.tilt = StepRange::new(0.0, 200.0, 100.0);
        assert!(matches!(
            settings.resolve("out"),
            Err(ConfigError::OutOfBounds { name: "tilt", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_radius() {
        let mut settings = SweepSettings::default();
        settings.radius = 0.0;
        assert!(matches!(
            settings.resolve("out"),
            Err(ConfigError::NonPositive { name: "radius", .. })
        ));
    }
}
