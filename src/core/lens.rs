//! Lens and sensor model.
//!
//! A single linear conversion between physical focal length, pixel focal
//! length and the 35mm-equivalent focal length. No distortion.

use serde::{Deserialize, Serialize};

/// Width of a full-frame (35mm film) sensor, in millimetres.
pub const FULL_FRAME_WIDTH_MM: f64 = 36.0;

/// Output image resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Sensor geometry paired with the output resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    pub sensor_width_mm: f64,
    pub resolution: Resolution,
}

impl Lens {
    pub fn new(sensor_width_mm: f64, resolution: Resolution) -> Self {
        Self {
            sensor_width_mm,
            resolution,
        }
    }

    /// Sensor height follows the image aspect ratio: `width * (h / w)`.
    pub fn sensor_height_mm(&self) -> f64 {
        self.sensor_width_mm * (self.resolution.height as f64 / self.resolution.width as f64)
    }

    /// Focal length in pixels: `f_mm * width_px / sensor_width_mm`.
    pub fn focal_length_px(&self, focal_length_mm: f64) -> f64 {
        focal_length_mm * self.resolution.width as f64 / self.sensor_width_mm
    }

    /// 35mm-equivalent focal length: `f_mm * 36 / sensor_width_mm`.
    pub fn focal_length_35mm(&self, focal_length_mm: f64) -> f64 {
        focal_length_mm * FULL_FRAME_WIDTH_MM / self.sensor_width_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_frame_is_identity() {
        let lens = Lens::new(36.0, Resolution::default());
        assert_relative_eq!(lens.focal_length_35mm(50.0), 50.0, epsilon = 1e-12);
        assert_relative_eq!(lens.sensor_height_mm(), 20.25, epsilon = 1e-12);
        // 50mm on a 36mm sensor at 1920 px wide
        assert_relative_eq!(lens.focal_length_px(50.0), 2666.666666666667, epsilon = 1e-9);
    }

    #[test]
    fn test_crop_sensor() {
        let lens = Lens::new(
            23.5,
            Resolution {
                width: 6000,
                height: 4000,
            },
        );
        assert_relative_eq!(lens.focal_length_35mm(23.5), 36.0, epsilon = 1e-12);
        assert_relative_eq!(lens.sensor_height_mm(), 23.5 * 4000.0 / 6000.0, epsilon = 1e-12);
    }
}
