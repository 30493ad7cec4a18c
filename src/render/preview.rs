//! Preview renderer: a point-sampled stand-in subject projected through the
//! pinhole camera of each pose.
//!
//! The subject is a sphere of points around the sweep center, colored by
//! surface normal so that orientation mistakes are visible in the images.

use crate::core::Camera;
use crate::io::RenderError;
use crate::sweep::{RenderRequest, Renderer};
use image::{Rgb, RgbImage};
use nalgebra::Vector3;
use std::f64::consts::PI;

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 28]);

/// Renders a small image per camera with the `image` crate.
#[derive(Clone, Debug)]
pub struct PreviewRenderer {
    /// Subject sample points (world space) and their colors.
    points: Vec<(Vector3<f64>, Rgb<u8>)>,
    /// Images wider than this are rendered at reduced size, intrinsics scaled to match.
    max_width: u32,
    /// Side of the square drawn per point, in pixels.
    splat_size: u32,
    rendered: usize,
}

impl PreviewRenderer {
    /// Subject: `samples` points on a sphere of `subject_radius` around `center`.
    pub fn new(center: Vector3<f64>, subject_radius: f64, samples: usize) -> Self {
        let points = fibonacci_sphere(samples)
            .into_iter()
            .map(|n| (center + n * subject_radius, normal_color(&n)))
            .collect();

        Self {
            points,
            max_width: 320,
            splat_size: 2,
            rendered: 0,
        }
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    /// Number of images written so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Rasterize the subject for `request`.
    pub fn draw(&self, request: &RenderRequest<'_>) -> RgbImage {
        let mut camera = Camera::from_pose(request.pose, request.lens, request.focal_length_mm);

        // Scale intrinsics proportionally, maintaining aspect ratio.
        if camera.width > self.max_width {
            let scale = self.max_width as f64 / camera.width as f64;
            camera.width = self.max_width;
            camera.height = ((camera.height as f64 * scale).round() as u32).max(1);
            camera.fx *= scale;
            camera.fy *= scale;
            camera.cx *= scale;
            camera.cy *= scale;
        }

        let mut img = RgbImage::from_pixel(camera.width, camera.height, BACKGROUND);

        // Far-to-near so nearer samples overwrite farther ones.
        let mut projected: Vec<(f64, f64, f64, Rgb<u8>)> = self
            .points
            .iter()
            .filter_map(|(p, color)| {
                let p_cam = camera.world_to_camera(p);
                let px = camera.project(&p_cam)?;
                Some((p_cam.z, px.x, px.y, *color))
            })
            .collect();
        projected.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let half = (self.splat_size / 2) as i64;
        for (_, u, v, color) in projected {
            let (u, v) = (u.floor() as i64, v.floor() as i64);
            for dy in -half..=half {
                for dx in -half..=half {
                    let (x, y) = (u + dx, v + dy);
                    if x >= 0 && y >= 0 && (x as u32) < camera.width && (y as u32) < camera.height {
                        img.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }

        img
    }
}

impl Renderer for PreviewRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
        let img = self.draw(request);
        img.save(request.output_path)?;
        self.rendered += 1;
        Ok(())
    }
}

/// Evenly spread unit vectors (golden-angle spiral).
fn fibonacci_sphere(samples: usize) -> Vec<Vector3<f64>> {
    let n = samples.max(1);
    let golden = PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let ring = (1.0 - z * z).sqrt();
            let theta = golden * i as f64;
            Vector3::new(ring * theta.cos(), ring * theta.sin(), z)
        })
        .collect()
}

fn normal_color(n: &Vector3<f64>) -> Rgb<u8> {
    let channel = |c: f64| ((c * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([channel(n.x), channel(n.y), channel(n.z)])
}
