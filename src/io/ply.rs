//! Guide point cloud (`init_guide_points.ply`).
//!
//! The cloud is not derived from scene geometry. It is a uniform ball of
//! white points placed at the centroid of the camera positions, sized to half
//! the mean camera distance, and used to seed splatting/reconstruction tools
//! that expect an initial point cloud.
//!
//! File layout (binary little-endian):
//! ```text
//! ply
//! format binary_little_endian 1.0
//! comment Created in RealityCapture
//! element vertex N
//! property float x / y / z
//! property uchar red / green / blue
//! end_header
//! N × (f32 x, f32 y, f32 z, u8 r, u8 g, u8 b)   -- 15 bytes, no padding
//! ```

use crate::core::{centroid, mean_distance};
use crate::io::{ConfigError, SweepError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

/// Guide radius as a fraction of the mean camera-to-centroid distance.
pub const AUTO_RADIUS_FACTOR: f64 = 0.5;

/// Bytes per vertex record.
pub const RECORD_SIZE: usize = 3 * 4 + 3;

const WHITE: [u8; 3] = [255, 255, 255];

const PROPERTIES: [&str; 6] = [
    "property float x",
    "property float y",
    "property float z",
    "property uchar red",
    "property uchar green",
    "property uchar blue",
];

/// A colored point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCloudPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Ball the guide points are sampled from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideSphere {
    pub center: Vector3<f64>,
    pub radius: f64,
}

impl GuideSphere {
    /// Centroid of `positions` and `AUTO_RADIUS_FACTOR` × their mean distance to it.
    pub fn from_positions(positions: &[Vector3<f64>]) -> Result<Self, ConfigError> {
        let center = centroid(positions).ok_or(ConfigError::NoPositions)?;
        let avg_dist = mean_distance(positions, &center);
        Ok(Self {
            center,
            radius: avg_dist * AUTO_RADIUS_FACTOR,
        })
    }
}

/// Sample `num_points` white points uniformly by volume inside the guide sphere
/// of `positions`.
///
/// Direction: `φ ~ U(0, 2π)`, `cos θ ~ U(-1, 1)`. Radius: `R · u^(1/3)` with
/// `u ~ U(0, 1)`; the cube root keeps density constant per unit volume.
pub fn synthesize_point_cloud<R: Rng + ?Sized>(
    positions: &[Vector3<f64>],
    num_points: usize,
    rng: &mut R,
) -> Result<(GuideSphere, Vec<PointCloudPoint>), ConfigError> {
    let sphere = GuideSphere::from_positions(positions)?;
    let c = sphere.center;

    let points = (0..num_points)
        .map(|_| {
            let phi: f64 = rng.gen_range(0.0..2.0 * PI);
            let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
            let u: f64 = rng.gen();
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let r = sphere.radius * u.cbrt();

            PointCloudPoint {
                x: (c.x + r * sin_theta * phi.cos()) as f32,
                y: (c.y + r * sin_theta * phi.sin()) as f32,
                z: (c.z + r * cos_theta) as f32,
                r: WHITE[0],
                g: WHITE[1],
                b: WHITE[2],
            }
        })
        .collect();

    Ok((sphere, points))
}

/// Header text for a cloud of `count` vertices.
pub fn ply_header(count: usize) -> String {
    let mut header = String::from(
        "ply\nformat binary_little_endian 1.0\ncomment Created in RealityCapture\n",
    );
    header.push_str(&format!("element vertex {count}\n"));
    for property in PROPERTIES {
        header.push_str(property);
        header.push('\n');
    }
    header.push_str("end_header\n");
    header
}

/// Write a cloud as binary little-endian PLY.
pub fn write_ply<W: Write>(w: &mut W, points: &[PointCloudPoint]) -> std::io::Result<()> {
    w.write_all(ply_header(points.len()).as_bytes())?;
    for p in points {
        write_record(w, p)?;
    }
    Ok(())
}

fn write_record<W: Write>(w: &mut W, p: &PointCloudPoint) -> std::io::Result<()> {
    w.write_f32::<LittleEndian>(p.x)?;
    w.write_f32::<LittleEndian>(p.y)?;
    w.write_f32::<LittleEndian>(p.z)?;
    w.write_u8(p.r)?;
    w.write_u8(p.g)?;
    w.write_u8(p.b)?;
    Ok(())
}

/// Save a cloud to `path`.
pub fn save_guide_points_ply(points: &[PointCloudPoint], path: &Path) -> Result<(), SweepError> {
    let file = File::create(path).map_err(|e| SweepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_ply(&mut writer, points)
        .and_then(|_| writer.flush())
        .map_err(|e| SweepError::io(path, e))
}

/// Load a cloud written by `save_guide_points_ply`.
///
/// Rejects files whose header differs from the layout above, whose body is
/// shorter than declared, or that carry trailing bytes.
pub fn load_guide_points_ply(path: &Path) -> Result<Vec<PointCloudPoint>, SweepError> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(|e| SweepError::io(path, e))?;

    decode_ply(&bytes).map_err(|message| {
        ConfigError::InvalidFile {
            path: path.to_path_buf(),
            message,
        }
        .into()
    })
}

/// Decode binary PLY bytes in the guide-point layout.
pub fn decode_ply(bytes: &[u8]) -> Result<Vec<PointCloudPoint>, String> {
    const END: &[u8] = b"end_header\n";
    let header_len = bytes
        .windows(END.len())
        .position(|w| w == END)
        .map(|i| i + END.len())
        .ok_or_else(|| "missing end_header".to_string())?;

    let header = std::str::from_utf8(&bytes[..header_len])
        .map_err(|_| "header is not ASCII".to_string())?;
    let count = parse_vertex_count(header)?;
    if header != ply_header(count) {
        return Err("unsupported header layout".to_string());
    }

    let body = &bytes[header_len..];
    let expected = count * RECORD_SIZE;
    if body.len() != expected {
        return Err(format!(
            "expected {expected} bytes of vertex data, found {}",
            body.len()
        ));
    }

    let mut cursor = Cursor::new(body);
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(read_record(&mut cursor).map_err(|e| e.to_string())?);
    }
    Ok(points)
}

fn parse_vertex_count(header: &str) -> Result<usize, String> {
    header
        .lines()
        .find_map(|line| line.strip_prefix("element vertex "))
        .ok_or_else(|| "missing vertex element".to_string())?
        .trim()
        .parse()
        .map_err(|e| format!("invalid vertex count: {e}"))
}

fn read_record<R: Read>(r: &mut R) -> std::io::Result<PointCloudPoint> {
    Ok(PointCloudPoint {
        x: r.read_f32::<LittleEndian>()?,
        y: r.read_f32::<LittleEndian>()?,
        z: r.read_f32::<LittleEndian>()?,
        r: r.read_u8()?,
        g: r.read_u8()?,
        b: r.read_u8()?,
    })
}

/// Synthesize a guide cloud from camera positions and write it to `path`.
///
/// `seed` makes the cloud reproducible; without it the RNG is seeded from the OS.
pub fn synthesize_point_cloud_file(
    positions: &[Vector3<f64>],
    num_points: usize,
    path: &Path,
    seed: Option<u64>,
) -> Result<GuideSphere, SweepError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (sphere, points) = synthesize_point_cloud(positions, num_points, &mut rng)?;

    log::info!(
        "Calculated Center: ({:.3}, {:.3}, {:.3})",
        sphere.center.x,
        sphere.center.y,
        sphere.center.z
    );
    log::info!("Calculated Radius: {:.3}", sphere.radius);

    save_guide_points_ply(&points, path)?;
    log::info!("Guide point cloud ({} points) saved to {:?}", points.len(), path);
    Ok(sphere)
}
