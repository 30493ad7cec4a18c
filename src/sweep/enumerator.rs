//! Sweep enumeration: walk the (focal length × tilt × pan) grid, render each
//! camera and collect its record.
//!
//! The sweep is single pass. It either visits every camera or stops at the
//! first failure; records are never produced for cameras that were not
//! rendered (except those skipped on resume, which were rendered earlier).

use crate::core::{Lens, SpherePose};
use crate::io::{RenderError, SweepError};
use crate::sweep::config::SweepConfig;
use crate::sweep::record::{image_filename, CameraRecord};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Everything a renderer needs to produce one image.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    pub id: usize,
    pub pose: &'a SpherePose,
    pub focal_length_mm: f64,
    pub lens: &'a Lens,
    /// Image path to write. Existing files are overwritten.
    pub output_path: &'a Path,
}

/// The scene host. Writes exactly one image per call.
pub trait Renderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: FnMut(&RenderRequest<'_>) -> Result<(), RenderError>,
{
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
        self(request)
    }
}

/// Controls for a sweep run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepOptions<'a> {
    /// Checked before each render; when set the sweep stops with `Cancelled`.
    pub cancel: Option<&'a AtomicBool>,
    /// Cameras with `id < resume_from` were rendered by an earlier run. Their
    /// records are recomputed but the renderer is not called.
    pub resume_from: usize,
}

/// Run the whole sweep with default options.
pub fn generate_sweep<R: Renderer + ?Sized>(
    config: &SweepConfig,
    renderer: &mut R,
) -> Result<Vec<CameraRecord>, SweepError> {
    generate_sweep_with(config, renderer, SweepOptions::default())
}

/// Run the sweep: focal length (outer), tilt, pan (inner).
pub fn generate_sweep_with<R: Renderer + ?Sized>(
    config: &SweepConfig,
    renderer: &mut R,
    options: SweepOptions<'_>,
) -> Result<Vec<CameraRecord>, SweepError> {
    config.validate()?;

    let lens = config.lens();
    let total = config.camera_count();
    let mut records = Vec::with_capacity(total);

    log::info!(
        "Sweeping {} cameras ({} focal × {} tilt × {} pan)",
        total,
        config.focal_lengths.len(),
        config.tilt_degs.len(),
        config.pan_degs.len()
    );
    if options.resume_from > 0 {
        log::info!("Resuming after {} completed cameras", options.resume_from);
    }

    let mut id = 0usize;
    for &focal_length_mm in &config.focal_lengths {
        for &tilt_deg in &config.tilt_degs {
            for &pan_deg in &config.pan_degs {
                let pose = SpherePose::new(
                    &config.center,
                    config.radius,
                    pan_deg,
                    tilt_deg,
                    &config.policy,
                );
                let filename = config.image_dir.join(image_filename(
                    id,
                    tilt_deg,
                    pan_deg,
                    focal_length_mm,
                    config.image_format.extension(),
                ));

                if id >= options.resume_from {
                    if options
                        .cancel
                        .is_some_and(|flag| flag.load(Ordering::Relaxed))
                    {
                        log::warn!("Sweep cancelled after {} cameras", id);
                        return Err(SweepError::Cancelled { completed: id });
                    }

                    let request = RenderRequest {
                        id,
                        pose: &pose,
                        focal_length_mm,
                        lens: &lens,
                        output_path: &filename,
                    };
                    if let Err(source) = renderer.render(&request) {
                        return Err(SweepError::Render {
                            id,
                            tilt_deg,
                            pan_deg,
                            focal_length_mm,
                            filename,
                            source,
                        });
                    }
                    log::debug!("Rendered {:?}", filename);
                }

                records.push(CameraRecord::new(
                    id,
                    filename,
                    pose,
                    config.center,
                    config.radius,
                    focal_length_mm,
                    &lens,
                ));
                id += 1;
            }
        }
    }

    log::info!("Sweep complete: {} cameras", records.len());
    Ok(records)
}
