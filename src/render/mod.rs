//! Renderer collaborators.
//!
//! The sweep only talks to the `Renderer` trait; these are the implementations
//! that ship with the crate.

mod preview;

pub use preview::PreviewRenderer;

use crate::io::RenderError;
use crate::sweep::{RenderRequest, Renderer};

/// Writes nothing. For producing pose tables without a render host.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
        log::trace!("Skipping render of {:?}", request.output_path);
        Ok(())
    }
}
