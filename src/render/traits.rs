//! Renderer trait and the per-frame context handed to it
//!
//! A renderer is called once per frame, in order, and must return a finished
//! still before the next call. Everything it needs for a frame arrives in the
//! [`FrameContext`]; renderers keep no drawing state between calls.

use image::RgbaImage;
use thiserror::Error;

use crate::effects::Rotation;
use crate::shapes::Point;

/// Errors that can occur while rendering a still
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("viewport half-width must be positive and finite, got {0}")]
    InvalidExtent(f64),
}

/// Everything a renderer needs to know about one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// 1-based frame index
    pub index: usize,
    /// Number of frames in the run
    pub total: usize,
    /// Half-width of the `[-lim, lim]` viewport, identical for every frame
    pub lim: f64,
    /// Orientation the points were rotated to
    pub rotation: Rotation,
}

/// Turns a rotated point set into a raster still
pub trait Renderer {
    fn render(&self, points: &[Point], ctx: &FrameContext) -> Result<RgbaImage, RenderError>;
}
