//! Render module - turning rotated points into raster stills
//!
//! This module provides:
//! - `Renderer` trait and the per-frame `FrameContext`
//! - `ScatterRenderer`: built-in orthographic 3D scatter plot

mod scatter;
mod traits;

pub use scatter::{RenderSettings, ScatterRenderer};
pub use traits::{FrameContext, RenderError, Renderer};
