//! Effects module - geometric transforms applied to sampled points
//!
//! This module provides:
//! - `Rotation`: yaw/pitch/roll combined into a single matrix
//! - `rotate`: free-function form for one-off points

mod transform;

pub use transform::{rotate, Rotation};
