//! Animation module - collecting stills and encoding the looping GIF
//!
//! This module provides:
//! - `FrameSink` trait with `MemorySink` and `ScratchSink`
//! - `ScratchDir` staging with an explicit `GapPolicy`
//! - `encode_gif` for the final file

mod encode;
mod scratch;
mod sink;

pub use encode::encode_gif;
pub use scratch::{GapPolicy, ScratchDir};
pub use sink::{AnimationSummary, FrameSink, MemorySink, ScratchSink};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while assembling the animation
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("scratch directory {path}: {source}")]
    Scratch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read or write still {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to encode animation: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write animation to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no frames to assemble")]
    NoFrames,

    #[error("frame {index} is missing from the scratch directory")]
    MissingFrame { index: usize },

    #[error("expected {expected} staged frames, found {found}")]
    FrameCountMismatch { expected: usize, found: usize },
}

/// Where stills wait between rendering and encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Staging {
    #[default]
    Memory,
    Scratch,
}
