//! Frame sinks - where rendered stills wait until the animation is encoded
//!
//! A sink receives stills strictly in frame order through `append` and turns
//! them into the final file in `finalize`.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::encode::encode_gif;
use super::scratch::{GapPolicy, ScratchDir};
use super::AssemblyError;

/// Result of a successful assembly
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSummary {
    pub frames: usize,
    pub fps: u32,
    pub path: PathBuf,
}

/// Ordered collector of stills
pub trait FrameSink {
    /// Accept the next still in frame order
    fn append(&mut self, still: RgbaImage) -> Result<(), AssemblyError>;

    /// Number of stills appended so far
    fn len(&self) -> usize;

    /// Encode everything appended and release any staging storage
    fn finalize(self: Box<Self>, output: &Path) -> Result<AnimationSummary, AssemblyError>;
}

/// Keeps every still in memory
#[derive(Debug)]
pub struct MemorySink {
    fps: u32,
    stills: Vec<RgbaImage>,
}

impl MemorySink {
    pub fn new(fps: u32) -> Self {
        Self {
            fps,
            stills: Vec::new(),
        }
    }
}

impl FrameSink for MemorySink {
    fn append(&mut self, still: RgbaImage) -> Result<(), AssemblyError> {
        self.stills.push(still);
        Ok(())
    }

    fn len(&self) -> usize {
        self.stills.len()
    }

    fn finalize(self: Box<Self>, output: &Path) -> Result<AnimationSummary, AssemblyError> {
        let fps = self.fps;
        let frames = encode_gif(self.stills, fps, output)?;
        Ok(AnimationSummary {
            frames,
            fps,
            path: output.to_path_buf(),
        })
    }
}

/// Stages stills as numbered PNGs in a scratch directory
///
/// The directory is removed after a successful encode. If the run stops
/// before `finalize`, staged stills stay on disk until the next sink opened
/// on the same directory clears them.
#[derive(Debug)]
pub struct ScratchSink {
    fps: u32,
    scratch: ScratchDir,
    policy: GapPolicy,
    appended: usize,
}

impl ScratchSink {
    pub fn new(
        fps: u32,
        dir: impl Into<PathBuf>,
        policy: GapPolicy,
    ) -> Result<Self, AssemblyError> {
        let scratch = ScratchDir::create(dir)?;
        let stale = scratch.clear()?;
        if stale > 0 {
            log::warn!(
                "Discarded {} stale frame(s) left in {} by an earlier run",
                stale,
                scratch.path().display()
            );
        }

        Ok(Self {
            fps,
            scratch,
            policy,
            appended: 0,
        })
    }
}

impl FrameSink for ScratchSink {
    fn append(&mut self, still: RgbaImage) -> Result<(), AssemblyError> {
        let index = self.appended + 1;
        self.scratch.stage(index, &still)?;
        self.appended = index;
        log::debug!("Staged frame {}", index);
        Ok(())
    }

    fn len(&self) -> usize {
        self.appended
    }

    fn finalize(self: Box<Self>, output: &Path) -> Result<AnimationSummary, AssemblyError> {
        let Self {
            fps,
            scratch,
            policy,
            appended,
        } = *self;

        let stills = scratch.collect(policy)?;
        if policy == GapPolicy::Strict && stills.len() != appended {
            return Err(AssemblyError::FrameCountMismatch {
                expected: appended,
                found: stills.len(),
            });
        }

        let frames = encode_gif(stills, fps, output)?;
        scratch.remove()?;

        Ok(AnimationSummary {
            frames,
            fps,
            path: output.to_path_buf(),
        })
    }
}
