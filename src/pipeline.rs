//! The run: sample once, then rotate, render and collect every frame in order
//!
//! Everything here is sequential. Each frame is rotated from the original
//! cloud, rendered, and handed to the sink before the next frame starts.

use thiserror::Error;

use crate::animation::{AnimationSummary, AssemblyError, FrameSink, MemorySink, ScratchSink, Staging};
use crate::render::{FrameContext, RenderError, Renderer};
use crate::schedule::{schedule, ScheduleError};
use crate::settings::{OutputKind, RunSettings, SettingsError};
use crate::shapes::{sample_solid, ShapeError};

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("cannot sample shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("cannot schedule frames: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("failed to render frame {index}: {source}")]
    Render { index: usize, source: RenderError },

    #[error("failed to assemble animation: {0}")]
    Assembly(#[from] AssemblyError),
}

/// Pick the sink the settings ask for
pub fn open_sink(settings: &RunSettings, fps: u32) -> Result<Box<dyn FrameSink>, AssemblyError> {
    Ok(match settings.staging {
        Staging::Memory => Box::new(MemorySink::new(fps)),
        Staging::Scratch => Box::new(ScratchSink::new(
            fps,
            settings.scratch_dir.clone(),
            settings.gap_policy,
        )?),
    })
}

/// Execute one run.
///
/// Returns `None` when the selected output kind does no work.
pub fn run(
    settings: &RunSettings,
    renderer: &dyn Renderer,
) -> Result<Option<AnimationSummary>, PipelineError> {
    settings.validate()?;

    if settings.kind == OutputKind::Interactive {
        log::warn!("Interactive output is not implemented yet, nothing to do");
        return Ok(None);
    }

    let cloud = sample_solid(&settings.solid, settings.points, settings.pivot)?;

    let fps = settings.timing.validate_fps()?;
    let total = settings.timing.frame_count(&settings.target)?;
    let angles = schedule(&settings.target, total)?;
    log::info!("Rendering {} frames at {} fps", total, fps);

    let mut sink = open_sink(settings, fps)?;
    for (i, rotation) in angles.into_iter().enumerate() {
        let ctx = FrameContext {
            index: i + 1,
            total,
            lim: cloud.lim(),
            rotation,
        };

        let points = cloud.rotated(&rotation);
        let still = renderer
            .render(&points, &ctx)
            .map_err(|source| PipelineError::Render {
                index: ctx.index,
                source,
            })?;
        sink.append(still)?;
        log::debug!("Frame {}/{} done", ctx.index, total);
    }

    log::debug!("Collected {} stills, encoding {}", sink.len(), settings.output.display());
    let summary = sink.finalize(&settings.output)?;
    Ok(Some(summary))
}
