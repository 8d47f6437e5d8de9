//! pointspin - render a rotating point cloud of a solid as a looping GIF
//!
//! Settings come from `~/.config/pointspin/settings.json` (or `--config`),
//! and command-line flags override them.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use pointspin::animation::{GapPolicy, Staging};
use pointspin::pipeline::{self, PipelineError};
use pointspin::render::ScatterRenderer;
use pointspin::schedule::FrameCount;
use pointspin::settings::{OutputKind, RunSettings};
use pointspin::shapes::{Pivot, SolidSpec};

#[derive(Parser, Debug)]
#[command(name = "pointspin", version, about = "Animate a rotating point cloud of a solid")]
struct Cli {
    #[command(subcommand)]
    shape: Option<ShapeCommand>,

    /// Approximate number of points to sample
    #[arg(short = 'n', long, global = true)]
    points: Option<usize>,

    /// Anchor position: 'auto' or 'x,y,z'
    #[arg(long, allow_hyphen_values = true, global = true)]
    pivot: Option<Pivot>,

    /// Total pitch over the animation, degrees
    #[arg(long, allow_hyphen_values = true, global = true)]
    pitch: Option<f64>,

    /// Total roll over the animation, degrees
    #[arg(long, allow_hyphen_values = true, global = true)]
    roll: Option<f64>,

    /// Total yaw over the animation, degrees
    #[arg(long, allow_hyphen_values = true, global = true)]
    yaw: Option<f64>,

    /// Render exactly this many frames
    #[arg(long, conflicts_with = "duration", global = true)]
    frames: Option<usize>,

    /// Playback length in seconds; frames = duration × fps
    #[arg(long, global = true)]
    duration: Option<f64>,

    /// Frames per second (1-50)
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// Output file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output kind: animation or interactive (reserved)
    #[arg(long, global = true)]
    kind: Option<OutputKind>,

    /// Where to hold stills before encoding
    #[arg(long, value_enum, global = true)]
    staging: Option<StagingArg>,

    /// Scratch directory used with --staging scratch
    #[arg(long, global = true)]
    scratch_dir: Option<PathBuf>,

    /// Keep the frames before a missing staged still instead of failing
    #[arg(long, global = true)]
    best_effort: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the effective settings to this file before running
    #[arg(long, global = true)]
    save_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ShapeCommand {
    /// Rectangular prism
    Prism { length: f64, width: f64, height: f64 },
    /// Sphere
    Sphere { radius: f64 },
    /// Tetrahedron
    Tetrahedron { side: f64 },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StagingArg {
    Memory,
    Scratch,
}

impl Cli {
    /// Override `settings` with every flag that was given
    fn apply(&self, settings: &mut RunSettings) {
        if let Some(shape) = &self.shape {
            settings.solid = match *shape {
                ShapeCommand::Prism {
                    length,
                    width,
                    height,
                } => SolidSpec::Prism {
                    length,
                    width,
                    height,
                },
                ShapeCommand::Sphere { radius } => SolidSpec::Sphere { radius },
                ShapeCommand::Tetrahedron { side } => SolidSpec::Tetrahedron { side },
            };
        }

        if let Some(points) = self.points {
            settings.points = points;
        }
        if let Some(pivot) = self.pivot {
            settings.pivot = pivot;
        }

        if let Some(pitch) = self.pitch {
            settings.target.pitch = pitch;
        }
        if let Some(roll) = self.roll {
            settings.target.roll = roll;
        }
        if let Some(yaw) = self.yaw {
            settings.target.yaw = yaw;
        }

        if let Some(fps) = self.fps {
            settings.timing.fps = fps;
        }
        if let Some(frames) = self.frames {
            settings.timing.frames = FrameCount::Explicit { frames };
        } else if let Some(duration_secs) = self.duration {
            settings.timing.frames = FrameCount::Timed { duration_secs };
        }

        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(kind) = self.kind {
            settings.kind = kind;
        }
        if let Some(staging) = self.staging {
            settings.staging = match staging {
                StagingArg::Memory => Staging::Memory,
                StagingArg::Scratch => Staging::Scratch,
            };
        }
        if let Some(dir) = &self.scratch_dir {
            settings.scratch_dir = dir.clone();
        }
        if self.best_effort {
            settings.gap_policy = GapPolicy::BestEffortPrefix;
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let mut settings = match &cli.config {
        Some(path) => RunSettings::load_from(path)?,
        None => RunSettings::load_or_default(),
    };
    cli.apply(&mut settings);

    if let Some(path) = &cli.save_config {
        settings.save_to(path)?;
    }

    let renderer = ScatterRenderer::new(settings.render.clone());
    if let Some(summary) = pipeline::run(&settings, &renderer)? {
        log::info!(
            "Saved {} ({} frames at {} fps)",
            summary.path.display(),
            summary.frames,
            summary.fps
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting pointspin");

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pointspin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = parse(&[
            "--pivot", "1,-2,0", "--yaw", "-180", "--fps", "10", "--duration", "2",
            "--staging", "scratch", "--best-effort", "sphere", "1.5",
        ]);
        let mut settings = RunSettings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.solid, SolidSpec::Sphere { radius: 1.5 });
        assert_eq!(settings.pivot, Pivot::explicit(1.0, -2.0, 0.0));
        assert_eq!(settings.target.yaw, -180.0);
        assert_eq!(settings.timing.fps, 10);
        assert_eq!(settings.timing.frames, FrameCount::Timed { duration_secs: 2.0 });
        assert_eq!(settings.staging, Staging::Scratch);
        assert_eq!(settings.gap_policy, GapPolicy::BestEffortPrefix);
    }

    #[test]
    fn test_flags_after_the_shape() {
        let cli = parse(&["sphere", "1.5", "--fps", "10", "-n", "500", "--yaw", "-90"]);
        let mut settings = RunSettings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.solid, SolidSpec::Sphere { radius: 1.5 });
        assert_eq!(settings.timing.fps, 10);
        assert_eq!(settings.points, 500);
        assert_eq!(settings.target.yaw, -90.0);
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let cli = parse(&[]);
        let mut settings = RunSettings::default();
        cli.apply(&mut settings);
        assert_eq!(settings, RunSettings::default());
    }

    #[test]
    fn test_rejects_malformed_input() {
        let bad = [
            vec!["--pivot", "1,2"],
            vec!["--kind", "video"],
            vec!["--frames", "3", "--duration", "2"],
            vec!["prism", "1", "2"],
        ];
        for args in bad {
            let argv = std::iter::once("pointspin").chain(args.iter().copied());
            assert!(Cli::try_parse_from(argv).is_err(), "{:?}", args);
        }
    }
}
