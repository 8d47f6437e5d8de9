//! Frame scheduling - how many frames, and at which angles
//!
//! The angle sequence is a linear ramp from the zero orientation to the
//! target, endpoints inclusive. Frame count comes from one of three policies,
//! all equally valid configuration choices.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::effects::Rotation;

/// Slowest and fastest supported frame rates (GIF delays are centiseconds)
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 50;

/// Rotation covered by one frame under the automatic policy
pub const DEGREES_PER_FRAME: f64 = 6.0;

/// Upper bound on frames in one animation, ten full turns at the automatic rate
pub const MAX_FRAMES: usize = 3600;

/// Errors that can occur while planning frames
#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("fps must be between 1 and 50, got {0}")]
    InvalidFps(u32),

    #[error("frame count must be at least 1")]
    NoFrames,

    #[error("{requested} frames requested, at most 3600 are supported")]
    TooManyFrames { requested: f64 },

    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("target angle {axis} is not a finite number")]
    NonFiniteAngle { axis: &'static str },
}

/// Total rotation over the whole animation, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetAngles {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl TargetAngles {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        for (axis, value) in [("pitch", self.pitch), ("roll", self.roll), ("yaw", self.yaw)] {
            if !value.is_finite() {
                return Err(ScheduleError::NonFiniteAngle { axis });
            }
        }
        Ok(())
    }

    /// Largest absolute angle across the three axes
    pub fn max_abs(&self) -> f64 {
        self.pitch.abs().max(self.roll.abs()).max(self.yaw.abs())
    }

    fn to_rotation(self) -> Rotation {
        Rotation::from_degrees(self.yaw, self.pitch, self.roll)
    }
}

/// How the number of frames is chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FrameCount {
    /// One frame per six degrees of the largest target angle
    #[default]
    Auto,
    /// Exactly this many frames
    Explicit { frames: usize },
    /// `duration × fps` frames, so playback takes the requested time
    Timed { duration_secs: f64 },
}

/// Frame rate plus frame-count policy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub fps: u32,
    pub frames: FrameCount,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fps: 20,
            frames: FrameCount::Auto,
        }
    }
}

impl Timing {
    /// Check that the frame rate is within range
    pub fn validate_fps(&self) -> Result<u32, ScheduleError> {
        if (MIN_FPS..=MAX_FPS).contains(&self.fps) {
            Ok(self.fps)
        } else {
            Err(ScheduleError::InvalidFps(self.fps))
        }
    }

    /// Resolve the policy into a concrete frame count
    pub fn frame_count(&self, target: &TargetAngles) -> Result<usize, ScheduleError> {
        let fps = self.validate_fps()?;
        target.validate()?;

        // Counted in f64 so huge requests are caught before any cast
        let count = match self.frames {
            FrameCount::Auto => (target.max_abs() / DEGREES_PER_FRAME).round().max(1.0),
            FrameCount::Explicit { frames } => frames as f64,
            FrameCount::Timed { duration_secs } => {
                if !(duration_secs.is_finite() && duration_secs > 0.0) {
                    return Err(ScheduleError::InvalidDuration(duration_secs));
                }
                (duration_secs * fps as f64).round().max(1.0)
            }
        };

        check_frames(count)?;
        Ok(count as usize)
    }
}

fn check_frames(count: f64) -> Result<(), ScheduleError> {
    if count < 1.0 {
        Err(ScheduleError::NoFrames)
    } else if count > MAX_FRAMES as f64 {
        Err(ScheduleError::TooManyFrames { requested: count })
    } else {
        Ok(())
    }
}

/// Angles for each of `frames` frames, ramping from zero to `target`
pub fn schedule(target: &TargetAngles, frames: usize) -> Result<Vec<Rotation>, ScheduleError> {
    target.validate()?;
    check_frames(frames as f64)?;

    if frames == 1 {
        return Ok(vec![Rotation::identity()]);
    }

    let full = target.to_rotation();
    let last = (frames - 1) as f64;
    Ok((0..frames)
        .map(|i| {
            let t = i as f64 / last;
            Rotation::new(full.yaw * t, full.pitch * t, full.roll * t)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame_is_identity() {
        let target = TargetAngles::new(90.0, 45.0, 360.0);
        assert_eq!(schedule(&target, 1).unwrap(), vec![Rotation::identity()]);
    }

    #[test]
    fn test_ramp_is_uniform_and_inclusive() {
        let target = TargetAngles::new(30.0, -60.0, 360.0);
        let angles = schedule(&target, 7).unwrap();

        assert_eq!(angles.len(), 7);
        assert_eq!(angles[0], Rotation::identity());

        let full = Rotation::from_degrees(360.0, 30.0, -60.0);
        let last = angles[6];
        assert!((last.yaw - full.yaw).abs() < 1e-12);
        assert!((last.pitch - full.pitch).abs() < 1e-12);
        assert!((last.roll - full.roll).abs() < 1e-12);

        for pair in angles.windows(2) {
            assert!((pair[1].yaw - pair[0].yaw - full.yaw / 6.0).abs() < 1e-12);
            assert!((pair[1].pitch - pair[0].pitch - full.pitch / 6.0).abs() < 1e-12);
            assert!((pair[1].roll - pair[0].roll - full.roll / 6.0).abs() < 1e-12);
            // Monotonic in the direction of the target
            assert!(pair[1].yaw > pair[0].yaw);
            assert!(pair[1].roll < pair[0].roll);
        }
    }

    #[test]
    fn test_zero_frames_rejected() {
        assert_eq!(
            schedule(&TargetAngles::default(), 0),
            Err(ScheduleError::NoFrames)
        );
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let target = TargetAngles::new(f64::NAN, 0.0, 0.0);
        assert_eq!(
            schedule(&target, 3),
            Err(ScheduleError::NonFiniteAngle { axis: "pitch" })
        );
    }

    #[test]
    fn test_auto_frame_count() {
        let timing = Timing { fps: 20, frames: FrameCount::Auto };
        assert_eq!(timing.frame_count(&TargetAngles::new(0.0, 0.0, 360.0)), Ok(60));
        assert_eq!(timing.frame_count(&TargetAngles::new(-90.0, 30.0, 0.0)), Ok(15));
        // No rotation still renders one frame
        assert_eq!(timing.frame_count(&TargetAngles::default()), Ok(1));
    }

    #[test]
    fn test_timed_frame_count() {
        let timing = Timing {
            fps: 5,
            frames: FrameCount::Timed { duration_secs: 3.0 },
        };
        assert_eq!(timing.frame_count(&TargetAngles::default()), Ok(15));

        let short = Timing {
            fps: 5,
            frames: FrameCount::Timed { duration_secs: 0.01 },
        };
        assert_eq!(short.frame_count(&TargetAngles::default()), Ok(1));

        let timing = Timing {
            fps: 5,
            frames: FrameCount::Timed { duration_secs: -1.0 },
        };
        assert_eq!(
            timing.frame_count(&TargetAngles::default()),
            Err(ScheduleError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn test_explicit_frame_count() {
        let timing = Timing {
            fps: 10,
            frames: FrameCount::Explicit { frames: 12 },
        };
        assert_eq!(timing.frame_count(&TargetAngles::default()), Ok(12));

        let timing = Timing {
            fps: 10,
            frames: FrameCount::Explicit { frames: 0 },
        };
        assert_eq!(
            timing.frame_count(&TargetAngles::default()),
            Err(ScheduleError::NoFrames)
        );
    }

    #[test]
    fn test_frame_count_upper_bound() {
        let auto = Timing { fps: 20, frames: FrameCount::Auto };
        assert_eq!(
            auto.frame_count(&TargetAngles::new(0.0, 0.0, 1e20)),
            Err(ScheduleError::TooManyFrames { requested: (1e20_f64 / 6.0).round() })
        );
        // Ten full turns is the largest accepted request
        assert_eq!(auto.frame_count(&TargetAngles::new(0.0, 0.0, 3600.0 * 6.0)), Ok(MAX_FRAMES));

        let explicit = Timing {
            fps: 20,
            frames: FrameCount::Explicit { frames: usize::MAX },
        };
        assert!(matches!(
            explicit.frame_count(&TargetAngles::default()),
            Err(ScheduleError::TooManyFrames { .. })
        ));

        let timed = Timing {
            fps: 50,
            frames: FrameCount::Timed { duration_secs: 1e9 },
        };
        assert!(matches!(
            timed.frame_count(&TargetAngles::default()),
            Err(ScheduleError::TooManyFrames { .. })
        ));

        assert!(matches!(
            schedule(&TargetAngles::default(), MAX_FRAMES + 1),
            Err(ScheduleError::TooManyFrames { .. })
        ));
    }

    #[test]
    fn test_fps_range() {
        for fps in [0, 51, 1000] {
            let timing = Timing { fps, frames: FrameCount::Auto };
            assert_eq!(timing.validate_fps(), Err(ScheduleError::InvalidFps(fps)));
        }
        let timing = Timing { fps: 50, frames: FrameCount::Auto };
        assert_eq!(timing.validate_fps(), Ok(50));
    }
}
