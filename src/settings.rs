use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{GapPolicy, Staging};
use crate::render::RenderSettings;
use crate::schedule::{ScheduleError, TargetAngles, Timing};
use crate::shapes::{Pivot, ShapeError, SolidSpec};

/// Default animation file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "rotation.gif";

/// Default scratch directory for staged stills
pub const DEFAULT_SCRATCH_DIR: &str = ".pointspin-frames";

/// Returns the path to the settings file: `~/.config/pointspin/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pointspin");
    path.push("settings.json");
    path
}

/// Errors from loading, saving or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown {what} '{value}'")]
    UnknownSelector { what: &'static str, value: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Which kind of output a run produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Looping GIF written to `output`
    #[default]
    Animation,
    /// Reserved for a live viewer; currently does nothing
    Interactive,
}

impl FromStr for OutputKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "animation" | "gif" => Ok(OutputKind::Animation),
            "interactive" => Ok(OutputKind::Interactive),
            _ => Err(SettingsError::UnknownSelector {
                what: "output kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Animation => write!(f, "animation"),
            OutputKind::Interactive => write!(f, "interactive"),
        }
    }
}

/// Everything one run needs.
///
/// Serialized as JSON. Fields use `#[serde(default)]` so that a partial file
/// only overrides what it names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    // Shape
    pub solid: SolidSpec,
    pub points: usize,
    pub pivot: Pivot,

    // Motion
    pub target: TargetAngles,
    pub timing: Timing,

    // Output
    pub output: PathBuf,
    pub kind: OutputKind,
    pub staging: Staging,
    pub scratch_dir: PathBuf,
    pub gap_policy: GapPolicy,

    // Display
    pub render: RenderSettings,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            solid: SolidSpec::default(),
            points: 1000,
            pivot: Pivot::AutoCenter,

            target: TargetAngles::new(0.0, 0.0, 360.0),
            timing: Timing::default(),

            output: PathBuf::from(DEFAULT_OUTPUT),
            kind: OutputKind::Animation,
            staging: Staging::Memory,
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            gap_policy: GapPolicy::Strict,

            render: RenderSettings::default(),
        }
    }
}

impl RunSettings {
    /// Load settings from the default location, falling back to defaults on
    /// any error.
    pub fn load_or_default() -> Self {
        let path = settings_path();
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Read { source, .. }) => {
                log::info!("No settings file found ({}), using defaults", source);
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to a file as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Reject settings that cannot produce a run, before any work starts
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.solid.validate()?;
        if self.points == 0 {
            return Err(ShapeError::EmptyBudget.into());
        }
        self.timing.frame_count(&self.target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::FrameCount;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RunSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.output, PathBuf::from("rotation.gif"));
        assert_eq!(settings.gap_policy, GapPolicy::Strict);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let json = r#"{
            "solid": { "kind": "tetrahedron", "side": 3.0 },
            "timing": { "fps": 12 }
        }"#;
        let settings: RunSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.solid, SolidSpec::Tetrahedron { side: 3.0 });
        assert_eq!(settings.timing.fps, 12);
        assert_eq!(settings.timing.frames, FrameCount::Auto);
        assert_eq!(settings.points, 1000);
        assert_eq!(settings.render, RenderSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("settings.json");

        let mut settings = RunSettings::default();
        settings.pivot = Pivot::explicit(1.0, 0.0, -1.0);
        settings.timing.frames = FrameCount::Timed { duration_secs: 2.5 };
        settings.staging = Staging::Scratch;
        settings.save_to(&path).unwrap();

        assert_eq!(RunSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.json");
        assert!(matches!(
            RunSettings::load_from(&missing),
            Err(SettingsError::Read { .. })
        ));

        let broken = tmp.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            RunSettings::load_from(&broken),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_fps() {
        let mut settings = RunSettings::default();
        settings.timing.fps = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Schedule(ScheduleError::InvalidFps(0)))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_shape() {
        let mut settings = RunSettings::default();
        settings.solid = SolidSpec::Sphere { radius: 0.0 };
        assert!(matches!(settings.validate(), Err(SettingsError::Shape(_))));

        let mut settings = RunSettings::default();
        settings.points = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Shape(ShapeError::EmptyBudget))
        ));
    }

    #[test]
    fn test_output_kind_parse() {
        assert_eq!("animation".parse::<OutputKind>().unwrap(), OutputKind::Animation);
        assert_eq!("Interactive".parse::<OutputKind>().unwrap(), OutputKind::Interactive);
        assert!("video".parse::<OutputKind>().is_err());
    }
}
