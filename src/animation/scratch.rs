//! Scratch directory for staging stills on disk
//!
//! Stills are written as `frame_<i>.png` with a 1-based index and read back
//! by probing `frame_1.png`, `frame_2.png`, ... until one is missing.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::AssemblyError;

const FRAME_PREFIX: &str = "frame_";
const FRAME_EXTENSION: &str = "png";

/// What to do when probing finds a hole in the staged indices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Any missing index is an error
    #[default]
    Strict,
    /// Keep the contiguous prefix before the first hole and drop the rest.
    ///
    /// This silently shortens the animation. It exists for compatibility with
    /// partially staged runs, not as a recommended mode.
    BestEffortPrefix,
}

/// A directory holding staged stills
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Open the directory, creating it if absent. An existing directory is
    /// reused, including any stills already staged in it.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, AssemblyError> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| AssemblyError::Scratch {
            path: path.clone(),
            source,
        })?;
        log::debug!("Using scratch directory {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for the still at a 1-based `index`
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.path
            .join(format!("{FRAME_PREFIX}{index}.{FRAME_EXTENSION}"))
    }

    /// Write one still
    pub fn stage(&self, index: usize, still: &RgbaImage) -> Result<(), AssemblyError> {
        let path = self.frame_path(index);
        still
            .save(&path)
            .map_err(|source| AssemblyError::Image { path, source })
    }

    /// Every staged index present on disk, sorted
    pub fn staged_indices(&self) -> Result<Vec<usize>, AssemblyError> {
        let entries = fs::read_dir(&self.path).map_err(|source| AssemblyError::Scratch {
            path: self.path.clone(),
            source,
        })?;

        let mut indices: Vec<usize> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_frame_name(&entry.file_name().to_string_lossy()))
            .collect();
        indices.sort_unstable();
        Ok(indices)
    }

    /// Read stills back in index order, starting at 1.
    ///
    /// Probing stops at the first missing index. Under `Strict` that is an
    /// error whenever a later index exists; under `BestEffortPrefix` the
    /// later stills are ignored.
    pub fn collect(&self, policy: GapPolicy) -> Result<Vec<RgbaImage>, AssemblyError> {
        let mut stills = Vec::new();
        let mut index = 1;
        loop {
            let path = self.frame_path(index);
            if !path.is_file() {
                break;
            }
            let still = image::open(&path)
                .map_err(|source| AssemblyError::Image { path, source })?
                .to_rgba8();
            stills.push(still);
            index += 1;
        }

        let stranded = self
            .staged_indices()?
            .into_iter()
            .filter(|&i| i > index)
            .count();

        if stranded > 0 {
            match policy {
                GapPolicy::Strict => return Err(AssemblyError::MissingFrame { index }),
                GapPolicy::BestEffortPrefix => log::warn!(
                    "Frame {} is missing; dropping {} later frame(s) and keeping the first {}",
                    index,
                    stranded,
                    stills.len()
                ),
            }
        }

        Ok(stills)
    }

    /// Delete every staged still and return how many there were.
    ///
    /// Files that are not staged stills are left alone.
    pub fn clear(&self) -> Result<usize, AssemblyError> {
        let indices = self.staged_indices()?;
        for &index in &indices {
            let path = self.frame_path(index);
            fs::remove_file(&path).map_err(|source| AssemblyError::Scratch { path, source })?;
        }
        Ok(indices.len())
    }

    /// Delete every staged still, then the directory itself.
    ///
    /// A directory that still holds other files is left in place.
    pub fn remove(self) -> Result<(), AssemblyError> {
        self.clear()?;

        match fs::remove_dir(&self.path) {
            Ok(()) => {
                log::debug!("Removed scratch directory {}", self.path.display());
                Ok(())
            }
            Err(e) if self.path.read_dir().map(|mut d| d.next().is_some()).unwrap_or(false) => {
                log::warn!(
                    "Leaving scratch directory {} in place, it holds other files ({})",
                    self.path.display(),
                    e
                );
                Ok(())
            }
            Err(source) => Err(AssemblyError::Scratch {
                path: self.path,
                source,
            }),
        }
    }
}

fn parse_frame_name(name: &str) -> Option<usize> {
    name.strip_prefix(FRAME_PREFIX)?
        .strip_suffix(FRAME_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}
