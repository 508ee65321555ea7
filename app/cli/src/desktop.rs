//! Desktop background access.
//!
//! Wraps the OS wallpaper API behind the [`DesktopBackend`] trait so the
//! slideshow controller never touches the platform directly and can be
//! exercised against a test double.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::WallshowError;

/// Desktop background sizing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Center the image without scaling.
    Center,
    /// Repeat the image across the desktop.
    Tile,
    /// Stretch to the full desktop, ignoring aspect ratio.
    Stretch,
    /// Scale to fit inside the desktop, preserving aspect ratio.
    Fit,
    /// Scale to cover the desktop, cropping as needed.
    #[default]
    Fill,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Center => "center",
            Self::Tile => "tile",
            Self::Stretch => "stretch",
            Self::Fit => "fit",
            Self::Fill => "fill",
        };
        write!(f, "{name}")
    }
}

impl From<Position> for wallpaper::Mode {
    fn from(position: Position) -> Self {
        match position {
            Position::Center => Self::Center,
            Position::Tile => Self::Tile,
            Position::Stretch => Self::Stretch,
            Position::Fit => Self::Fit,
            // The platform APIs call the cover-and-crop mode "crop".
            Position::Fill => Self::Crop,
        }
    }
}

/// Read/write access to the displayed desktop background.
pub trait DesktopBackend {
    /// Returns the currently displayed background path (if any) and its
    /// sizing position.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to report the background.
    fn current(&self) -> Result<(Option<PathBuf>, Position), WallshowError>;

    /// Sets the displayed background.
    ///
    /// With `make_copy` the image is first copied into the application data
    /// directory and the copy is displayed; otherwise the original file is
    /// referenced in place.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if the image does not exist and `Os` if the
    /// platform rejects it.
    fn set(&self, path: &Path, position: Position, make_copy: bool) -> Result<(), WallshowError>;

    /// Clears the displayed background to a blank state.
    ///
    /// Never fails: this backs the defined empty-folder behavior of the
    /// slideshow, which must not raise.
    fn clear(&self);
}

/// Real backend speaking to the OS through the `wallpaper` crate.
pub struct SystemDesktop {
    data_dir: PathBuf,
}

impl SystemDesktop {
    /// Creates a backend rooted at the default application data directory.
    #[must_use]
    pub fn new() -> Self { Self { data_dir: crate::paths::data_dir() } }

    /// Creates a backend rooted at a custom data directory.
    #[must_use]
    pub const fn with_data_dir(data_dir: PathBuf) -> Self { Self { data_dir } }

    /// Sidecar file mirroring the active position.
    ///
    /// Not every platform exposes a sizing-mode query, so the last position
    /// written through this backend is recorded here and read back by
    /// `current()`.
    fn position_file(&self) -> PathBuf { self.data_dir.join("position.json") }

    fn read_position(&self) -> Position {
        fs::read_to_string(self.position_file())
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write_position(&self, position: Position) -> Result<(), WallshowError> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.position_file(), serde_json::to_string(&position)?)?;
        Ok(())
    }

    /// Copies the image into the data directory, returning the copy's path.
    fn copy_into_data_dir(&self, source: &Path) -> Result<PathBuf, WallshowError> {
        fs::create_dir_all(&self.data_dir)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| WallshowError::PathNotFound(source.display().to_string()))?;
        let target = self.data_dir.join(file_name);
        fs::copy(source, &target)?;
        Ok(target)
    }
}

impl Default for SystemDesktop {
    fn default() -> Self { Self::new() }
}

impl DesktopBackend for SystemDesktop {
    fn current(&self) -> Result<(Option<PathBuf>, Position), WallshowError> {
        let path = match wallpaper::get() {
            Ok(raw) if raw.is_empty() => None,
            Ok(raw) => Some(PathBuf::from(raw)),
            Err(err) => return Err(WallshowError::Os(err.to_string())),
        };
        Ok((path, self.read_position()))
    }

    fn set(&self, path: &Path, position: Position, make_copy: bool) -> Result<(), WallshowError> {
        if !path.exists() {
            return Err(WallshowError::PathNotFound(path.display().to_string()));
        }

        let target = if make_copy { self.copy_into_data_dir(path)? } else { path.to_path_buf() };

        wallpaper::set_from_path(&target.display().to_string())
            .map_err(|err| WallshowError::Os(err.to_string()))?;
        wallpaper::set_mode(position.into()).map_err(|err| WallshowError::Os(err.to_string()))?;

        self.write_position(position)?;
        tracing::debug!(path = %target.display(), %position, "background set");
        Ok(())
    }

    fn clear(&self) {
        // Blanking is best-effort: not every desktop environment accepts an
        // empty background, and the empty-folder flow must not raise.
        if let Err(err) = wallpaper::set_from_path("") {
            tracing::debug!(error = %err, "could not blank the background");
        }
    }
}
