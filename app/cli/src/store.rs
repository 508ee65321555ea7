//! Durable slideshow state.
//!
//! The slideshow survives across process invocations as a single persisted
//! record. The [`StateStore`] trait keeps the controller independent of the
//! storage location so tests can run against an in-memory fake.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::WallshowError;

/// The durable record describing an active slideshow.
///
/// `current_index` is meaningful only relative to the current enumeration of
/// `directory`: the image set is re-listed on every tick rather than
/// snapshotted, so files added or removed between ticks shift which image is
/// next. That is an accepted trade-off of the design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideshowState {
    /// Absolute path of the folder of candidate images.
    pub directory: PathBuf,
    /// Offset into the folder's image listing.
    pub current_index: u32,
    /// Minutes between rotations. Zero never appears in a valid record; it
    /// doubles as the no-active-slideshow sentinel.
    pub interval_minutes: u32,
}

/// Persistence for the slideshow state record.
pub trait StateStore {
    /// Loads the persisted state, or `None` if none has been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<SlideshowState>, WallshowError>;

    /// Persists the state, overwriting any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, state: &SlideshowState) -> Result<(), WallshowError>;

    /// Deletes the persisted record. Removing an absent record is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be removed.
    fn clear(&self) -> Result<(), WallshowError>;
}

/// File-backed store keeping the record as pretty-printed JSON.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store at the default location in the config directory.
    #[must_use]
    pub fn new() -> Self { Self { path: crate::paths::slideshow_state_file() } }

    /// Creates a store backed by a specific file.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self { Self { path } }
}

impl Default for JsonStateStore {
    fn default() -> Self { Self::new() }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<Option<SlideshowState>, WallshowError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, state: &SlideshowState) -> Result<(), WallshowError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        tracing::debug!(path = %self.path.display(), index = state.current_index, "state saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), WallshowError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
