//! Slideshow controller.
//!
//! Orchestrates start, advance, and cancellation of a rotating desktop
//! background. Because the binary is short-lived, the rotation exists only as
//! a persisted state record plus one scheduled trigger that re-invokes the
//! program with the advance command on every tick. The three collaborators
//! (state store, trigger binding, desktop backend) are injected so the
//! controller runs unchanged against in-memory fakes in tests.

use std::fs;
use std::path::{Path, PathBuf};

use natord::compare_ignore_case;

use crate::constants::{MAX_INTERVAL_MINUTES, TRIGGER_NAME};
use crate::desktop::{DesktopBackend, Position};
use crate::error::WallshowError;
use crate::store::{SlideshowState, StateStore};
use crate::trigger::TriggerBinding;

/// Image extensions eligible for a slideshow, matched case-insensitively.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Checks if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Lists the eligible images of a directory in natural order of file name.
///
/// The directory is re-enumerated on every call rather than snapshotted; the
/// stored index is interpreted against whatever this listing currently
/// yields. Natural (human) ordering of the file name, ignoring case, is the
/// documented deterministic order. A missing or unreadable directory lists
/// as empty.
#[must_use]
pub fn list_images(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut images: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    images.sort_by(|a, b| {
        compare_ignore_case(
            a.file_name().unwrap_or_default().to_string_lossy().as_ref(),
            b.file_name().unwrap_or_default().to_string_lossy().as_ref(),
        )
    });
    images
}

/// Drives the slideshow state machine.
pub struct SlideshowController<S, T, D> {
    store: S,
    triggers: T,
    desktop: D,
    /// The command line the scheduled trigger runs on each tick.
    advance_command: Vec<String>,
}

impl<S, T, D> SlideshowController<S, T, D>
where
    S: StateStore,
    T: TriggerBinding,
    D: DesktopBackend,
{
    /// Creates a controller over the given collaborators.
    pub const fn new(store: S, triggers: T, desktop: D, advance_command: Vec<String>) -> Self {
        Self { store, triggers, desktop, advance_command }
    }

    /// Starts a slideshow over `directory`, overwriting any previous one.
    ///
    /// The start index wraps into the current image count and the interval is
    /// clamped into `[1, 44640]` minutes. State is persisted before the
    /// trigger is touched, and the previous trigger is removed before the new
    /// one is installed, so a tick firing during a slow start never observes
    /// partially written state. A directory with zero eligible images clears
    /// the background instead of erroring.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if the directory does not exist, or the store,
    /// scheduler, or desktop error encountered along the way.
    pub fn start(
        &self,
        directory: &Path,
        position: Position,
        interval_minutes: u32,
        start_index: u32,
    ) -> Result<(), WallshowError> {
        let directory = directory
            .canonicalize()
            .map_err(|_| WallshowError::PathNotFound(directory.display().to_string()))?;

        let images = list_images(&directory);
        let count = u32::try_from(images.len()).unwrap_or(u32::MAX);
        let index = if count == 0 { 0 } else { start_index % count };
        let interval = interval_minutes.clamp(1, MAX_INTERVAL_MINUTES);

        self.store.save(&SlideshowState {
            directory: directory.clone(),
            current_index: index,
            interval_minutes: interval,
        })?;

        for trigger in self.triggers.find_all(TRIGGER_NAME)? {
            self.triggers.remove(&trigger)?;
        }
        self.triggers.install(TRIGGER_NAME, &self.advance_command, interval)?;

        match images.get(index as usize) {
            Some(image) => self.desktop.set(image, position, false)?,
            None => self.desktop.clear(),
        }

        tracing::info!(
            directory = %directory.display(),
            index,
            interval,
            images = images.len(),
            "slideshow started"
        );
        Ok(())
    }

    /// Advances the slideshow by one image.
    ///
    /// This is the operation the scheduled trigger invokes on every tick. It
    /// re-enumerates the directory, rotates the index by one with wrap-around,
    /// sets the background preserving whatever position the OS currently
    /// reports, and persists the new index. An emptied folder clears the
    /// background and leaves state untouched; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSlideshow` when no usable state is persisted (absent
    /// record, or the zero-interval sentinel).
    pub fn advance(&self) -> Result<(), WallshowError> {
        let state = self
            .store
            .load()?
            .filter(|state| state.interval_minutes != 0)
            .ok_or(WallshowError::NoActiveSlideshow)?;

        let images = list_images(&state.directory);
        if images.is_empty() {
            tracing::info!(directory = %state.directory.display(), "folder empty, clearing");
            self.desktop.clear();
            return Ok(());
        }

        let count = u32::try_from(images.len()).unwrap_or(u32::MAX);
        let next = (state.current_index.wrapping_add(1)) % count;

        let (_, position) = self.desktop.current()?;
        self.desktop.set(&images[next as usize], position, false)?;
        self.store.save(&SlideshowState { current_index: next, ..state })?;

        tracing::info!(index = next, "slideshow advanced");
        Ok(())
    }

    /// Cancels the slideshow by removing every matching scheduled trigger.
    ///
    /// Returns whether at least one trigger was found and removed. The
    /// persisted state record is deliberately left behind, matching the
    /// behavior this tool reproduces; a later stray advance would resume
    /// rotation against it. Use [`Self::purge_state`] to also drop the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler registry cannot be read or a
    /// trigger cannot be removed.
    pub fn cancel(&self) -> Result<bool, WallshowError> {
        let found = self.triggers.find_all(TRIGGER_NAME)?;
        for trigger in &found {
            self.triggers.remove(trigger)?;
        }

        let cancelled = !found.is_empty();
        tracing::info!(removed = found.len(), "slideshow cancel requested");
        Ok(cancelled)
    }

    /// Deletes the persisted state record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be removed.
    pub fn purge_state(&self) -> Result<(), WallshowError> { self.store.clear() }
}
