//! Login background management.
//!
//! A separate image shown on the login screen, independent of the slideshow.
//! The image is size- and format-constrained: JPEG or PNG, at most 256 KiB.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::constants::MAX_LOGIN_IMAGE_BYTES;
use crate::error::WallshowError;

/// File stem under which the login background is installed.
const LOGIN_FILE_STEM: &str = "login";

/// Validates and installs `path` as the login background.
///
/// The image is copied into `data_dir` as `login.jpg` or `login.png`,
/// replacing any previously installed one. Returns the installed path.
///
/// # Errors
///
/// Returns `PathNotFound` if the file does not exist, and `InvalidArgument`
/// when it exceeds 256 KiB or is not a JPEG or PNG.
pub fn set_login_background(path: &Path, data_dir: &Path) -> Result<PathBuf, WallshowError> {
    if !path.is_file() {
        return Err(WallshowError::PathNotFound(path.display().to_string()));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_LOGIN_IMAGE_BYTES {
        return Err(WallshowError::InvalidArgument(format!(
            "login background must be at most {} KiB, got {} KiB",
            MAX_LOGIN_IMAGE_BYTES / 1024,
            size.div_ceil(1024)
        )));
    }

    let bytes = fs::read(path)?;
    let extension = match image::guess_format(&bytes) {
        Ok(ImageFormat::Jpeg) => "jpg",
        Ok(ImageFormat::Png) => "png",
        Ok(other) => {
            return Err(WallshowError::InvalidArgument(format!(
                "login background must be JPEG or PNG, got {}",
                other.extensions_str().first().copied().unwrap_or("unknown")
            )));
        }
        Err(_) => {
            return Err(WallshowError::InvalidArgument(
                "login background is not a recognized image".to_string(),
            ));
        }
    };

    fs::create_dir_all(data_dir)?;
    for stale in ["jpg", "png"] {
        let previous = data_dir.join(format!("{LOGIN_FILE_STEM}.{stale}"));
        if previous.exists() {
            fs::remove_file(previous)?;
        }
    }

    let target = data_dir.join(format!("{LOGIN_FILE_STEM}.{extension}"));
    fs::write(&target, bytes)?;
    tracing::info!(path = %target.display(), "login background installed");
    Ok(target)
}

/// Returns the installed login background, if any.
#[must_use]
pub fn login_background(data_dir: &Path) -> Option<PathBuf> {
    ["jpg", "png"]
        .iter()
        .map(|ext| data_dir.join(format!("{LOGIN_FILE_STEM}.{ext}")))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG file: signature plus empty chunks, enough for format
    /// detection.
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = set_login_background(Path::new("/no/such/image.png"), dir.path());
        assert!(matches!(result, Err(WallshowError::PathNotFound(_))));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("big.png");
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(300 * 1024, 0);
        fs::write(&source, bytes).unwrap();

        let result = set_login_background(&source, dir.path());
        assert!(matches!(result, Err(WallshowError::InvalidArgument(_))));
    }

    #[test]
    fn test_non_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("note.png");
        fs::write(&source, b"plain text, not an image").unwrap();

        let result = set_login_background(&source, dir.path());
        assert!(matches!(result, Err(WallshowError::InvalidArgument(_))));
    }

    #[test]
    fn test_png_installs_as_login_png() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let source = dir.path().join("photo.weird-ext");
        fs::write(&source, PNG_MAGIC).unwrap();

        let installed = set_login_background(&source, &data_dir).unwrap();
        assert_eq!(installed.file_name().unwrap(), "login.png");
        assert_eq!(login_background(&data_dir), Some(installed));
    }

    #[test]
    fn test_replacing_login_background_drops_previous_format() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let png = dir.path().join("a.png");
        fs::write(&png, PNG_MAGIC).unwrap();
        set_login_background(&png, &data_dir).unwrap();

        let jpeg = dir.path().join("b.jpg");
        fs::write(&jpeg, JPEG_MAGIC).unwrap();
        let installed = set_login_background(&jpeg, &data_dir).unwrap();

        assert_eq!(installed.file_name().unwrap(), "login.jpg");
        assert!(!data_dir.join("login.png").exists());
        assert_eq!(login_background(&data_dir), Some(installed));
    }

    #[test]
    fn test_login_background_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(login_background(dir.path()).is_none());
    }
}
