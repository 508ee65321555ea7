//! Well-known filesystem locations.
//!
//! Provides a centralized way to resolve the directories Wallshow writes to.
//! Uses the platform config/data directories via `dirs`, with a fallback to
//! `/tmp/wallshow/` if they are unavailable.

use std::path::PathBuf;

use crate::constants::APP_NAME;

/// Returns the Wallshow configuration directory.
///
/// `~/.config/wallshow` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_NAME}")),
        |dir| dir.join(APP_NAME),
    )
}

/// Returns the Wallshow data directory.
///
/// Holds the login background and wallpaper copies made on behalf of the
/// `set` command.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(format!("/tmp/{APP_NAME}")),
        |dir| dir.join(APP_NAME),
    )
}

/// Returns the path of the persisted slideshow state record.
#[must_use]
pub fn slideshow_state_file() -> PathBuf { config_dir().join("slideshow.json") }

/// Returns the user-level systemd unit directory where scheduled triggers
/// are registered.
#[must_use]
pub fn systemd_user_unit_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from("/tmp/systemd-user"),
        |dir| dir.join("systemd").join("user"),
    )
}
