//! Application-wide constants.

/// Directory name used under the user's config and data directories.
pub const APP_NAME: &str = "wallshow";

/// Reserved name for the slideshow's scheduled trigger.
///
/// At most one trigger with this name should exist at a time; the slideshow
/// controller removes all matches before installing a new one.
pub const TRIGGER_NAME: &str = "wallshow-slideshow";

/// Upper bound for the slideshow interval, in minutes (31 days).
pub const MAX_INTERVAL_MINUTES: u32 = 44_640;

/// Maximum size accepted for a login background image, in bytes.
pub const MAX_LOGIN_IMAGE_BYTES: u64 = 256 * 1024;
