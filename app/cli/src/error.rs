//! Error types for Wallshow.
//!
//! Every error raised in the core propagates unchanged to the top-level
//! command dispatcher in `main.rs`, which is the single point that formats
//! and reports it. There is no retry logic anywhere; the only deliberately
//! swallowed failure is the empty-folder blank-background case, which is a
//! defined behavior rather than an error.

use thiserror::Error;

/// Errors that can occur during command execution.
#[derive(Debug, Error)]
pub enum WallshowError {
    /// Malformed or out-of-range command-line option value.
    #[error("{0}")]
    InvalidArgument(String),

    /// `next` was invoked with no usable persisted slideshow state.
    #[error("no active slideshow to advance")]
    NoActiveSlideshow,

    /// The underlying OS call to read or write the background, or the
    /// scheduler facility, failed.
    #[error("{0}")]
    Os(String),

    /// A referenced image or directory does not exist.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// IO error from state or unit-file plumbing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted state record could not be encoded or decoded.
    #[error("state file error: {0}")]
    State(#[from] serde_json::Error),
}
