//! Wallshow - a command-line desktop wallpaper manager.
//!
//! Sets the desktop background, rotates it through a directory of images on a
//! timed schedule, and restores slideshow state across invocations. The
//! program is short-lived: periodic rotation is delegated to an external
//! scheduled trigger that re-invokes the binary with the `next` command, so
//! the slideshow lives entirely in durable state rather than a running loop.

pub mod cli;
pub mod constants;
pub mod desktop;
pub mod error;
pub mod login;
pub mod paths;
pub mod slideshow;
pub mod store;
pub mod trigger;
