//! Command-line interface for Wallshow.
//!
//! Parses arguments and dispatches to the slideshow controller, desktop
//! backend, and login background helpers. Every failure bubbles up to
//! `main.rs`, the single point that formats and reports errors.

mod commands;
mod output;

use clap::Parser;
use clap::error::ErrorKind;
pub use commands::{Cli, Commands};

use crate::error::WallshowError;

/// Parses the command line and executes the selected command.
///
/// Help and version requests are printed here and reported as success.
///
/// # Errors
///
/// Returns `InvalidArgument` for unparsable arguments and whatever error the
/// executed command raises.
pub fn run() -> Result<(), WallshowError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(WallshowError::InvalidArgument(primary_message(&err))),
    };

    cli.execute()
}

/// Reduces a clap error to its first line, without the `error: ` prefix, so
/// the top-level reporter can emit a single line.
fn primary_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid arguments");
    first_line.strip_prefix("error: ").unwrap_or(first_line).to_string()
}
