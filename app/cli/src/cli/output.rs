//! CLI output formatting for the status command.

use std::path::Path;

use colored::Colorize;

use crate::desktop::Position;
use crate::store::SlideshowState;

/// Prints the current background, login background, and slideshow state.
pub fn print_status(
    background: Option<&Path>,
    position: Position,
    login: Option<&Path>,
    state: Option<&SlideshowState>,
) {
    println!(
        "{} {} ({position})",
        "Background:".bold(),
        format_path(background)
    );
    println!("{} {}", "Login background:".bold(), format_path(login));

    match state {
        Some(state) => {
            println!(
                "{} {} (image {}, every {})",
                "Slideshow:".bold(),
                state.directory.display(),
                state.current_index,
                format_interval(state.interval_minutes)
            );
        }
        None => println!("{} {}", "Slideshow:".bold(), "none".dimmed()),
    }
}

fn format_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "none".dimmed().to_string(), |p| p.display().to_string())
}

fn format_interval(minutes: u32) -> String {
    if minutes % 60 == 0 && minutes >= 60 {
        let hours = minutes / 60;
        if hours == 1 { "1 hour".to_string() } else { format!("{hours} hours") }
    } else if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}
