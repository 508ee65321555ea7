//! CLI command definitions using Clap.

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use super::output;
use crate::desktop::{DesktopBackend, Position, SystemDesktop};
use crate::error::WallshowError;
use crate::slideshow::SlideshowController;
use crate::store::{JsonStateStore, StateStore};
use crate::trigger::SystemdTriggerBinding;
use crate::{login, paths};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wallshow - manage the desktop wallpaper and its slideshow.
#[derive(Parser, Debug)]
#[command(name = "wallshow")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// With no command, the current background, position, and login
    /// background are printed.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Set the desktop wallpaper to a single image.
    Set {
        /// The path to the image to use as wallpaper.
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Background sizing mode.
        #[arg(long, short, value_enum, default_value_t = Position::Fill)]
        position: Position,

        /// Reference the file in place instead of copying it into the
        /// application data directory.
        #[arg(long)]
        no_copy: bool,
    },

    /// Start a slideshow rotating through the images of a directory.
    ///
    /// Persists the slideshow state and installs a scheduled trigger that
    /// re-invokes `wallshow next` on the given interval. Replaces any
    /// previously running slideshow.
    Slideshow {
        /// Directory of candidate images (jpg, jpeg, png, bmp, tiff).
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Background sizing mode.
        #[arg(long, short, value_enum, default_value_t = Position::Fill)]
        position: Position,

        /// Minutes between rotations (clamped to 31 days).
        #[arg(long, short = 'i', value_name = "MINS", default_value_t = 30)]
        interval: u32,

        /// Zero-based index of the image to start from, wrapped into the
        /// directory's image count.
        #[arg(long, short = 'n', value_name = "INDEX", default_value_t = 0)]
        index: u32,
    },

    /// Advance the active slideshow by one image.
    ///
    /// This is the command the scheduled trigger runs on every tick; it can
    /// also be invoked manually.
    Next,

    /// Stop the active slideshow by removing its scheduled trigger.
    Stop {
        /// Also delete the persisted slideshow state. By default the record
        /// is kept, so a later `next` resumes where the slideshow left off.
        #[arg(long)]
        purge_state: bool,
    },

    /// Set the login screen background (JPEG or PNG, at most 256 KiB).
    Login {
        /// The path to the image to use as login background.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// The controller wired to the real store, scheduler, and desktop.
type SystemController = SlideshowController<JsonStateStore, SystemdTriggerBinding, SystemDesktop>;

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WallshowError> {
        match &self.command {
            None => print_status(),

            Some(Commands::Set { path, position, no_copy }) => {
                SystemDesktop::new().set(path, *position, !*no_copy)?;
                println!("Wallpaper set to {}.", path.display());
                Ok(())
            }

            Some(Commands::Slideshow { directory, position, interval, index }) => {
                system_controller()?.start(directory, *position, *interval, *index)?;
                println!("Slideshow started over {}.", directory.display());
                Ok(())
            }

            Some(Commands::Next) => system_controller()?.advance(),

            Some(Commands::Stop { purge_state }) => {
                let controller = system_controller()?;
                let cancelled = controller.cancel()?;
                if *purge_state {
                    controller.purge_state()?;
                }
                if cancelled {
                    println!("Slideshow stopped.");
                } else {
                    println!("No slideshow trigger was registered.");
                }
                Ok(())
            }

            Some(Commands::Login { path }) => {
                let installed = login::set_login_background(path, &paths::data_dir())?;
                println!("Login background set to {}.", installed.display());
                Ok(())
            }

            Some(Commands::Completions { shell }) => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wallshow", &mut io::stdout());
    }
}

/// Builds the controller over the real collaborators.
fn system_controller() -> Result<SystemController, WallshowError> {
    let exe = std::env::current_exe()
        .map_err(|err| WallshowError::Os(format!("cannot resolve own executable: {err}")))?;
    let advance_command = vec![exe.display().to_string(), "next".to_string()];

    Ok(SlideshowController::new(
        JsonStateStore::new(),
        SystemdTriggerBinding::new(),
        SystemDesktop::new(),
        advance_command,
    ))
}

/// Prints the current background, login background, and slideshow state.
fn print_status() -> Result<(), WallshowError> {
    let (background, position) = SystemDesktop::new().current()?;
    let login = login::login_background(&paths::data_dir());
    let state = JsonStateStore::new().load()?;
    output::print_status(background.as_deref(), position, login.as_deref(), state.as_ref());
    Ok(())
}
