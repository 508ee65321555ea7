//! Wallshow binary entry point.
//!
//! Each invocation is a single short-lived, run-to-completion process; the
//! slideshow's periodic behavior is delegated to an external scheduled
//! trigger that re-invokes this binary with the `next` command.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = wallshow_lib::cli::run() {
        eprintln!("[ERROR] {err}");
        std::process::exit(1);
    }
}
