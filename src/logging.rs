//! Log setup
//!
//! The terminal belongs to the UI, so logs go to `escrabol.log` in the data
//! directory. The filter comes from `ESCRABOL_LOG`, then `RUST_LOG`, and
//! defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config;

const LOG_FILE: &str = "escrabol.log";

/// Build the log filter from the environment.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("ESCRABOL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the log file in the data
/// directory. Returns the log path, or `None` if logging could not be set up;
/// the game runs either way.
pub fn init() -> Option<PathBuf> {
    let dir = config::data_dir().ok()?;
    init_in(&dir)
}

fn init_in(dir: &Path) -> Option<PathBuf> {
    fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "escrabol starting");
    Some(path)
}
