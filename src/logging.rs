//! File-backed logging
//!
//! The terminal belongs to the UI, so log records go to a file instead of
//! stderr. The level filter comes from `PANTRY_LOG` (default `warn`).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use env_logger::{Env, Target};

use crate::error::PantryError;

pub const LOG_ENV: &str = "PANTRY_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("pantry").join("pantry.log"))
}

/// Install the global logger, appending to `path` or the default log file
///
/// Returns the path actually used.
pub fn init(path: Option<&Path>) -> Result<PathBuf, PantryError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(default_log_path)
        .ok_or_else(|| PantryError::Logging("no cache directory available".to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| PantryError::Logging(e.to_string()))?;

    Ok(path)
}
