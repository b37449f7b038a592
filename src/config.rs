//! Configuration loading
//!
//! Reads `~/.config/pantry/config.toml` (or an explicit path) and resolves the
//! provider API key from the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PantryError;

mod types;

pub use types::{
    AiConfig, Config, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_MODEL,
    DEFAULT_SUGGESTION_LIMIT, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, ImageConfig,
};

const CONFIG_DIR: &str = "pantry";
const CONFIG_FILE: &str = "config.toml";

/// Environment variables checked for the provider API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from the default location
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config() -> Result<Config, PantryError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Ok(Config::default()),
    }
}

/// Load the config from an explicit path (the file must exist)
pub fn load_config_from_path(path: &Path) -> Result<Config, PantryError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(content: &str) -> Result<Config, PantryError> {
    toml::from_str(content).map_err(|e| PantryError::Config(e.to_string()))
}

/// Resolve the API key from the process environment, then the config file
pub fn resolve_api_key(config: &AiConfig) -> Option<String> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

/// Resolve the API key using the given environment lookup
///
/// Blank values are skipped so an exported-but-empty variable does not shadow
/// the config file.
pub fn resolve_api_key_with<F>(config: &AiConfig, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .chain(config.api_key.clone())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
