// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Generation provider configuration section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Used only when neither GEMINI_API_KEY nor API_KEY is set
    pub api_key: Option<String>,
    /// Model for recipes and suggestions
    pub model: String,
    /// Model for recipe illustrations
    pub image_model: String,
    pub temperature: f32,
    /// Upper bound on ingredient suggestions requested per call
    pub suggestion_limit: usize,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Image output configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ImageConfig {
    /// Directory generated images are written to; images are kept in memory only when unset
    pub save_dir: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub image: ImageConfig,
}
