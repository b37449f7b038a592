//! AI provider abstraction
//!
//! Defines the GenerationProvider trait, the AiError type, and the request
//! shape shared by every provider.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::recipe::RecipeImage;

mod gemini;

pub use gemini::GeminiClient;

/// Errors that can occur during generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No API key available
    #[error("AI not configured: {0}")]
    NotConfigured(String),

    /// Network error during API request
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Image request succeeded but carried no inline image
    #[error("No image data found in the response")]
    MissingImage,

    /// Request was cancelled
    #[error("Request cancelled")]
    Cancelled,
}

/// A plain or structured text completion request
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    /// When set, the provider must answer with JSON matching this schema
    pub response_schema: Option<Value>,
    pub temperature: Option<f32>,
}

impl TextRequest {
    pub fn plain(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            temperature: None,
        }
    }

    pub fn structured(prompt: impl Into<String>, schema: Value, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
            temperature: Some(temperature),
        }
    }
}

/// A generative AI backend
///
/// Each call is one independent request/response round trip.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Text completion; returns the concatenated text of the first candidate
    async fn generate_text(&self, request: TextRequest) -> Result<String, AiError>;

    /// Image generation; returns the first inline image of the first candidate
    async fn generate_image(&self, prompt: &str) -> Result<RecipeImage, AiError>;
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
