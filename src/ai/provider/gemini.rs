//! Google Gemini API client
//!
//! Talks to the `generateContent` REST endpoint for both text and image
//! generation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{AiError, GenerationProvider, TextRequest};
use crate::config::AiConfig;
use crate::recipe::RecipeImage;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client against the public endpoint
    #[cfg(test)]
    pub fn new(api_key: String, model: String, image_model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            model,
            image_model,
        }
    }

    /// Create a client from configuration and a resolved API key
    ///
    /// Returns an error if the key is missing or blank, or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &AiConfig, api_key: Option<String>) -> Result<Self, AiError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AiError::NotConfigured(
                    "Missing API key. Set GEMINI_API_KEY or api_key in [ai] config".to_string(),
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::NotConfigured(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    #[cfg(test)]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Build the generateContent URL for a model
    pub(crate) fn build_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build the request body for a text completion
    pub(crate) fn build_text_body(request: &TextRequest) -> Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }
            ]
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(schema) = &request.response_schema {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }

    /// Build the request body for an image-only response
    pub(crate) fn build_image_body(prompt: &str) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "responseModalities": ["IMAGE"]
            }
        })
    }

    async fn post(&self, model: &str, body: &Value) -> Result<GenerateContentResponse, AiError> {
        let response = self
            .http
            .post(self.build_url(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Api {
                code: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        parse_response(&text)
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate_text(&self, request: TextRequest) -> Result<String, AiError> {
        let body = Self::build_text_body(&request);
        let response = self.post(&self.model, &body).await?;
        response.text()
    }

    async fn generate_image(&self, prompt: &str) -> Result<RecipeImage, AiError> {
        let body = Self::build_image_body(prompt);
        let response = self.post(&self.image_model, &body).await?;
        response.first_image()
    }
}

// =========================================================================
// Response types
// =========================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> Result<&[Part], AiError> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| AiError::Parse("response contained no candidates".to_string()))?;
        Ok(candidate
            .content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default())
    }

    /// Concatenated text parts of the first candidate
    pub(crate) fn text(&self) -> Result<String, AiError> {
        Ok(self
            .first_parts()?
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect())
    }

    /// First inline image part of the first candidate
    pub(crate) fn first_image(&self) -> Result<RecipeImage, AiError> {
        self.first_parts()?
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| RecipeImage::new(inline.mime_type.clone(), inline.data.clone()))
            .ok_or(AiError::MissingImage)
    }
}

pub(crate) fn parse_response(text: &str) -> Result<GenerateContentResponse, AiError> {
    serde_json::from_str(text).map_err(|e| AiError::Parse(e.to_string()))
}

/// Pull `error.message` out of an API error body, falling back to the raw body
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod gemini_tests;
