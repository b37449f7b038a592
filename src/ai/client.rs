//! Recipe generation client
//!
//! Wraps a [`GenerationProvider`] with the three operations the app needs:
//! a structured recipe, an illustration for it, and ingredient suggestions.
//! Failures are logged here with full detail and returned typed.

use std::sync::Arc;

use super::prompt::{build_image_prompt, build_recipe_prompt, build_suggestion_prompt};
use super::provider::{AiError, GenerationProvider, TextRequest};
use super::suggestion::parse_suggestions;
use crate::config::{AiConfig, DEFAULT_SUGGESTION_LIMIT, DEFAULT_TEMPERATURE};
use crate::recipe::{Recipe, RecipeImage};

/// Generation client shared with worker tasks
#[derive(Clone)]
pub struct RecipeClient {
    provider: Arc<dyn GenerationProvider>,
    temperature: f32,
    suggestion_limit: usize,
}

impl std::fmt::Debug for RecipeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeClient")
            .field("provider", &self.provider.name())
            .field("temperature", &self.temperature)
            .field("suggestion_limit", &self.suggestion_limit)
            .finish()
    }
}

impl RecipeClient {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn from_config(provider: Arc<dyn GenerationProvider>, config: &AiConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            suggestion_limit: config.suggestion_limit.max(1),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate a recipe from the user's free-text ingredient list
    pub async fn generate_recipe(&self, ingredients: &str) -> Result<Recipe, AiError> {
        let ingredients = require_text(ingredients)?;
        let request = TextRequest::structured(
            build_recipe_prompt(ingredients),
            Recipe::response_schema(),
            self.temperature,
        );

        let result = match self.provider.generate_text(request).await {
            Ok(text) => Recipe::from_json(&text).map_err(|e| AiError::Parse(e.to_string())),
            Err(e) => Err(e),
        };

        result.inspect_err(|e| {
            log::error!("Error generating recipe ({}): {}", self.provider.name(), e)
        })
    }

    /// Generate an illustration for a recipe
    pub async fn generate_recipe_image(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RecipeImage, AiError> {
        let prompt = build_image_prompt(name, description);

        self.provider
            .generate_image(&prompt)
            .await
            .inspect_err(|e| {
                log::error!(
                    "Error generating recipe image ({}): {}",
                    self.provider.name(),
                    e
                )
            })
    }

    /// Suggest ingredients that complement the current list
    pub async fn suggest_ingredients(&self, current: &str) -> Result<Vec<String>, AiError> {
        let current = require_text(current)?;
        let request = TextRequest::plain(build_suggestion_prompt(current, self.suggestion_limit));

        self.provider
            .generate_text(request)
            .await
            .map(|text| parse_suggestions(&text))
            .inspect_err(|e| {
                log::error!(
                    "Error suggesting ingredients ({}): {}",
                    self.provider.name(),
                    e
                )
            })
    }
}

fn require_text(text: &str) -> Result<&str, AiError> {
    if text.trim().is_empty() {
        Err(AiError::Validation("no ingredients provided".to_string()))
    } else {
        Ok(text)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
