//! Recipe data model
//!
//! A [`Recipe`] is produced wholesale from one provider response and never
//! mutated afterwards. A [`RecipeImage`] carries the base64 payload of the
//! generated illustration.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// MIME type assumed when the provider omits one
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Numbered suffixes tried before giving up on a free file name
const MAX_NAME_ATTEMPTS: u32 = 100;

/// A generated recipe
///
/// Field names on the wire follow the provider's response schema
/// (`recipeName`, `prepTime`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "recipeName")]
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Parse a recipe from the provider's structured JSON output
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim())
    }

    /// Response schema sent with structured-output requests
    ///
    /// All six fields are required; the provider enforces their types.
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "recipeName": {
                    "type": "STRING",
                    "description": "The name of the recipe."
                },
                "description": {
                    "type": "STRING",
                    "description": "A short, appetizing description of the dish."
                },
                "prepTime": {
                    "type": "STRING",
                    "description": "Preparation time, e.g., '15 minutes'."
                },
                "cookTime": {
                    "type": "STRING",
                    "description": "Cooking time, e.g., '30 minutes'."
                },
                "ingredients": {
                    "type": "ARRAY",
                    "items": {
                        "type": "STRING",
                        "description": "A specific ingredient with quantity."
                    },
                    "description": "A list of ingredients required for the recipe, derived from the user's list."
                },
                "instructions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "STRING",
                        "description": "A single step in the cooking instructions."
                    },
                    "description": "A step-by-step list of instructions to prepare the dish."
                }
            },
            "required": ["recipeName", "description", "prepTime", "cookTime", "ingredients", "instructions"]
        })
    }
}

/// A generated recipe illustration, still base64 encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeImage {
    pub mime_type: String,
    pub data: String,
}

impl RecipeImage {
    pub fn new(mime_type: Option<String>, data: String) -> Self {
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
        Self { mime_type, data }
    }

    /// `data:<mime>;base64,<payload>` URI for the image
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Size of the image once decoded, computed from the encoded length
    ///
    /// Padding and line breaks carry no data and are not counted, so
    /// unpadded payloads report their size too.
    pub fn decoded_len(&self) -> usize {
        let symbols = self
            .data
            .bytes()
            .filter(|&b| b != b'=' && !b.is_ascii_whitespace())
            .count();
        symbols * 3 / 4
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let compact: Vec<u8> = self
            .data
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        STANDARD.decode(compact)
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Decode the image and write it into `dir`, named after the recipe
    ///
    /// Never overwrites: when `<slug>-<timestamp>.<ext>` exists, `-1`, `-2`,
    /// ... are appended until a free name is found.
    pub fn save_to(&self, dir: &Path, recipe_name: &str) -> io::Result<PathBuf> {
        let bytes = self
            .decode()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::create_dir_all(dir)?;
        let stem = format!(
            "{}-{}",
            slugify(recipe_name),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}.{}", stem, self.extension())
            } else {
                format!("{}-{}.{}", stem, attempt, self.extension())
            };
            let path = dir.join(file_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&bytes)?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {} in {}", stem, dir.display()),
        ))
    }
}

/// Lowercase ASCII slug for file names, `recipe` when nothing usable remains
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "recipe".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
#[path = "recipe_tests.rs"]
mod recipe_tests;
