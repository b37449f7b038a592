//! Ingredient suggestion parsing
//!
//! The provider is asked for a bare comma-separated list:
//! ```text
//! olive oil, salt, black pepper, onion, garlic
//! ```

/// Split a comma-separated suggestion list into trimmed, non-empty names
///
/// Blank input yields an empty list. Order is preserved and duplicates are
/// kept as the provider returned them.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
