//! Prompt templates for recipe, image and suggestion requests

/// Prompt asking for a recipe built only from the user's ingredients
pub fn build_recipe_prompt(ingredients: &str) -> String {
    format!(
        "You are a creative and experienced chef. Your task is to generate a delicious recipe \
         based *only* on the ingredients provided by the user.\n\
         If the ingredients are not sufficient to create a meaningful recipe, your description \
         should politely state that and suggest adding more items.\n\n\
         User's ingredients: {}",
        ingredients
    )
}

/// Prompt asking for a plated photograph of the recipe
pub fn build_image_prompt(recipe_name: &str, recipe_description: &str) -> String {
    format!(
        "A delicious, professionally photographed image of \"{}\". {}. The food should look \
         appetizing and be presented on a clean, modern plate with a blurred background.",
        recipe_name,
        recipe_description.trim_end().trim_end_matches('.')
    )
}

/// Prompt asking for up to `limit` complementary ingredients as a bare
/// comma-separated list
pub fn build_suggestion_prompt(current_ingredients: &str, limit: usize) -> String {
    format!(
        "You are an expert chef's assistant. Based on the user's list of ingredients: \"{}\", \
         suggest up to {} common ingredients that would complement them well. Return *only* a \
         comma-separated list of the suggested ingredients. Do not include any introductory \
         text, explanations, or numbering. For example: olive oil, salt, black pepper, onion, garlic",
        current_ingredients, limit
    )
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
