mod events;
mod input_state;
mod render;
mod state;
mod workflow;

// Re-export public types
pub use input_state::InputState;
pub use state::{
    App, EMPTY_INGREDIENTS_MESSAGE, EMPTY_SUGGESTION_INPUT_MESSAGE, RECIPE_FAILED_MESSAGE,
    SUGGESTIONS_FAILED_MESSAGE, append_ingredient,
};
pub use workflow::{ImagePhase, RecipePhase, SuggestionPhase};
