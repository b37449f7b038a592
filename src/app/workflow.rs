//! Workflow state machines
//!
//! Each workflow moves Idle -> Loading -> Ready | Failed. Loading and failed
//! are separate variants, so a workflow can never be both at once.

use std::path::PathBuf;

use crate::recipe::{Recipe, RecipeImage};

/// State of the recipe illustration, once a recipe exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePhase {
    Loading,
    Ready {
        image: RecipeImage,
        /// Where the decoded image was written, if saving is configured
        saved_to: Option<PathBuf>,
    },
    /// Generation failed; the recipe is shown without an illustration
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecipePhase {
    #[default]
    Idle,
    Loading {
        request_id: u64,
    },
    Ready {
        /// The image step reuses the recipe's request ID
        request_id: u64,
        recipe: Recipe,
        image: ImagePhase,
    },
    Failed(String),
}

impl RecipePhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, RecipePhase::Loading { .. })
    }

    /// True until the whole workflow finishes, image step included
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            RecipePhase::Loading { .. }
                | RecipePhase::Ready {
                    image: ImagePhase::Loading,
                    ..
                }
        )
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            RecipePhase::Ready { recipe, .. } => Some(recipe),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImagePhase> {
        match self {
            RecipePhase::Ready { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RecipePhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// ID of a request still owed a response: the recipe step, or the image
    /// step that follows it
    pub fn in_flight_request(&self) -> Option<u64> {
        match self {
            RecipePhase::Loading { request_id } => Some(*request_id),
            RecipePhase::Ready {
                request_id,
                image: ImagePhase::Loading,
                ..
            } => Some(*request_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuggestionPhase {
    #[default]
    Idle,
    Loading {
        request_id: u64,
    },
    Ready(Vec<String>),
    Failed(String),
}

impl SuggestionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SuggestionPhase::Loading { .. })
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            SuggestionPhase::Ready(list) => list,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SuggestionPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn in_flight_request(&self) -> Option<u64> {
        match self {
            SuggestionPhase::Loading { request_id } => Some(*request_id),
            _ => None,
        }
    }
}
