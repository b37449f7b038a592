use std::sync::mpsc::{Receiver, TryRecvError};

use tokio::sync::mpsc::UnboundedSender;

use super::input_state::InputState;
use super::workflow::{ImagePhase, RecipePhase, SuggestionPhase};
use crate::ai::worker::{WorkerRequest, WorkerResponse};

pub const EMPTY_INGREDIENTS_MESSAGE: &str = "Please enter some ingredients.";
pub const EMPTY_SUGGESTION_INPUT_MESSAGE: &str =
    "Please enter at least one ingredient to get suggestions.";
pub const RECIPE_FAILED_MESSAGE: &str =
    "Failed to communicate with the recipe AI. Please check your connection and try again.";
pub const SUGGESTIONS_FAILED_MESSAGE: &str = "Could not get suggestions. Please try again.";

/// Application state
///
/// Owns every piece of mutable UI state. Requests go to the worker thread
/// through `request_tx`; results come back through `response_rx` and are
/// applied by [`App::poll_responses`].
pub struct App {
    pub input: InputState,
    pub recipe: RecipePhase,
    pub suggestions: SuggestionPhase,
    /// Vertical scroll of the recipe panel
    pub recipe_scroll: u16,
    /// Drives spinner animation
    pub frame_count: u64,
    pub should_quit: bool,
    request_tx: Option<UnboundedSender<WorkerRequest>>,
    response_rx: Option<Receiver<WorkerResponse>>,
    last_request_id: u64,
}

impl App {
    /// Create a new App with no worker attached
    pub fn new() -> Self {
        Self {
            input: InputState::new(),
            recipe: RecipePhase::Idle,
            suggestions: SuggestionPhase::Idle,
            recipe_scroll: 0,
            frame_count: 0,
            should_quit: false,
            request_tx: None,
            response_rx: None,
            last_request_id: 0,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<WorkerRequest>,
        response_rx: Receiver<WorkerResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether either workflow is still running
    ///
    /// Input and actions are disabled while busy. The recipe workflow stays
    /// busy until its image step finishes.
    pub fn is_busy(&self) -> bool {
        self.recipe.is_busy() || self.suggestions.is_loading()
    }

    fn next_request_id(&mut self) -> u64 {
        self.last_request_id = self.last_request_id.wrapping_add(1);
        self.last_request_id
    }

    /// Send a request to the worker; false if no worker is listening
    fn dispatch(&self, request: WorkerRequest) -> bool {
        match &self.request_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    fn cancel_request(&self, request_id: Option<u64>) {
        if let Some(request_id) = request_id
            && self.dispatch(WorkerRequest::Cancel { request_id })
        {
            log::debug!("Sent cancel for request {}", request_id);
        }
    }

    /// Start the recipe workflow for the current input
    ///
    /// Previous in-flight requests are cancelled first, so the newest
    /// request always wins. Blank input then fails without a request;
    /// otherwise any prior recipe, image, error and suggestions are cleared.
    pub fn start_recipe(&mut self) {
        self.cancel_request(self.recipe.in_flight_request());
        self.cancel_request(self.suggestions.in_flight_request());

        let ingredients = self.input.text();
        if ingredients.trim().is_empty() {
            self.recipe = RecipePhase::Failed(EMPTY_INGREDIENTS_MESSAGE.to_string());
            if self.suggestions.is_loading() {
                self.suggestions = SuggestionPhase::Idle;
            }
            return;
        }

        self.suggestions = SuggestionPhase::Idle;
        self.recipe_scroll = 0;

        let request_id = self.next_request_id();
        self.recipe = RecipePhase::Loading { request_id };
        if !self.dispatch(WorkerRequest::Recipe {
            ingredients,
            request_id,
        }) {
            log::error!("AI worker unavailable; recipe request {} dropped", request_id);
            self.recipe = RecipePhase::Failed(RECIPE_FAILED_MESSAGE.to_string());
        }
    }

    /// Start the suggestion workflow for the current input
    pub fn start_suggestions(&mut self) {
        self.cancel_request(self.suggestions.in_flight_request());

        let ingredients = self.input.text();
        if ingredients.trim().is_empty() {
            self.suggestions =
                SuggestionPhase::Failed(EMPTY_SUGGESTION_INPUT_MESSAGE.to_string());
            return;
        }

        let request_id = self.next_request_id();
        self.suggestions = SuggestionPhase::Loading { request_id };
        if !self.dispatch(WorkerRequest::Suggestions {
            ingredients,
            request_id,
        }) {
            log::error!(
                "AI worker unavailable; suggestion request {} dropped",
                request_id
            );
            self.suggestions = SuggestionPhase::Failed(SUGGESTIONS_FAILED_MESSAGE.to_string());
        }
    }

    /// Append the suggestion at `index` to the input and drop it from the list
    ///
    /// Returns false when there is no suggestion at `index`.
    pub fn accept_suggestion(&mut self, index: usize) -> bool {
        let SuggestionPhase::Ready(list) = &mut self.suggestions else {
            return false;
        };
        let Some(suggestion) = list.get(index).cloned() else {
            return false;
        };

        list.retain(|s| s != &suggestion);
        let text = append_ingredient(&self.input.text(), &suggestion);
        self.input.set_text(&text);
        true
    }

    /// Drain and apply every response the worker has sent
    pub fn poll_responses(&mut self) {
        loop {
            let response = match &self.response_rx {
                Some(rx) => match rx.try_recv() {
                    Ok(response) => response,
                    Err(TryRecvError::Empty) => return,
                    Err(TryRecvError::Disconnected) => {
                        log::warn!("AI worker disconnected");
                        self.response_rx = None;
                        return;
                    }
                },
                None => return,
            };
            self.apply_response(response);
        }
    }

    /// Apply one worker response
    ///
    /// Responses for anything but the workflow's current request are stale
    /// and ignored.
    pub fn apply_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::Recipe { request_id, result } => {
                if !matches!(self.recipe, RecipePhase::Loading { request_id: current } if current == request_id)
                {
                    log::debug!("Ignoring stale recipe response {}", request_id);
                    return;
                }
                self.recipe = match result {
                    Ok(recipe) => RecipePhase::Ready {
                        request_id,
                        recipe,
                        image: ImagePhase::Loading,
                    },
                    Err(e) => {
                        log::error!("Recipe request {} failed: {}", request_id, e);
                        RecipePhase::Failed(RECIPE_FAILED_MESSAGE.to_string())
                    }
                };
            }
            WorkerResponse::Image {
                request_id,
                result,
                saved_to,
            } => {
                let RecipePhase::Ready {
                    request_id: current,
                    image: image_phase @ ImagePhase::Loading,
                    ..
                } = &mut self.recipe
                else {
                    log::debug!("Ignoring image response {} with no pending image", request_id);
                    return;
                };
                if *current != request_id {
                    log::debug!("Ignoring stale image response {}", request_id);
                    return;
                }

                *image_phase = match result {
                    Ok(image) => ImagePhase::Ready { image, saved_to },
                    Err(e) => {
                        log::warn!("Image generation failed: {}", e);
                        ImagePhase::Unavailable
                    }
                };
            }
            WorkerResponse::Suggestions { request_id, result } => {
                if !matches!(self.suggestions, SuggestionPhase::Loading { request_id: current } if current == request_id)
                {
                    log::debug!("Ignoring stale suggestion response {}", request_id);
                    return;
                }
                self.suggestions = match result {
                    Ok(list) => SuggestionPhase::Ready(list),
                    Err(e) => {
                        log::error!("Suggestion request {} failed: {}", request_id, e);
                        SuggestionPhase::Failed(SUGGESTIONS_FAILED_MESSAGE.to_string())
                    }
                };
            }
            WorkerResponse::Cancelled { request_id } => {
                log::debug!("Request {} cancelled", request_id);
            }
        }
    }

    /// Scroll the recipe panel by `delta` lines
    pub fn scroll_recipe(&mut self, delta: i32) {
        self.recipe_scroll = if delta < 0 {
            self.recipe_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.recipe_scroll.saturating_add(delta as u16)
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a suggestion onto a comma-separated ingredient list
///
/// The current text is trimmed first. Empty text becomes the suggestion
/// alone; a trailing comma gets a single space; anything else gets `", "`.
pub fn append_ingredient(current: &str, suggestion: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        suggestion.to_string()
    } else if current.ends_with(',') {
        format!("{} {}", current, suggestion)
    } else {
        format!("{}, {}", current, suggestion)
    }
}
