//! AI Worker Thread
//!
//! Runs generation requests in a background thread so the UI never blocks.
//! The thread hosts a single-threaded tokio runtime; every request becomes a
//! task guarded by its own cancellation token, and results are sent back to
//! the UI thread over a std channel. Generated images are written to disk
//! here too, on the blocking pool, so the UI thread never touches the
//! filesystem.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::client::RecipeClient;
use super::provider::AiError;
use crate::recipe::{Recipe, RecipeImage};

/// Request messages sent to the worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRequest {
    /// Generate a recipe, then an illustration for it
    Recipe {
        ingredients: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Suggest complementary ingredients
    Suggestions { ingredients: String, request_id: u64 },
    /// Cancel the request with the given ID
    Cancel { request_id: u64 },
}

/// Response messages received from the worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// Result of the recipe step
    Recipe {
        request_id: u64,
        result: Result<Recipe, AiError>,
    },
    /// Result of the image step; only follows a successful recipe step
    Image {
        request_id: u64,
        result: Result<RecipeImage, AiError>,
        /// Where the image was written, when saving is enabled and succeeded
        saved_to: Option<PathBuf>,
    },
    Suggestions {
        request_id: u64,
        result: Result<Vec<String>, AiError>,
    },
    /// The request was cancelled
    Cancelled { request_id: u64 },
}

type InFlight = Arc<Mutex<HashMap<u64, CancellationToken>>>;

/// Spawn the worker thread
///
/// `client` is an error when no provider could be built (e.g. missing API
/// key); the worker then answers every request with that error, so the
/// problem surfaces at first use instead of at startup.
///
/// With `image_dir` set, every generated image is saved there before its
/// response is sent.
///
/// The thread exits once every request sender has been dropped.
pub fn spawn_worker(
    client: Result<RecipeClient, AiError>,
    image_dir: Option<PathBuf>,
    request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        worker_loop(client, image_dir, request_rx, response_tx);
    })
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop(
    client: Result<RecipeClient, AiError>,
    image_dir: Option<PathBuf>,
    request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) {
    if let Err(e) = &client {
        // Reported per request, not now
        log::debug!("AI provider not configured: {}", e);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start AI worker runtime: {}", e);
            return;
        }
    };

    runtime.block_on(process_requests(client, image_dir, request_rx, response_tx));

    log::debug!("AI worker thread shutting down");
}

async fn process_requests(
    client: Result<RecipeClient, AiError>,
    image_dir: Option<PathBuf>,
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) {
    let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));

    while let Some(request) = request_rx.recv().await {
        match request {
            WorkerRequest::Cancel { request_id } => {
                let token = lock(&in_flight).remove(&request_id);
                match token {
                    // The task reports the cancellation itself
                    Some(token) => token.cancel(),
                    None => {
                        let _ = response_tx.send(WorkerResponse::Cancelled { request_id });
                        log::debug!("Cancelled request {} (no active request)", request_id);
                    }
                }
            }
            WorkerRequest::Recipe {
                ingredients,
                request_id,
            } => {
                let client = match &client {
                    Ok(client) => client.clone(),
                    Err(e) => {
                        let _ = response_tx.send(WorkerResponse::Recipe {
                            request_id,
                            result: Err(e.clone()),
                        });
                        continue;
                    }
                };
                let token = register(&in_flight, request_id);
                let tx = response_tx.clone();
                let in_flight = Arc::clone(&in_flight);
                let image_dir = image_dir.clone();
                tokio::spawn(async move {
                    handle_recipe(&client, &ingredients, request_id, image_dir, &token, &tx)
                        .await;
                    lock(&in_flight).remove(&request_id);
                });
            }
            WorkerRequest::Suggestions {
                ingredients,
                request_id,
            } => {
                let client = match &client {
                    Ok(client) => client.clone(),
                    Err(e) => {
                        let _ = response_tx.send(WorkerResponse::Suggestions {
                            request_id,
                            result: Err(e.clone()),
                        });
                        continue;
                    }
                };
                let token = register(&in_flight, request_id);
                let tx = response_tx.clone();
                let in_flight = Arc::clone(&in_flight);
                tokio::spawn(async move {
                    handle_suggestions(&client, &ingredients, request_id, &token, &tx).await;
                    lock(&in_flight).remove(&request_id);
                });
            }
        }
    }
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<u64, CancellationToken>> {
    // A panicked task cannot leave the map half-updated, so poisoning is ignored
    in_flight.lock().unwrap_or_else(|e| e.into_inner())
}

fn register(in_flight: &InFlight, request_id: u64) -> CancellationToken {
    let token = CancellationToken::new();
    lock(in_flight).insert(request_id, token.clone());
    token
}

/// Recipe step, then the image step under the same request ID
async fn handle_recipe(
    client: &RecipeClient,
    ingredients: &str,
    request_id: u64,
    image_dir: Option<PathBuf>,
    token: &CancellationToken,
    response_tx: &Sender<WorkerResponse>,
) {
    let result = tokio::select! {
        biased;
        _ = token.cancelled() => {
            let _ = response_tx.send(WorkerResponse::Cancelled { request_id });
            log::debug!("Cancelled recipe request {}", request_id);
            return;
        }
        result = client.generate_recipe(ingredients) => result,
    };

    let recipe = match result {
        Ok(recipe) => recipe,
        Err(e) => {
            let _ = response_tx.send(WorkerResponse::Recipe {
                request_id,
                result: Err(e),
            });
            return;
        }
    };

    let name = recipe.name.clone();
    let description = recipe.description.clone();
    if response_tx
        .send(WorkerResponse::Recipe {
            request_id,
            result: Ok(recipe),
        })
        .is_err()
    {
        // Main thread disconnected
        return;
    }

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => {
            let _ = response_tx.send(WorkerResponse::Cancelled { request_id });
            log::debug!("Cancelled image request {}", request_id);
            return;
        }
        result = client.generate_recipe_image(&name, &description) => result,
    };

    let saved_to = match (&result, image_dir) {
        (Ok(image), Some(dir)) => save_image(image.clone(), dir, name).await,
        _ => None,
    };

    let _ = response_tx.send(WorkerResponse::Image {
        request_id,
        result,
        saved_to,
    });
}

/// Write `image` into `dir` on the blocking pool; failures are logged only
async fn save_image(image: RecipeImage, dir: PathBuf, recipe_name: String) -> Option<PathBuf> {
    let saved = tokio::task::spawn_blocking(move || {
        let result = image.save_to(&dir, &recipe_name);
        (dir, result)
    })
    .await;

    match saved {
        Ok((_, Ok(path))) => {
            log::info!("Saved recipe image to {:?}", path);
            Some(path)
        }
        Ok((dir, Err(e))) => {
            log::warn!("Could not save recipe image to {:?}: {}", dir, e);
            None
        }
        Err(e) => {
            log::warn!("Image save task failed: {}", e);
            None
        }
    }
}

async fn handle_suggestions(
    client: &RecipeClient,
    ingredients: &str,
    request_id: u64,
    token: &CancellationToken,
    response_tx: &Sender<WorkerResponse>,
) {
    let result = tokio::select! {
        biased;
        _ = token.cancelled() => {
            let _ = response_tx.send(WorkerResponse::Cancelled { request_id });
            log::debug!("Cancelled suggestion request {}", request_id);
            return;
        }
        result = client.suggest_ingredients(ingredients) => result,
    };

    let _ = response_tx.send(WorkerResponse::Suggestions { request_id, result });
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
