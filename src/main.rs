use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use tokio::sync::mpsc::unbounded_channel;

use pantry::ai::client::RecipeClient;
use pantry::ai::provider::GeminiClient;
use pantry::ai::worker::spawn_worker;
use pantry::app::App;
use pantry::config::{self, Config};
use pantry::logging;

/// How long to wait for a terminal event before redrawing
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(
    name = "pantry",
    version,
    about = "Turn the ingredients you have into a recipe",
    long_about = "Type the ingredients you have on hand and get back a recipe, an \
                  illustration and ideas for ingredients to add. Requires a Gemini \
                  API key in GEMINI_API_KEY (or API_KEY, or ai.api_key in the config file)."
)]
struct Args {
    /// Config file to use instead of ~/.config/pantry/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory generated recipe images are saved to
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Log file path (level set with PANTRY_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    // The UI owns the terminal, so logging failure is not fatal
    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("Warning: {}", e);
    }

    let config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };

    // --image-dir wins over the config file
    let image_dir = args.image_dir.or_else(|| config.image.save_dir.clone());
    let app = build_app(&config, image_dir);

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    execute!(stdout(), EnableBracketedPaste)?;

    let result = run(terminal, app);

    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

/// Wire the app to a worker thread running the configured provider
fn build_app(config: &Config, image_dir: Option<PathBuf>) -> App {
    let api_key = config::resolve_api_key(&config.ai);
    let client = GeminiClient::from_config(&config.ai, api_key).map(|provider| {
        log::info!(
            "Text model: {}, image model: {}",
            provider.model(),
            provider.image_model()
        );
        RecipeClient::from_config(Arc::new(provider), &config.ai)
    });
    match &client {
        Ok(client) => log::info!("Using {} provider", client.provider_name()),
        Err(e) => log::warn!("{}", e),
    }

    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    if let Some(dir) = &image_dir {
        log::info!("Saving recipe images to {}", dir.display());
    }
    // Detached; exits once the app drops its request sender
    spawn_worker(client, image_dir, request_rx, response_tx);

    let mut app = App::new();
    app.set_channels(request_tx, response_rx);
    app
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events(TICK)?;
        app.poll_responses();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
