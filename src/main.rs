mod action;
mod app;
mod carousel;
mod config;
mod dummyjson;
mod error;
mod event;
mod fetch;
mod nav;
mod source;
mod tui;
mod types;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::dummyjson::DummyJson;
use crate::event::Event;
use crate::tui::EventHandler;

/// Browse the DummyJSON product catalogue from the terminal
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about)]
struct Cli {
    /// API root, e.g. https://dummyjson.com
    #[arg(long, env = "SHELF_BASE_URL")]
    base_url: Option<String>,

    /// Config file (default: ~/.config/shelf/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file; logging is off otherwise
    #[arg(long, env = "SHELF_LOG")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns stdout/stderr, so logs only ever go to a file.
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    info!(base_url = %config.base_url, "starting");

    let source = DummyJson::new(&config.base_url)?;

    tui::install_panic_hook();

    // Run the application
    let result = run(Arc::new(source), &config).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(
    source: Arc<DummyJson>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(source, action_tx.clone(), config.carousel_interval());

    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(config.tick_rate(), render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("bye");
    Ok(())
}
