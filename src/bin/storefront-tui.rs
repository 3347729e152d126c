//! Storefront TUI Application
//!
//! A terminal storefront for browsing product categories.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_carousel::tui::{
    carousel_width, handle_event, process_state, render, restore_terminal, setup_terminal,
    AppState,
};
use storefront_carousel::{load_settings, Platform, ProductClient, Settings};

#[derive(Parser, Debug)]
#[command(about = "Browse storefront categories and products")]
struct Args {
    /// Config file (defaults to ./storefront.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Product service root, e.g. http://127.0.0.1:8001/api
    #[arg(long)]
    service_url: Option<String>,
    /// android, ios or other.
    #[arg(long)]
    platform: Option<Platform>,
}

/// Logs go to the configured file; the terminal belongs to the UI.
fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;

    match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.service_url {
        settings.service_url = url;
    }
    if let Some(platform) = args.platform {
        settings.platform = Some(platform);
    }
    init_tracing(&settings)?;

    let client = ProductClient::with_timeout(&settings.service_url, settings.request_timeout())
        .with_context(|| format!("failed to create client for {}", settings.service_url))?;
    info!(
        service_url = %settings.service_url,
        platform = %settings.platform(),
        "starting storefront"
    );

    let mut terminal = setup_terminal()?;
    let mut state = AppState::new(Arc::new(client), &settings);
    state.start();

    loop {
        state.on_layout(carousel_width(terminal.size()?.width));
        terminal.draw(|f| render(f, &state))?;

        process_state(&mut state);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
