//! Repository manager admin console (terminal UI)
//!
//! ## Architecture
//!
//! Elm Architecture (TEA):
//! - **Model**: application state (`model/`)
//! - **Message**: events as data (`message/`)
//! - **Update**: the only place that changes the model (`update/`)
//! - **View**: rendering from the model (`view/`)
//! - **Event**: terminal input to messages (`event/`)
//! - **Backend**: remote API wiring, config and credentials (`backend/`)
//!
//! Every page and modal that talks to the server owns a core `Host` running a
//! view machine. Hosts execute requests on the tokio runtime; the main loop
//! pumps their completions and drains the application message channel after
//! each input poll.
//!
//! Startup:
//! 1. parse the command line and install file logging
//! 2. load the config and build the backend (remote or demo)
//! 3. initialize the terminal, run the loop, restore the terminal

mod app;
mod backend;
mod cli;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use backend::{Backend, ConfigService, FileConfigService, KeyringPasswordStore};
use cli::Cli;
use util::{init_logging, init_terminal, restore_terminal};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging goes to a file, the terminal belongs to the UI
    let log_path = cli.log_file.clone().unwrap_or_else(util::default_log_path);
    init_logging(&log_path).with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    log::info!("Starting nxrm-admin {}", env!("CARGO_PKG_VERSION"));

    // 2. Config and backend
    let config_service = FileConfigService::new(cli.config.clone().unwrap_or_else(FileConfigService::default_path));
    let config = config_service.load()?;
    view::theme::set_theme(config.theme);

    let backend = Backend::from_config(&config, cli.demo, &KeyringPasswordStore, cli.remember_password)?;
    log::info!("Backend mode: {}", backend.mode);

    // 3. Terminal
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = model::App::new(backend, tx);
    if cli.demo || config.server.is_none() {
        app.set_status("Demo mode: changes are kept in memory");
    } else if let Some(warning) = config.flags_warning(cli.demo) {
        log::warn!("{warning}");
        app.set_status(warning);
    }

    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app, &mut rx);

    // Restore the terminal whether or not the loop failed
    restore_terminal(&mut terminal)?;

    log::info!("Exiting");
    result
}
