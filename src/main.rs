// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Waybook.
//!
//! A terminal-based manager for collections of GPS waypoints and tracks.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background storage worker owning the SQLite database.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   collection view-model.
//! * The **Storage Worker** executes [`StorageRequest`]s against the database
//!   and posts the results back as events.
//! * **Event Threads** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and the storage worker is handled via `std::sync::mpsc`
//! channels.

mod browser;
mod commander;
mod components;
mod config;
mod events;
mod model;
mod render;
mod status;
mod storage;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{error, info};

use crate::{
    browser::CollectionBrowser,
    commander::Commander,
    components::CollectionTable,
    config::AppConfig,
    events::{AppEvent, process_events},
    model::collection_model::CollectionModel,
    status::StatusLine,
    tasks::StorageRequest,
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// The pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Collections,
    Rows,
}

impl Pane {
    fn toggled(self) -> Self {
        match self {
            Pane::Collections => Pane::Rows,
            Pane::Rows => Pane::Collections,
        }
    }
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub focus: Pane,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub storage_tx: Sender<StorageRequest>,

    pub model: CollectionModel,

    pub browser: CollectionBrowser,
    pub table: CollectionTable,
    pub commander: Commander,
    pub status: StatusLine,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, storage_tx: Sender<StorageRequest>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let model = CollectionModel::new(storage_tx.clone(), event_tx.clone(), config.export_candidates());

        Self {
            config,
            theme: Theme::default(),
            focus: Pane::Collections,
            event_tx,
            event_rx,
            storage_tx,
            model,
            browser: CollectionBrowser::new(),
            table: CollectionTable::new(),
            commander: Commander::new(),
            status: StatusLine::new(),
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    util::logging::init_logging(&config.log_file)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting");

    let (storage_tx, storage_rx) = mpsc::channel();

    let mut app = App::new(config, storage_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, storage_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        error!("Application error: {:#}", e);
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour based on the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the storage worker and the input threads, then enters the main
/// event loop.
///
/// The storage worker announces itself with a `StorageInitialised` event, at
/// which point the collection list is requested. The worker is not joined on
/// exit; SQLite transactions keep the database consistent if it is cut off.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    storage_rx: Receiver<StorageRequest>,
) -> Result<()> {
    tasks::spawn_storage_worker(
        app.config.database_file.clone(),
        storage_rx,
        app.event_tx.clone(),
    );

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read()
                && tx_keys.send(AppEvent::Key(key)).is_err()
            {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
