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

//! Application event loop.
//!
//! Everything that happens in the application arrives as an [`AppEvent`] on
//! a single channel: key presses, periodic ticks, commands typed into the
//! commander, notices from the collection model and the results of storage
//! requests. Events are processed one at a time on the UI thread and the
//! screen is redrawn after each of them.

mod handlers;
mod key_handlers;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::warn;

use crate::{
    App,
    commander::Command,
    model::{Collection, collection_model::ModelNotice},
    render::draw,
};

use handlers::*;
use key_handlers::process_key_event;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,

    Command(Command),
    Model(ModelNotice),

    StorageInitialised,
    StorageInitError(String),
    CollectionsLoaded(Vec<Collection>),
    CollectionDetailsLoaded(Collection, bool),
    CollectionExported(bool),

    Info(String),
    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event);

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Applies a single event to the application state.
///
/// A failed action, such as a request the storage worker can no longer
/// receive, is shown in the status line and the loop carries on.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => {
            let result = process_key_event(app, key);
            report_failure(app, result);
        }
        AppEvent::Tick => {}

        AppEvent::Command(command) => {
            let result = handle_command(app, command);
            report_failure(app, result);
        }
        AppEvent::Model(notice) => handle_model_notice(app, notice),

        AppEvent::StorageInitialised => {
            let result = handle_storage_initialised(app);
            report_failure(app, result);
        }
        AppEvent::StorageInitError(message) => handle_storage_init_error(app, &message),
        AppEvent::CollectionsLoaded(collections) => handle_collections_loaded(app, collections),
        AppEvent::CollectionDetailsLoaded(collection, ok) => {
            handle_collection_details_loaded(app, collection, ok)
        }
        AppEvent::CollectionExported(ok) => handle_collection_exported(app, ok),

        AppEvent::Info(message) => app.status.info(message),
        AppEvent::Error(message) => app.status.error(message),

        AppEvent::ExitApplication => {}
    }
}

fn report_failure(app: &mut App, result: Result<()>) {
    if let Err(e) = result {
        warn!("Action failed: {:#}", e);
        app.status.error(format!("{:#}", e));
    }
}
