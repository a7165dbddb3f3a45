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

//! Keyboard input routing.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{App, Pane, commander::Command, events::AppEvent};

/// Maps a key press to an application action.
///
/// The commander sees the key first. When it is not active, the focused pane
/// gets a chance to consume the key before the global bindings apply.
///
/// # Errors
///
/// Returns an error if an event or request cannot be posted.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    let handled = match app.focus {
        Pane::Collections => process_collections_key_event(app, key)?,
        Pane::Rows => {
            app.table.process_event(&event, app.model.row_count()) || process_rows_key_event(app, key)?
        }
    };

    if !handled {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggled(),
        KeyCode::Char('r') => app.event_tx.send(AppEvent::Command(Command::Reload))?,
        _ => {}
    }

    Ok(())
}

fn process_collections_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.browser.next(),
        KeyCode::Char('k') | KeyCode::Up => app.browser.previous(),

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if let Some(id) = app.browser.selected_id() {
                app.event_tx.send(AppEvent::Command(Command::Open(id)))?;
                app.focus = Pane::Rows;
            }
        }

        _ => return Ok(false),
    }

    Ok(true)
}

fn process_rows_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.focus = Pane::Collections,

        KeyCode::Char('d') => app.event_tx.send(AppEvent::Command(Command::Remove))?,
        KeyCode::Char('x') => app.event_tx.send(AppEvent::Command(Command::Export {
            file: None,
            directory: None,
        }))?,

        KeyCode::Char('e') => {
            let name = app
                .table
                .selected()
                .and_then(|row| app.model.row(row))
                .map(|row| row.name().to_string())
                .unwrap_or_default();
            app.commander.prefill(&format!("name {}", name));
        }
        KeyCode::Char('m') => app.commander.prefill("mv "),

        _ => return Ok(false),
    }

    Ok(true)
}
