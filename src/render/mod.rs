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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event.

mod browser;
mod commander;
mod header;
pub(crate) mod icons;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    App, Pane,
    render::{browser::draw_browser, commander::draw_commander, header::draw_header, status::draw_status},
};

const BROWSER_WIDTH: u16 = 28;

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the collections pane on the left and the active
/// collection on the right, with the status line and commander at the
/// bottom.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, status, commander
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Main layout: collections, content
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BROWSER_WIDTH), Constraint::Min(0)])
        .split(outer[0]);

    // Content layout: header, table
    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(main[1]);

    draw_browser(
        f,
        main[0],
        &mut app.browser,
        app.model.collection_id(),
        app.focus == Pane::Collections,
        &app.theme,
    );

    draw_header(f, content[0], app);
    app.table.draw(f, content[1], &app.model, &app.theme);

    draw_status(f, outer[1], app);
    draw_commander(f, outer[2], app);
}
