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

//! Render the status line.

use ratatui::{Frame, layout::Rect, style::Style, widgets::Paragraph};

use crate::{App, status::Severity};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let (colour, text) = match app.status.message() {
        Some((Severity::Info, text)) => (app.theme.info_colour, text),
        Some((Severity::Error, text)) => (app.theme.error_colour, text),
        None => (app.theme.inactive_colour, ""),
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour).bg(app.theme.bar_bg)),
        area,
    );
}
