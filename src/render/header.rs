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

//! Render the header of the active collection.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    App, Pane,
    render::icons::{ICON_BUSY, ICON_HIDDEN},
};

pub(crate) fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let model = &app.model;
    let theme = &app.theme;

    let mut title = vec![];
    if model.collection_id().is_some() {
        let name = if model.name().is_empty() { "(untitled)" } else { model.name() };
        title.push(Span::styled(
            name.to_string(),
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
        ));
        title.push(Span::raw(format!("  {} rows", model.row_count())));
        if !model.is_visible() {
            title.push(Span::styled(format!("  {} hidden", ICON_HIDDEN), Style::default().fg(theme.inactive_colour)));
        }
        if model.is_loading() {
            title.push(Span::raw(format!("  {} loading", ICON_BUSY)));
        }
        if model.is_exporting() {
            title.push(Span::raw(format!("  {} exporting", ICON_BUSY)));
        }
    } else {
        title.push(Span::styled("No collection open", Style::default().fg(theme.inactive_colour)));
    }

    let border_colour = if app.focus == Pane::Rows {
        theme.accent_colour
    } else {
        theme.border_colour
    };

    let header = Paragraph::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            model.description().to_string(),
            Style::default().fg(theme.table_description_fg),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(border_colour)));

    f.render_widget(header, area);
}
