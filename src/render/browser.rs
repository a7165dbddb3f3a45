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

//! Render the collections pane.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{browser::CollectionBrowser, model::EntityId, render::icons::ICON_HIDDEN, theme::Theme};

/// Renders the collection list. The open collection is shown in the accent
/// colour, hidden collections are marked.
pub(crate) fn draw_browser(
    f: &mut Frame,
    area: Rect,
    browser: &mut CollectionBrowser,
    open_id: Option<EntityId>,
    is_active: bool,
    theme: &Theme,
) {
    let items: Vec<ListItem> = browser
        .collections
        .iter()
        .map(|c| {
            let marker = if c.visible { " " } else { ICON_HIDDEN };
            let item = ListItem::new(format!("{} {}", marker, c.name));
            if Some(c.id) == open_id {
                item.style(Style::default().fg(theme.accent_colour))
            } else {
                item
            }
        })
        .collect();

    let border_style = if is_active {
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Collections ")
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut browser.state);
}
