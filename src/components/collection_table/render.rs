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

//! UI rendering for the collection table.
//!
//! Every cell is looked up through [`CollectionModel::data`], one role per
//! column. Header labels come from the model's role names.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Row, Table},
};

use crate::{
    components::CollectionTable,
    model::collection_model::{CollectionModel, Role, RoleValue, RowKind},
    render::icons::{ICON_TRACK, ICON_WAYPOINT},
    theme::Theme,
    util::format::{format_distance, format_position, format_time},
};

const COLUMN_ROLES: [Role; 4] = [Role::Name, Role::Time, Role::Symbol, Role::Description];

impl CollectionTable {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, model: &CollectionModel, theme: &Theme) {
        let rows = (0..model.row_count()).map(|row| {
            let text = |role| {
                model
                    .data(row, role)
                    .and_then(|value| value.as_text().map(str::to_string))
                    .unwrap_or_default()
            };

            let icon = match model.data(row, Role::Type) {
                Some(RoleValue::Kind(RowKind::Track)) => ICON_TRACK,
                Some(RoleValue::Kind(RowKind::Waypoint)) => ICON_WAYPOINT,
                _ => "",
            };

            let time = match model.data(row, Role::Time) {
                Some(RoleValue::Time(time)) => format_time(&time),
                _ => String::new(),
            };

            Row::new(vec![
                Cell::from(Line::from(icon).style(Style::default().fg(theme.accent_colour))),
                Cell::from(Line::from(text(Role::Name)).style(Style::default().fg(theme.table_name_fg))),
                Cell::from(Line::from(time).style(Style::default().fg(theme.table_time_fg))),
                Cell::from(
                    Line::from(where_column(model, row))
                        .style(Style::default().fg(theme.table_position_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(text(Role::Symbol)).style(Style::default().fg(theme.table_symbol_fg))),
                Cell::from(
                    Line::from(text(Role::Description)).style(Style::default().fg(theme.table_description_fg)),
                ),
            ])
        });

        let mut header = vec![Cell::from("")];
        for role in COLUMN_ROLES {
            header.push(Cell::from(heading(model, role)));
            if role == Role::Time {
                header.push(Cell::from(Line::from("Where").alignment(Alignment::Right)));
            }
        }

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Percentage(30),
                Constraint::Length(16),
                Constraint::Length(22),
                Constraint::Length(10),
                Constraint::Percentage(70),
            ],
        )
        .header(
            Row::new(header)
                .style(Style::default().bold().fg(theme.accent_colour))
                .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
        .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}

/// Position for waypoints, length for tracks.
fn where_column(model: &CollectionModel, row: usize) -> String {
    let number = |role| model.data(row, role).and_then(|value| value.as_number());

    if let Some(distance) = number(Role::Distance) {
        return format_distance(distance);
    }

    match (number(Role::Latitude), number(Role::Longitude)) {
        (Some(latitude), Some(longitude)) => format_position(latitude, longitude),
        _ => String::new(),
    }
}

fn heading(model: &CollectionModel, role: Role) -> String {
    let name = model
        .role_names()
        .into_iter()
        .find_map(|(r, name)| (r == role).then_some(name))
        .unwrap_or_default();

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
