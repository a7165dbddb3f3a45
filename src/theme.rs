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

//! Visual styling and colour configuration for the TUI.
//!
//! This module defines the application's colour palette and converts colours
//! to the hexadecimal form terminal emulators accept in escape sequences.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) inactive_colour: Color,

    pub(crate) highlight_bg: Color,
    pub(crate) highlight_fg: Color,

    pub(crate) bar_bg: Color,
    pub(crate) commander_colour: Color,
    pub(crate) info_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) table_name_fg: Color,
    pub(crate) table_time_fg: Color,
    pub(crate) table_position_fg: Color,
    pub(crate) table_symbol_fg: Color,
    pub(crate) table_description_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(20, 36, 32),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            inactive_colour: Color::Rgb(130, 140, 135),

            highlight_bg: Color::Rgb(38, 90, 72),
            highlight_fg: Color::Rgb(255, 255, 255),

            bar_bg: Color::Rgb(30, 50, 44),
            commander_colour: Color::Rgb(255, 255, 255),
            info_colour: Color::Rgb(162, 200, 166),
            error_colour: Color::Rgb(240, 98, 88),

            table_name_fg: Color::Rgb(255, 255, 255),
            table_time_fg: Color::Rgb(162, 161, 166),
            table_position_fg: Color::Rgb(129, 199, 212),
            table_symbol_fg: Color::Rgb(179, 157, 219),
            table_description_fg: Color::Rgb(162, 161, 166),
        }
    }

    /// Converts an RGB colour into a CSS-style hexadecimal string, or `None`
    /// for named and indexed colours.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_only_for_rgb() {
        assert_eq!(Theme::to_hex(Color::Rgb(20, 36, 255)), Some("#1424ff".to_string()));
        assert_eq!(Theme::to_hex(Color::Blue), None);
    }
}
