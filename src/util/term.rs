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

//! Terminal emulator background control.
//!
//! Uses the OSC 11 and OSC 111 escape sequences, understood by XTerm and
//! most emulators derived from it. Terminals without support ignore them.

use std::io::{self, Write};

const OSC_SET_BACKGROUND: &str = "\x1b]11;";
const OSC_RESET_BACKGROUND: &str = "\x1b]111";
const BEL: &str = "\x07";

/// Paints the whole terminal window with `hex_colour` (`"#rrggbb"`), so no
/// border of the default background shows around the UI.
pub(crate) fn set_terminal_bg(hex_colour: &str) {
    write_sequence(&format!("{}{}{}", OSC_SET_BACKGROUND, hex_colour, BEL));
}

/// Restores the user's own background colour.
pub(crate) fn reset_terminal_bg() {
    write_sequence(&format!("{}{}", OSC_RESET_BACKGROUND, BEL));
}

fn write_sequence(sequence: &str) {
    let mut stdout = io::stdout();
    stdout.write_all(sequence.as_bytes()).ok();
    stdout.flush().ok();
}
