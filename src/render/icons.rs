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

//! Unicode symbols for the TUI.
//!
//! Chosen for coverage in common terminal fonts. The variation selector
//! (`\u{FE0E}`) asks for the monochrome text form so the theme colours apply.

pub(crate) const ICON_TRACK: &str = "\u{21DD}";
pub(crate) const ICON_WAYPOINT: &str = "\u{2691}\u{FE0E}";

pub(crate) const ICON_HIDDEN: &str = "\u{25CC}";
pub(crate) const ICON_BUSY: &str = "\u{231B}\u{FE0E}";
