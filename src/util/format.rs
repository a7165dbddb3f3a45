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

//! Display formatting for the collection table.

use chrono::{DateTime, Utc};

/// Formats a distance in metres, switching to kilometres from 1 km up.
///
/// ```ignore
/// assert_eq!(format_distance(850.4), "850 m");
/// assert_eq!(format_distance(12_346.0), "12.35 km");
/// ```
pub(crate) fn format_distance(metres: f64) -> String {
    if metres < 1000.0 {
        format!("{:.0} m", metres)
    } else {
        format!("{:.2} km", metres / 1000.0)
    }
}

/// Formats a position as signed decimal degrees with five decimals, which is
/// about a metre of precision.
pub(crate) fn format_position(latitude: f64, longitude: f64) -> String {
    format!("{:.5}, {:.5}", latitude, longitude)
}

pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
