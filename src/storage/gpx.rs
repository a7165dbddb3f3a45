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

//! GPX 1.1 export.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::{Collection, Track, TrackPoint, Waypoint};

const CREATOR: &str = concat!("waybook ", env!("CARGO_PKG_VERSION"));

/// Writes `collection` with its waypoints, and `tracks` with their points,
/// as a GPX document.
pub(crate) fn write_gpx<W: Write>(
    out: &mut W,
    collection: &Collection,
    tracks: &[(Track, Vec<TrackPoint>)],
) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<gpx version="1.1" creator="{}" xmlns="http://www.topografix.com/GPX/1/1">"#,
        escape(CREATOR)
    )?;

    writeln!(out, "  <metadata>")?;
    writeln!(out, "    <name>{}</name>", escape(&collection.name))?;
    if !collection.description.is_empty() {
        writeln!(out, "    <desc>{}</desc>", escape(&collection.description))?;
    }
    writeln!(out, "  </metadata>")?;

    for waypoint in collection.waypoints.iter().flatten() {
        write_waypoint(out, waypoint)?;
    }

    for (track, points) in tracks {
        write_track(out, track, points)?;
    }

    writeln!(out, "</gpx>")?;
    out.flush()
}

fn write_waypoint<W: Write>(out: &mut W, waypoint: &Waypoint) -> io::Result<()> {
    writeln!(
        out,
        r#"  <wpt lat="{}" lon="{}">"#,
        waypoint.latitude, waypoint.longitude
    )?;
    if let Some(elevation) = waypoint.elevation {
        writeln!(out, "    <ele>{}</ele>", elevation)?;
    }
    writeln!(out, "    <time>{}</time>", format_time(&waypoint.time))?;
    writeln!(out, "    <name>{}</name>", escape(&waypoint.name))?;
    if !waypoint.description.is_empty() {
        writeln!(out, "    <desc>{}</desc>", escape(&waypoint.description))?;
    }
    if let Some(symbol) = &waypoint.symbol {
        writeln!(out, "    <sym>{}</sym>", escape(symbol))?;
    }
    writeln!(out, "  </wpt>")
}

fn write_track<W: Write>(out: &mut W, track: &Track, points: &[TrackPoint]) -> io::Result<()> {
    writeln!(out, "  <trk>")?;
    writeln!(out, "    <name>{}</name>", escape(&track.name))?;
    if !track.description.is_empty() {
        writeln!(out, "    <desc>{}</desc>", escape(&track.description))?;
    }

    for segment in points.chunk_by(|a, b| a.segment == b.segment) {
        writeln!(out, "    <trkseg>")?;
        for point in segment {
            write!(
                out,
                r#"      <trkpt lat="{}" lon="{}">"#,
                point.latitude, point.longitude
            )?;
            if let Some(elevation) = point.elevation {
                write!(out, "<ele>{}</ele>", elevation)?;
            }
            if let Some(time) = &point.time {
                write!(out, "<time>{}</time>", format_time(time))?;
            }
            writeln!(out, "</trkpt>")?;
        }
        writeln!(out, "    </trkseg>")?;
    }

    writeln!(out, "  </trk>")
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Escapes markup and drops control characters other than tab and line
/// breaks, which XML 1.0 would reject.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}
