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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, collections
//! of waypoints and tracks, along with the view-model that presents a single
//! collection to the user interface.

pub(crate) mod collection_model;
pub(crate) mod reconcile;

use chrono::{DateTime, Utc};

pub(crate) type EntityId = i64;

const FILESYSTEM_FALLBACK_NAME: &str = "collection";

/// Anything with a stable integer identity that can be shown as a list row.
pub(crate) trait Identified {
    fn id(&self) -> EntityId;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Collection {
    pub(crate) id: EntityId,
    pub(crate) visible: bool,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) waypoints: Option<Vec<Waypoint>>,
    pub(crate) tracks: Option<Vec<Track>>,
}

impl Collection {
    /// A bare header carrying only an id, used while details are requested.
    pub(crate) fn with_id(id: EntityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Returns the collection name made safe for use as a file name.
    ///
    /// Path separators, reserved characters and control characters are
    /// replaced with `_`.
    pub(crate) fn filesystem_name(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();

        let name = name.trim().trim_matches('.');
        if name.is_empty() {
            FILESYSTEM_FALLBACK_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Waypoint {
    pub(crate) id: EntityId,
    pub(crate) collection_id: EntityId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) symbol: Option<String>,
    pub(crate) time: DateTime<Utc>,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) elevation: Option<f64>,
}

impl Identified for Waypoint {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Track {
    pub(crate) id: EntityId,
    pub(crate) collection_id: EntityId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) time: DateTime<Utc>,
    /// Length in metres.
    pub(crate) distance: f64,
}

impl Identified for Track {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackPoint {
    pub(crate) segment: i64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) elevation: Option<f64>,
    pub(crate) time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Collection {
        Collection {
            name: name.to_string(),
            ..Collection::with_id(1)
        }
    }

    #[test]
    fn filesystem_name_replaces_reserved_characters() {
        assert_eq!(named("Trips: 2024/25").filesystem_name(), "Trips_ 2024_25");
        assert_eq!(named("a<b>c|d?e*f\"g\\h").filesystem_name(), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn filesystem_name_falls_back_when_empty() {
        assert_eq!(named("").filesystem_name(), "collection");
        assert_eq!(named("  ..  ").filesystem_name(), "collection");
    }

    #[test]
    fn filesystem_name_keeps_unicode() {
        assert_eq!(named("Výlety po Šumavě").filesystem_name(), "Výlety po Šumavě");
    }
}
