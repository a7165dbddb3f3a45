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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and the domain models. Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Utc};
use rusqlite::{
    Result, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::model::{Collection, Track, TrackPoint, Waypoint};

/// A UTC timestamp as stored in the database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StoredTime(pub(crate) DateTime<Utc>);

impl ToSql for StoredTime {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.timestamp_millis()))
    }
}

impl FromSql for StoredTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let millis = value.as_i64()?;
        DateTime::from_timestamp_millis(millis)
            .map(StoredTime)
            .ok_or(FromSqlError::OutOfRange(millis))
    }
}

impl Collection {
    /// Maps `id, name, description, visible` to a collection header.
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            visible: row.get(3)?,
            waypoints: None,
            tracks: None,
        })
    }
}

impl Waypoint {
    /// Maps `id, collection_id, name, description, symbol, time, latitude,
    /// longitude, elevation` to a [`Waypoint`].
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        let time: StoredTime = row.get(5)?;

        Ok(Self {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            symbol: row.get(4)?,
            time: time.0,
            latitude: row.get(6)?,
            longitude: row.get(7)?,
            elevation: row.get(8)?,
        })
    }
}

impl Track {
    /// Maps `id, collection_id, name, description, time, distance` to a
    /// [`Track`].
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        let time: StoredTime = row.get(4)?;

        Ok(Self {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            time: time.0,
            distance: row.get(5)?,
        })
    }
}

impl TrackPoint {
    /// Maps `segment, latitude, longitude, elevation, time` to a
    /// [`TrackPoint`].
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        let time: Option<StoredTime> = row.get(4)?;

        Ok(Self {
            segment: row.get(0)?,
            latitude: row.get(1)?,
            longitude: row.get(2)?,
            elevation: row.get(3)?,
            time: time.map(|t| t.0),
        })
    }
}
