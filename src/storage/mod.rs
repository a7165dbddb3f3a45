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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database: schema
//! creation, loading collections with their tracks and waypoints, the edits
//! requested by the user and GPX export.
//!
//! # Tables
//!
//! * `collections` - Named groups of waypoints and tracks.
//! * `waypoints` - Single labelled positions, linked to a collection.
//! * `tracks` - Named paths with their total length, linked to a collection.
//! * `track_points` - The ordered positions of each track, split in segments.
//!
//! # Performance
//!
//! Most functions in this module use [`rusqlite::Connection::prepare_cached`]
//! to reduce SQL parsing overhead.

pub(crate) mod gpx;
mod model;

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

use crate::{
    model::{Collection, EntityId, Track, TrackPoint, Waypoint},
    util::geo,
};

use model::StoredTime;

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
/// * **Constraints**: Enforces foreign key integrity, which also rejects
///   moves into collections that do not exist.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, the PRAGMA
/// configuration fails, or the schema cannot be created.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(32);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// Child rows are removed with their parent via `ON DELETE CASCADE`, and
/// every foreign key is indexed.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            visible INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS waypoints (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            symbol TEXT,
            time INTEGER NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            elevation REAL,
            FOREIGN KEY (collection_id) REFERENCES collections (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_waypoints_collection_id ON waypoints (collection_id);

        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            time INTEGER NOT NULL,
            distance REAL NOT NULL DEFAULT 0,
            FOREIGN KEY (collection_id) REFERENCES collections (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_collection_id ON tracks (collection_id);

        CREATE TABLE IF NOT EXISTS track_points (
            track_id INTEGER NOT NULL,
            segment INTEGER NOT NULL,
            seq INTEGER NOT NULL,
            time INTEGER,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            elevation REAL,
            PRIMARY KEY (track_id, segment, seq),
            FOREIGN KEY (track_id) REFERENCES tracks (id) ON DELETE CASCADE
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches all collection headers, sorted by name.
pub(crate) fn load_collections(conn: &Connection) -> Result<Vec<Collection>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, description, visible FROM collections ORDER BY name, id",
    )?;
    let results = stmt
        .query_map([], Collection::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Fetches a collection together with its tracks and waypoints.
///
/// Tracks and waypoints are each ordered by time, then name.
///
/// # Errors
///
/// Returns an error if the collection does not exist or a query fails.
pub(crate) fn load_collection_details(conn: &Connection, collection_id: EntityId) -> Result<Collection> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, description, visible FROM collections WHERE id = ?")?;
    let mut collection = stmt
        .query_row([collection_id], Collection::from_row)
        .with_context(|| format!("Collection {} not found", collection_id))?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, collection_id, name, description, time, distance
         FROM tracks
         WHERE collection_id = ?
         ORDER BY time, name, id",
    )?;
    let tracks = stmt
        .query_map([collection_id], Track::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, collection_id, name, description, symbol, time, latitude, longitude, elevation
         FROM waypoints
         WHERE collection_id = ?
         ORDER BY time, name, id",
    )?;
    let waypoints = stmt
        .query_map([collection_id], Waypoint::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    collection.tracks = Some(tracks);
    collection.waypoints = Some(waypoints);

    Ok(collection)
}

pub(crate) fn create_collection(conn: &Connection, name: &str, description: &str) -> Result<EntityId> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO collections (name, description) VALUES (?1, ?2)")?;
    stmt.execute(params![name, description])?;

    Ok(conn.last_insert_rowid())
}

pub(crate) fn create_waypoint(
    conn: &Connection,
    collection_id: EntityId,
    latitude: f64,
    longitude: f64,
    name: &str,
    description: &str,
    time: DateTime<Utc>,
) -> Result<EntityId> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO waypoints (collection_id, name, description, time, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        collection_id,
        name,
        description,
        StoredTime(time),
        latitude,
        longitude
    ])
    .with_context(|| format!("Failed to add waypoint to collection {}", collection_id))?;

    Ok(conn.last_insert_rowid())
}

/// Stores a track and its points in one transaction. The track distance is
/// computed from the points.
pub(crate) fn create_track(
    conn: &mut Connection,
    collection_id: EntityId,
    name: &str,
    description: &str,
    time: DateTime<Utc>,
    points: &[TrackPoint],
) -> Result<EntityId> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO tracks (collection_id, name, description, time, distance)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            collection_id,
            name,
            description,
            StoredTime(time),
            geo::track_length(points)
        ],
    )
    .with_context(|| format!("Failed to add track to collection {}", collection_id))?;
    let track_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO track_points (track_id, segment, seq, time, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (seq, point) in points.iter().enumerate() {
            stmt.execute(params![
                track_id,
                point.segment,
                seq as i64,
                point.time.map(StoredTime),
                point.latitude,
                point.longitude,
                point.elevation
            ])?;
        }
    }

    tx.commit()?;

    Ok(track_id)
}

pub(crate) fn load_track_points(conn: &Connection, track_id: EntityId) -> Result<Vec<TrackPoint>> {
    let mut stmt = conn.prepare_cached(
        "SELECT segment, latitude, longitude, elevation, time
         FROM track_points
         WHERE track_id = ?
         ORDER BY segment, seq",
    )?;
    let results = stmt
        .query_map([track_id], TrackPoint::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

pub(crate) fn edit_waypoint(
    conn: &Connection,
    collection_id: EntityId,
    id: EntityId,
    name: &str,
    description: &str,
) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE waypoints SET name = ?3, description = ?4 WHERE id = ?2 AND collection_id = ?1",
    )?;
    let changed = stmt.execute(params![collection_id, id, name, description])?;
    ensure_changed(changed, "Waypoint", id, collection_id)
}

pub(crate) fn edit_track(
    conn: &Connection,
    collection_id: EntityId,
    id: EntityId,
    name: &str,
    description: &str,
) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE tracks SET name = ?3, description = ?4 WHERE id = ?2 AND collection_id = ?1",
    )?;
    let changed = stmt.execute(params![collection_id, id, name, description])?;
    ensure_changed(changed, "Track", id, collection_id)
}

pub(crate) fn delete_waypoint(conn: &Connection, collection_id: EntityId, id: EntityId) -> Result<()> {
    let mut stmt = conn.prepare_cached("DELETE FROM waypoints WHERE id = ?2 AND collection_id = ?1")?;
    let changed = stmt.execute(params![collection_id, id])?;
    ensure_changed(changed, "Waypoint", id, collection_id)
}

pub(crate) fn delete_track(conn: &Connection, collection_id: EntityId, id: EntityId) -> Result<()> {
    let mut stmt = conn.prepare_cached("DELETE FROM tracks WHERE id = ?2 AND collection_id = ?1")?;
    let changed = stmt.execute(params![collection_id, id])?;
    ensure_changed(changed, "Track", id, collection_id)
}

/// Moves a waypoint into another collection, returning the collection it was
/// moved out of.
pub(crate) fn move_waypoint(conn: &Connection, waypoint_id: EntityId, collection_id: EntityId) -> Result<EntityId> {
    let source = waypoint_collection_id(conn, waypoint_id)?;

    let mut stmt = conn.prepare_cached("UPDATE waypoints SET collection_id = ?2 WHERE id = ?1")?;
    stmt.execute(params![waypoint_id, collection_id])
        .with_context(|| format!("Failed to move waypoint {} to collection {}", waypoint_id, collection_id))?;

    Ok(source)
}

/// Moves a track into another collection, returning the collection it was
/// moved out of.
pub(crate) fn move_track(conn: &Connection, track_id: EntityId, collection_id: EntityId) -> Result<EntityId> {
    let source = track_collection_id(conn, track_id)?;

    let mut stmt = conn.prepare_cached("UPDATE tracks SET collection_id = ?2 WHERE id = ?1")?;
    stmt.execute(params![track_id, collection_id])
        .with_context(|| format!("Failed to move track {} to collection {}", track_id, collection_id))?;

    Ok(source)
}

pub(crate) fn waypoint_collection_id(conn: &Connection, waypoint_id: EntityId) -> Result<EntityId> {
    let mut stmt = conn.prepare_cached("SELECT collection_id FROM waypoints WHERE id = ?")?;
    stmt.query_row([waypoint_id], |r| r.get(0))
        .with_context(|| format!("Waypoint {} not found", waypoint_id))
}

pub(crate) fn track_collection_id(conn: &Connection, track_id: EntityId) -> Result<EntityId> {
    let mut stmt = conn.prepare_cached("SELECT collection_id FROM tracks WHERE id = ?")?;
    stmt.query_row([track_id], |r| r.get(0))
        .with_context(|| format!("Track {} not found", track_id))
}

/// Writes the collection, including every track's points, to `file` as GPX.
///
/// The file is created or truncated; its directory must already exist.
pub(crate) fn export_collection(conn: &Connection, collection_id: EntityId, file: &Path) -> Result<()> {
    let collection = load_collection_details(conn, collection_id)?;

    let mut tracks = Vec::new();
    for track in collection.tracks.iter().flatten() {
        let points = load_track_points(conn, track.id)?;
        tracks.push((track.clone(), points));
    }

    let out = File::create(file).with_context(|| format!("Failed to create {}", file.display()))?;
    let mut out = BufWriter::new(out);
    gpx::write_gpx(&mut out, &collection, &tracks)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    Ok(())
}

fn ensure_changed(changed: usize, kind: &str, id: EntityId, collection_id: EntityId) -> Result<()> {
    if changed == 0 {
        bail!("{} {} not found in collection {}", kind, id, collection_id);
    }

    Ok(())
}
