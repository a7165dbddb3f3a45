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

//! Storage worker.
//!
//! This module offloads all database work from the UI thread. The worker owns
//! the SQLite connection, processes [`StorageRequest`]s strictly in the order
//! they were sent and reports results back to the application as
//! [`AppEvent`]s.
//!
//! Every request that changes a collection is answered with fresh details of
//! the affected collections, so the collection model never has to guess what
//! storage looks like after an edit.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, error, info, warn};

use crate::{
    events::AppEvent,
    model::{EntityId, TrackPoint},
    storage,
};

use handlers::*;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StorageRequest {
    ListCollections,
    CreateCollection {
        name: String,
    },

    CollectionDetail(EntityId),

    CreateWaypoint {
        collection_id: EntityId,
        latitude: f64,
        longitude: f64,
        name: String,
        description: String,
    },
    CreateTrack {
        collection_id: EntityId,
        name: String,
        description: String,
        points: Vec<TrackPoint>,
    },

    EditWaypoint {
        collection_id: EntityId,
        id: EntityId,
        name: String,
        description: String,
    },
    EditTrack {
        collection_id: EntityId,
        id: EntityId,
        name: String,
        description: String,
    },

    DeleteWaypoint {
        collection_id: EntityId,
        id: EntityId,
    },
    DeleteTrack {
        collection_id: EntityId,
        id: EntityId,
    },

    MoveWaypoint {
        waypoint_id: EntityId,
        collection_id: EntityId,
    },
    MoveTrack {
        track_id: EntityId,
        collection_id: EntityId,
    },

    ExportCollection {
        collection_id: EntityId,
        file: PathBuf,
    },
}

/// Spawns the storage worker thread.
///
/// The worker opens the database at `database_file` and announces the
/// outcome with [`AppEvent::StorageInitialised`] or
/// [`AppEvent::StorageInitError`]; in the latter case it exits immediately.
/// Otherwise it processes requests until every sender has been dropped.
///
/// # Arguments
///
/// * `database_file` - Path of the SQLite database.
/// * `request_rx` - The receiving end of the request channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_storage_worker(
    database_file: String,
    request_rx: Receiver<StorageRequest>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut conn = match storage::init_db(&database_file) {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to initialise storage: {:#}", e);
                event_tx.send(AppEvent::StorageInitError(format!("{:#}", e))).ok();
                return;
            }
        };

        info!(database = %database_file, "Storage initialised");
        if event_tx.send(AppEvent::StorageInitialised).is_err() {
            return;
        }

        while let Ok(request) = request_rx.recv() {
            debug!(?request, "Storage request");

            let mut ctx = TaskContext {
                event_tx: &event_tx,
                conn: &mut conn,
            };

            if let Err(e) = handle_request(request, &mut ctx) {
                warn!("Storage request failed: {:#}", e);
                event_tx.send(AppEvent::Error(format!("{:#}", e))).ok();
            }
        }

        debug!("Storage worker stopped");
    })
}

/// Bundles shared resources required by request handlers.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

fn handle_request(request: StorageRequest, ctx: &mut TaskContext) -> Result<()> {
    match request {
        StorageRequest::ListCollections => list_collections(ctx),
        StorageRequest::CreateCollection { name } => create_collection(ctx, &name),

        StorageRequest::CollectionDetail(id) => collection_detail(ctx, id),

        StorageRequest::CreateWaypoint {
            collection_id,
            latitude,
            longitude,
            name,
            description,
        } => create_waypoint(ctx, collection_id, latitude, longitude, &name, &description),
        StorageRequest::CreateTrack {
            collection_id,
            name,
            description,
            points,
        } => create_track(ctx, collection_id, &name, &description, &points),

        StorageRequest::EditWaypoint {
            collection_id,
            id,
            name,
            description,
        } => edit_waypoint(ctx, collection_id, id, &name, &description),
        StorageRequest::EditTrack {
            collection_id,
            id,
            name,
            description,
        } => edit_track(ctx, collection_id, id, &name, &description),

        StorageRequest::DeleteWaypoint { collection_id, id } => delete_waypoint(ctx, collection_id, id),
        StorageRequest::DeleteTrack { collection_id, id } => delete_track(ctx, collection_id, id),

        StorageRequest::MoveWaypoint {
            waypoint_id,
            collection_id,
        } => move_waypoint(ctx, waypoint_id, collection_id),
        StorageRequest::MoveTrack {
            track_id,
            collection_id,
        } => move_track(ctx, track_id, collection_id),

        StorageRequest::ExportCollection { collection_id, file } => {
            export_collection(ctx, collection_id, &file)
        }
    }
}
