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

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    events::AppEvent,
    model::{Collection, EntityId, TrackPoint},
    storage,
    tasks::TaskContext,
};

pub(super) fn list_collections(ctx: &mut TaskContext) -> Result<()> {
    let collections = storage::load_collections(ctx.conn)?;
    ctx.event_tx.send(AppEvent::CollectionsLoaded(collections))?;

    Ok(())
}

pub(super) fn create_collection(ctx: &mut TaskContext, name: &str) -> Result<()> {
    let id = storage::create_collection(ctx.conn, name, "")?;
    info!(id, name, "Created collection");

    list_collections(ctx)
}

/// Loads a collection with its tracks and waypoints. A failed load is
/// reported to the model as such rather than as a request error.
pub(super) fn collection_detail(ctx: &mut TaskContext, id: EntityId) -> Result<()> {
    let event = match storage::load_collection_details(ctx.conn, id) {
        Ok(collection) => AppEvent::CollectionDetailsLoaded(collection, true),
        Err(e) => {
            warn!("Failed to load collection {}: {:#}", id, e);
            AppEvent::CollectionDetailsLoaded(Collection::with_id(id), false)
        }
    };
    ctx.event_tx.send(event)?;

    Ok(())
}

pub(super) fn create_waypoint(
    ctx: &mut TaskContext,
    collection_id: EntityId,
    latitude: f64,
    longitude: f64,
    name: &str,
    description: &str,
) -> Result<()> {
    let result = storage::create_waypoint(
        ctx.conn,
        collection_id,
        latitude,
        longitude,
        name,
        description,
        Utc::now(),
    )
    .map(drop);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn create_track(
    ctx: &mut TaskContext,
    collection_id: EntityId,
    name: &str,
    description: &str,
    points: &[TrackPoint],
) -> Result<()> {
    let result =
        storage::create_track(ctx.conn, collection_id, name, description, Utc::now(), points).map(drop);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn edit_waypoint(
    ctx: &mut TaskContext,
    collection_id: EntityId,
    id: EntityId,
    name: &str,
    description: &str,
) -> Result<()> {
    let result = storage::edit_waypoint(ctx.conn, collection_id, id, name, description);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn edit_track(
    ctx: &mut TaskContext,
    collection_id: EntityId,
    id: EntityId,
    name: &str,
    description: &str,
) -> Result<()> {
    let result = storage::edit_track(ctx.conn, collection_id, id, name, description);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn delete_waypoint(ctx: &mut TaskContext, collection_id: EntityId, id: EntityId) -> Result<()> {
    let result = storage::delete_waypoint(ctx.conn, collection_id, id);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn delete_track(ctx: &mut TaskContext, collection_id: EntityId, id: EntityId) -> Result<()> {
    let result = storage::delete_track(ctx.conn, collection_id, id);

    refresh_after(ctx, &[collection_id], result)
}

pub(super) fn move_waypoint(ctx: &mut TaskContext, waypoint_id: EntityId, collection_id: EntityId) -> Result<()> {
    // Look the source up first so it is refreshed even when the move fails.
    let source = storage::waypoint_collection_id(ctx.conn, waypoint_id).ok();
    let result = storage::move_waypoint(ctx.conn, waypoint_id, collection_id).map(drop);

    let affected: Vec<EntityId> = source.into_iter().chain([collection_id]).collect();
    refresh_after(ctx, &affected, result)
}

pub(super) fn move_track(ctx: &mut TaskContext, track_id: EntityId, collection_id: EntityId) -> Result<()> {
    let source = storage::track_collection_id(ctx.conn, track_id).ok();
    let result = storage::move_track(ctx.conn, track_id, collection_id).map(drop);

    let affected: Vec<EntityId> = source.into_iter().chain([collection_id]).collect();
    refresh_after(ctx, &affected, result)
}

pub(super) fn export_collection(ctx: &mut TaskContext, collection_id: EntityId, file: &Path) -> Result<()> {
    match storage::export_collection(ctx.conn, collection_id, file) {
        Ok(()) => {
            info!(collection_id, file = %file.display(), "Exported collection");
            ctx.event_tx.send(AppEvent::CollectionExported(true))?;
            ctx.event_tx
                .send(AppEvent::Info(format!("Exported {}", file.display())))?;
            Ok(())
        }
        Err(e) => {
            ctx.event_tx.send(AppEvent::CollectionExported(false))?;
            Err(e)
        }
    }
}

/// Re-sends the details of every affected collection and the collection
/// list, then hands back the outcome of the change itself.
fn refresh_after(ctx: &mut TaskContext, affected: &[EntityId], result: Result<()>) -> Result<()> {
    for id in affected {
        collection_detail(ctx, *id)?;
    }
    list_collections(ctx)?;

    result
}
