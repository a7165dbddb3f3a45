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

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::{
    App,
    commander::{Command, CommandError},
    events::AppEvent,
    model::{
        Collection, EntityId, TrackPoint,
        collection_model::{ModelNotice, RowKind},
    },
    tasks::StorageRequest,
};

const GPX_EXTENSION: &str = "gpx";
const NO_EXPORT_DIRECTORY: &str = "No export directory available";

/// Owned copy of the selected row, so the model can be mutated while acting
/// on it.
struct SelectedRow {
    kind: RowKind,
    id: EntityId,
    name: String,
    description: String,
}

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Open(id) => open_collection(app, id)?,
        Command::NewCollection(name) => app.storage_tx.send(StorageRequest::CreateCollection { name })?,

        Command::NewWaypoint {
            latitude,
            longitude,
            name,
        } => app.model.create_waypoint(latitude, longitude, &name, "")?,
        Command::NewTrack { name, points } => {
            let points = points
                .into_iter()
                .map(|(latitude, longitude)| TrackPoint {
                    segment: 0,
                    latitude,
                    longitude,
                    elevation: None,
                    time: None,
                })
                .collect();
            app.model.create_track(&name, "", points)?
        }

        Command::Rename(name) => edit_selected(app, Some(&name), None)?,
        Command::Describe(text) => edit_selected(app, None, Some(&text))?,
        Command::Move(collection_id) => move_selected(app, collection_id)?,
        Command::Remove => remove_selected(app)?,

        Command::Export { file, directory } => export(app, file, directory)?,
        Command::Directories => list_directories(app),

        Command::Reload => reload(app)?,
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

pub(super) fn handle_model_notice(app: &mut App, notice: ModelNotice) {
    match notice {
        ModelNotice::Error(message) => app.status.error(message),
        // The views read these flags straight from the model when drawing.
        ModelNotice::LoadingChanged | ModelNotice::ExportingChanged => {
            debug!(?notice, "Model state changed")
        }
    }
}

pub(super) fn handle_storage_initialised(app: &mut App) -> Result<()> {
    app.storage_tx.send(StorageRequest::ListCollections)?;

    match (app.model.collection_id(), app.config.initial_collection) {
        (Some(_), _) => app.model.storage_initialised()?,
        (None, Some(id)) => open_collection(app, id)?,
        (None, None) => {}
    }

    Ok(())
}

pub(super) fn handle_storage_init_error(app: &mut App, message: &str) {
    app.model.storage_init_error(message);
}

pub(super) fn handle_collections_loaded(app: &mut App, collections: Vec<Collection>) {
    app.browser.set_collections(collections);
}

pub(super) fn handle_collection_details_loaded(app: &mut App, collection: Collection, ok: bool) {
    app.model.collection_details_loaded(collection, ok);

    let changes = app.model.take_changes();
    app.table.apply_changes(&changes, app.model.row_count());
}

pub(super) fn handle_collection_exported(app: &mut App, ok: bool) {
    app.model.collection_exported(ok);
}

fn open_collection(app: &mut App, id: EntityId) -> Result<()> {
    app.model.set_collection_id(id)?;
    app.browser.select_id(id);

    Ok(())
}

fn selected_row(app: &mut App) -> Option<SelectedRow> {
    let row = app
        .table
        .selected()
        .filter(|row| app.model.flags(*row).selectable)
        .and_then(|row| app.model.row(row));

    match row {
        Some(row) => Some(SelectedRow {
            kind: row.kind(),
            id: row.id(),
            name: row.name().to_string(),
            description: row.description().to_string(),
        }),
        None => {
            app.status.error(CommandError::NoSelection.to_string());
            None
        }
    }
}

fn edit_selected(app: &mut App, name: Option<&str>, description: Option<&str>) -> Result<()> {
    let Some(row) = selected_row(app) else {
        return Ok(());
    };

    let name = name.unwrap_or(&row.name);
    let description = description.unwrap_or(&row.description);

    match row.kind {
        RowKind::Track => app.model.edit_track(row.id, name, description),
        RowKind::Waypoint => app.model.edit_waypoint(row.id, name, description),
    }
}

fn move_selected(app: &mut App, collection_id: EntityId) -> Result<()> {
    let Some(row) = selected_row(app) else {
        return Ok(());
    };

    match row.kind {
        RowKind::Track => app.model.move_track(row.id, collection_id),
        RowKind::Waypoint => app.model.move_waypoint(row.id, collection_id),
    }
}

fn remove_selected(app: &mut App) -> Result<()> {
    let Some(row) = selected_row(app) else {
        return Ok(());
    };

    match row.kind {
        RowKind::Track => app.model.delete_track(row.id),
        RowKind::Waypoint => app.model.delete_waypoint(row.id),
    }
}

/// Exports the active collection. Without a file name the collection's file
/// system name is used; without a directory, the first suggested one.
fn export(app: &mut App, file: Option<String>, directory: Option<PathBuf>) -> Result<()> {
    let directory = directory.or_else(|| app.model.export_suggested_directories().into_iter().next());
    let Some(directory) = directory else {
        app.status.error(NO_EXPORT_DIRECTORY.to_string());
        return Ok(());
    };

    let file = file.unwrap_or_else(|| format!("{}.{}", app.model.filesystem_name(), GPX_EXTENSION));

    app.model.export_to_file(&file, &directory)?;
    if app.model.is_exporting() {
        app.status
            .info(format!("Exporting to {}", directory.join(&file).display()));
    }

    Ok(())
}

fn list_directories(app: &mut App) {
    let dirs = app.model.export_suggested_directories();
    if dirs.is_empty() {
        app.status.error(NO_EXPORT_DIRECTORY.to_string());
        return;
    }

    let dirs: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
    app.status.info(format!("Export directories: {}", dirs.join(", ")));
}

fn reload(app: &mut App) -> Result<()> {
    app.storage_tx.send(StorageRequest::ListCollections)?;
    if let Some(id) = app.model.collection_id() {
        app.model.set_collection_id(id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::{config::AppConfig, model::Waypoint, status::Severity, tests::TestApp};

    fn waypoint(id: EntityId, name: &str) -> Waypoint {
        Waypoint {
            id,
            collection_id: 1,
            name: name.to_string(),
            description: "note".to_string(),
            symbol: None,
            time: DateTime::from_timestamp(0, 0).unwrap(),
            latitude: 50.0,
            longitude: 14.0,
            elevation: None,
        }
    }

    /// Opens collection 1 and feeds it the given waypoints.
    fn open_with(test: &mut TestApp, name: &str, waypoints: Vec<Waypoint>) {
        handle_command(&mut test.app, Command::Open(1)).unwrap();
        let collection = Collection {
            name: name.to_string(),
            visible: true,
            waypoints: Some(waypoints),
            tracks: Some(vec![]),
            ..Collection::with_id(1)
        };
        handle_collection_details_loaded(&mut test.app, collection, true);
        test.drain();
        test.requests();
    }

    #[test]
    fn storage_ready_lists_collections_and_opens_the_initial_one() {
        let mut test = TestApp::with_config(AppConfig {
            initial_collection: Some(3),
            ..AppConfig::default()
        });

        handle_storage_initialised(&mut test.app).unwrap();

        assert_eq!(
            test.requests(),
            vec![StorageRequest::ListCollections, StorageRequest::CollectionDetail(3)]
        );
        assert_eq!(test.app.model.collection_id(), Some(3));
    }

    #[test]
    fn loaded_rows_get_a_selection() {
        let mut test = TestApp::new();

        open_with(&mut test, "Alps", vec![waypoint(10, "Hut"), waypoint(11, "Pass")]);

        assert_eq!(test.app.model.row_count(), 2);
        assert_eq!(test.app.table.selected(), Some(0));
    }

    #[test]
    fn rename_keeps_the_description() {
        let mut test = TestApp::new();
        open_with(&mut test, "Alps", vec![waypoint(10, "Hut"), waypoint(11, "Pass")]);
        test.app.table.table_state.select(Some(1));

        handle_command(&mut test.app, Command::Rename("Col".to_string())).unwrap();

        assert_eq!(
            test.requests(),
            vec![StorageRequest::EditWaypoint {
                collection_id: 1,
                id: 11,
                name: "Col".to_string(),
                description: "note".to_string(),
            }]
        );
    }

    #[test]
    fn remove_without_selection_reports_an_error() {
        let mut test = TestApp::new();
        open_with(&mut test, "Empty", vec![]);

        handle_command(&mut test.app, Command::Remove).unwrap();

        assert!(test.requests().is_empty());
        assert_eq!(
            test.app.status.message(),
            Some((Severity::Error, "No row selected"))
        );
    }

    #[test]
    fn move_forwards_the_selected_waypoint() {
        let mut test = TestApp::new();
        open_with(&mut test, "Alps", vec![waypoint(10, "Hut")]);

        handle_command(&mut test.app, Command::Move(2)).unwrap();

        assert_eq!(
            test.requests(),
            vec![StorageRequest::MoveWaypoint {
                waypoint_id: 10,
                collection_id: 2,
            }]
        );
    }

    #[test]
    fn new_track_is_a_single_segment() {
        let mut test = TestApp::new();
        open_with(&mut test, "Alps", vec![]);

        handle_command(
            &mut test.app,
            Command::NewTrack {
                name: "Loop".to_string(),
                points: vec![(1.0, 2.0), (3.0, 4.0)],
            },
        )
        .unwrap();

        match test.requests().as_slice() {
            [StorageRequest::CreateTrack { collection_id, name, points, .. }] => {
                assert_eq!(*collection_id, 1);
                assert_eq!(name, "Loop");
                assert_eq!(points.len(), 2);
                assert!(points.iter().all(|p| p.segment == 0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn export_defaults_to_collection_name_and_first_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut test = TestApp::with_config(AppConfig {
            export_dirs: vec![dir.path().display().to_string()],
            ..AppConfig::default()
        });
        open_with(&mut test, "Alps/2024", vec![]);

        handle_command(
            &mut test.app,
            Command::Export {
                file: None,
                directory: None,
            },
        )
        .unwrap();

        assert_eq!(
            test.requests(),
            vec![StorageRequest::ExportCollection {
                collection_id: 1,
                file: dir.path().join("Alps_2024.gpx"),
            }]
        );
        assert!(test.app.model.is_exporting());
    }

    #[test]
    fn export_without_directories_reports_an_error() {
        let mut test = TestApp::with_config(AppConfig {
            export_dirs: vec!["/nonexistent/waybook".to_string()],
            ..AppConfig::default()
        });
        open_with(&mut test, "Alps", vec![]);

        handle_command(
            &mut test.app,
            Command::Export {
                file: None,
                directory: None,
            },
        )
        .unwrap();

        assert!(test.requests().is_empty());
        assert_eq!(
            test.app.status.message(),
            Some((Severity::Error, NO_EXPORT_DIRECTORY))
        );
    }

    #[test]
    fn actions_without_a_collection_surface_the_model_error() {
        let mut test = TestApp::new();

        handle_command(
            &mut test.app,
            Command::NewWaypoint {
                latitude: 1.0,
                longitude: 2.0,
                name: "X".to_string(),
            },
        )
        .unwrap();
        test.drain();

        assert!(test.requests().is_empty());
        assert_eq!(
            test.app.status.message(),
            Some((Severity::Error, "No collection selected"))
        );
    }

    #[test]
    fn reload_refreshes_list_and_active_collection() {
        let mut test = TestApp::new();
        open_with(&mut test, "Alps", vec![]);

        handle_command(&mut test.app, Command::Reload).unwrap();

        assert_eq!(
            test.requests(),
            vec![StorageRequest::ListCollections, StorageRequest::CollectionDetail(1)]
        );
    }
}
