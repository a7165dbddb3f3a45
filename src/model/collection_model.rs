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

//! View-model for a single collection.
//!
//! [`CollectionModel`] presents the tracks and waypoints of the active
//! collection as a flat, row-indexed list whose cells are looked up by
//! [`Role`], which is all the views need to render it. It never touches the
//! database: user actions are forwarded to the storage worker as
//! [`StorageRequest`]s, and the worker's answers come back through the
//! `collection_*` / `storage_*` handlers, where freshly loaded lists are
//! reconciled onto the displayed ones.
//!
//! Rows are laid out tracks first, then waypoints.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    events::AppEvent,
    model::{
        Collection, EntityId, Track, TrackPoint, Waypoint,
        reconcile::{ListChange, reconcile},
    },
    tasks::StorageRequest,
};

/// First role number available to the application, as in most UI binding
/// layers.
pub(crate) const USER_ROLE: i32 = 0x0100;

const NO_COLLECTION_SELECTED: &str = "No collection selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub(crate) enum Role {
    Name = USER_ROLE,
    Description,
    Type,
    Id,
    Time,

    // Waypoint rows only
    Symbol,
    Latitude,
    Longitude,

    // Track rows only
    Distance,
}

impl Role {
    pub(crate) const ALL: [Role; 9] = [
        Role::Name,
        Role::Description,
        Role::Type,
        Role::Id,
        Role::Time,
        Role::Symbol,
        Role::Latitude,
        Role::Longitude,
        Role::Distance,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Role::Name => "name",
            Role::Description => "description",
            Role::Type => "type",
            Role::Id => "id",
            Role::Time => "time",
            Role::Symbol => "symbol",
            Role::Latitude => "latitude",
            Role::Longitude => "longitude",
            Role::Distance => "distance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowKind {
    Track,
    Waypoint,
}

impl RowKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            RowKind::Track => "track",
            RowKind::Waypoint => "waypoint",
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RoleValue {
    Text(String),
    Kind(RowKind),
    Id(EntityId),
    Time(DateTime<Utc>),
    Number(f64),
}

impl RoleValue {
    pub(crate) fn as_text(&self) -> Option<&str> {
        match self {
            RoleValue::Text(text) => Some(text),
            RoleValue::Kind(kind) => Some(kind.as_str()),
            _ => None,
        }
    }

    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            RoleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ItemFlags {
    pub(crate) enabled: bool,
    pub(crate) selectable: bool,
}

impl ItemFlags {
    pub(crate) fn is_empty(self) -> bool {
        !self.enabled && !self.selectable
    }
}

/// State changes the views may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ModelNotice {
    LoadingChanged,
    ExportingChanged,
    Error(String),
}

/// Borrowed view of one model row.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RowRef<'a> {
    Track(&'a Track),
    Waypoint(&'a Waypoint),
}

impl RowRef<'_> {
    pub(crate) fn kind(&self) -> RowKind {
        match self {
            RowRef::Track(_) => RowKind::Track,
            RowRef::Waypoint(_) => RowKind::Waypoint,
        }
    }

    pub(crate) fn id(&self) -> EntityId {
        match self {
            RowRef::Track(t) => t.id,
            RowRef::Waypoint(w) => w.id,
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            RowRef::Track(t) => &t.name,
            RowRef::Waypoint(w) => &w.name,
        }
    }

    pub(crate) fn description(&self) -> &str {
        match self {
            RowRef::Track(t) => &t.description,
            RowRef::Waypoint(w) => &w.description,
        }
    }
}

pub(crate) struct CollectionModel {
    /// Header of the active collection; detail lists are never kept here.
    collection: Option<Collection>,
    tracks: Vec<Track>,
    waypoints: Vec<Waypoint>,

    loaded: bool,
    exporting: bool,

    export_dirs: Vec<PathBuf>,
    changes: Vec<ListChange>,

    storage_tx: Sender<StorageRequest>,
    event_tx: Sender<AppEvent>,
}

impl CollectionModel {
    pub(crate) fn new(
        storage_tx: Sender<StorageRequest>,
        event_tx: Sender<AppEvent>,
        export_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            collection: None,
            tracks: vec![],
            waypoints: vec![],
            loaded: false,
            exporting: false,
            export_dirs,
            changes: vec![],
            storage_tx,
            event_tx,
        }
    }

    // Read model

    pub(crate) fn row_count(&self) -> usize {
        self.tracks.len() + self.waypoints.len()
    }

    pub(crate) fn row(&self, row: usize) -> Option<RowRef<'_>> {
        if row < self.tracks.len() {
            self.tracks.get(row).map(RowRef::Track)
        } else {
            self.waypoints
                .get(row - self.tracks.len())
                .map(RowRef::Waypoint)
        }
    }

    /// Looks up the value of `role` for `row`.
    ///
    /// Returns `None` when the row does not exist or the role does not apply
    /// to the row's type.
    pub(crate) fn data(&self, row: usize, role: Role) -> Option<RoleValue> {
        let row = self.row(row)?;

        match role {
            Role::Name => return Some(RoleValue::Text(row.name().to_string())),
            Role::Description => return Some(RoleValue::Text(row.description().to_string())),
            Role::Type => return Some(RoleValue::Kind(row.kind())),
            Role::Id => return Some(RoleValue::Id(row.id())),
            _ => {}
        }

        match (row, role) {
            (RowRef::Track(t), Role::Time) => Some(RoleValue::Time(t.time)),
            (RowRef::Track(t), Role::Distance) => Some(RoleValue::Number(t.distance)),

            (RowRef::Waypoint(w), Role::Time) => Some(RoleValue::Time(w.time)),
            (RowRef::Waypoint(w), Role::Symbol) => w.symbol.clone().map(RoleValue::Text),
            (RowRef::Waypoint(w), Role::Latitude) => Some(RoleValue::Number(w.latitude)),
            (RowRef::Waypoint(w), Role::Longitude) => Some(RoleValue::Number(w.longitude)),

            _ => None,
        }
    }

    pub(crate) fn role_names(&self) -> Vec<(Role, &'static str)> {
        Role::ALL.iter().map(|role| (*role, role.name())).collect()
    }

    pub(crate) fn flags(&self, row: usize) -> ItemFlags {
        if row < self.row_count() {
            ItemFlags {
                enabled: true,
                selectable: true,
            }
        } else {
            ItemFlags::default()
        }
    }

    pub(crate) fn collection_id(&self) -> Option<EntityId> {
        self.collection.as_ref().map(|c| c.id)
    }

    pub(crate) fn name(&self) -> &str {
        self.collection.as_ref().map_or("", |c| c.name.as_str())
    }

    pub(crate) fn filesystem_name(&self) -> String {
        self.collection
            .as_ref()
            .map(Collection::filesystem_name)
            .unwrap_or_default()
    }

    pub(crate) fn description(&self) -> &str {
        self.collection.as_ref().map_or("", |c| c.description.as_str())
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.collection.as_ref().is_some_and(|c| c.visible)
    }

    pub(crate) fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub(crate) fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Returns the configured export directories that currently exist, in
    /// configured order.
    pub(crate) fn export_suggested_directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for dir in &self.export_dirs {
            if dir.is_dir() && !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }

    /// Drains the row changes accumulated since the last call.
    pub(crate) fn take_changes(&mut self) -> Vec<ListChange> {
        std::mem::take(&mut self.changes)
    }

    // Actions from the user interface

    /// Switches to collection `id` and requests its details. Nothing changes
    /// if the request cannot be sent.
    pub(crate) fn set_collection_id(&mut self, id: EntityId) -> Result<()> {
        self.send(StorageRequest::CollectionDetail(id))?;

        self.collection = Some(Collection::with_id(id));
        self.set_loaded(false);

        Ok(())
    }

    pub(crate) fn create_waypoint(
        &mut self,
        latitude: f64,
        longitude: f64,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::CreateWaypoint {
            collection_id,
            latitude,
            longitude,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    pub(crate) fn create_track(
        &mut self,
        name: &str,
        description: &str,
        points: Vec<TrackPoint>,
    ) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::CreateTrack {
            collection_id,
            name: name.to_string(),
            description: description.to_string(),
            points,
        })
    }

    pub(crate) fn delete_waypoint(&mut self, id: EntityId) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::DeleteWaypoint { collection_id, id })
    }

    pub(crate) fn delete_track(&mut self, id: EntityId) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::DeleteTrack { collection_id, id })
    }

    pub(crate) fn edit_waypoint(&mut self, id: EntityId, name: &str, description: &str) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::EditWaypoint {
            collection_id,
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    pub(crate) fn edit_track(&mut self, id: EntityId, name: &str, description: &str) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.request_change(StorageRequest::EditTrack {
            collection_id,
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    /// Moves a waypoint of the active collection into `collection_id`.
    pub(crate) fn move_waypoint(&mut self, waypoint_id: EntityId, collection_id: EntityId) -> Result<()> {
        if self.active_collection_id().is_none() {
            return Ok(());
        }

        self.request_change(StorageRequest::MoveWaypoint {
            waypoint_id,
            collection_id,
        })
    }

    /// Moves a track of the active collection into `collection_id`.
    pub(crate) fn move_track(&mut self, track_id: EntityId, collection_id: EntityId) -> Result<()> {
        if self.active_collection_id().is_none() {
            return Ok(());
        }

        self.request_change(StorageRequest::MoveTrack {
            track_id,
            collection_id,
        })
    }

    pub(crate) fn export_to_file(&mut self, file_name: &str, directory: &Path) -> Result<()> {
        let Some(collection_id) = self.active_collection_id() else {
            return Ok(());
        };

        self.send(StorageRequest::ExportCollection {
            collection_id,
            file: directory.join(file_name),
        })?;

        self.exporting = true;
        self.notify(ModelNotice::ExportingChanged);

        Ok(())
    }

    // Notifications from the storage worker

    pub(crate) fn storage_initialised(&mut self) -> Result<()> {
        if let Some(id) = self.collection_id() {
            self.send(StorageRequest::CollectionDetail(id))?;
            self.set_loaded(false);
        }

        Ok(())
    }

    pub(crate) fn storage_init_error(&mut self, message: &str) {
        self.set_loaded(false);
        self.notify(ModelNotice::Error(message.to_string()));
    }

    pub(crate) fn collection_details_loaded(&mut self, mut collection: Collection, ok: bool) {
        if self.collection_id() != Some(collection.id) {
            debug!(id = collection.id, "Ignoring details of inactive collection");
            return;
        }

        self.loaded = true;

        if ok {
            let tracks = collection.tracks.take().unwrap_or_default();
            let waypoints = collection.waypoints.take().unwrap_or_default();
            self.collection = Some(collection);

            reconcile(0, &mut self.tracks, &tracks, &mut self.changes);
            reconcile(self.tracks.len(), &mut self.waypoints, &waypoints, &mut self.changes);
        } else {
            warn!(id = collection.id, "Collection details failed to load");
            self.notify(ModelNotice::Error(format!(
                "Failed to load collection {}",
                collection.id
            )));
        }

        self.notify(ModelNotice::LoadingChanged);
    }

    pub(crate) fn collection_exported(&mut self, ok: bool) {
        self.exporting = false;
        self.notify(ModelNotice::ExportingChanged);

        if !ok {
            self.notify(ModelNotice::Error("Export failed".to_string()));
        }
    }

    fn active_collection_id(&self) -> Option<EntityId> {
        let id = self.collection_id();
        if id.is_none() {
            self.notify(ModelNotice::Error(NO_COLLECTION_SELECTED.to_string()));
        }
        id
    }

    fn request_change(&mut self, request: StorageRequest) -> Result<()> {
        self.send(request)?;
        self.set_loaded(false);

        Ok(())
    }

    fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
        self.notify(ModelNotice::LoadingChanged);
    }

    fn send(&self, request: StorageRequest) -> Result<()> {
        self.storage_tx
            .send(request)
            .context("Storage worker is not running")
    }

    fn notify(&self, notice: ModelNotice) {
        // The receiver only goes away while the application shuts down.
        self.event_tx.send(AppEvent::Model(notice)).ok();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;

    struct Fixture {
        model: CollectionModel,
        storage_rx: Receiver<StorageRequest>,
        event_rx: Receiver<AppEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_export_dirs(vec![])
        }

        fn with_export_dirs(export_dirs: Vec<PathBuf>) -> Self {
            let (storage_tx, storage_rx) = mpsc::channel();
            let (event_tx, event_rx) = mpsc::channel();
            Self {
                model: CollectionModel::new(storage_tx, event_tx, export_dirs),
                storage_rx,
                event_rx,
            }
        }

        /// A model showing collection 7 with the given details.
        fn loaded(tracks: Vec<Track>, waypoints: Vec<Waypoint>) -> Self {
            let mut fixture = Self::new();
            fixture.model.set_collection_id(7).unwrap();
            fixture
                .model
                .collection_details_loaded(details(7, tracks, waypoints), true);
            fixture.drain();
            fixture
        }

        fn requests(&self) -> Vec<StorageRequest> {
            self.storage_rx.try_iter().collect()
        }

        fn notices(&self) -> Vec<ModelNotice> {
            self.event_rx
                .try_iter()
                .filter_map(|e| match e {
                    AppEvent::Model(notice) => Some(notice),
                    _ => None,
                })
                .collect()
        }

        fn drain(&mut self) {
            self.requests();
            self.notices();
            self.model.take_changes();
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn track(id: EntityId, name: &str) -> Track {
        Track {
            id,
            collection_id: 7,
            name: name.to_string(),
            description: format!("{name} description"),
            time: at(1_700_000_000 + id),
            distance: 1500.0 * id as f64,
        }
    }

    fn waypoint(id: EntityId, name: &str) -> Waypoint {
        Waypoint {
            id,
            collection_id: 7,
            name: name.to_string(),
            description: String::new(),
            symbol: Some("flag".to_string()),
            time: at(1_700_000_000 + id),
            latitude: 50.0 + id as f64,
            longitude: 14.0 + id as f64,
            elevation: None,
        }
    }

    fn details(id: EntityId, tracks: Vec<Track>, waypoints: Vec<Waypoint>) -> Collection {
        Collection {
            id,
            visible: true,
            name: format!("Collection {id}"),
            description: "Trips".to_string(),
            waypoints: Some(waypoints),
            tracks: Some(tracks),
        }
    }

    #[test]
    fn starts_empty_and_loading() {
        let fixture = Fixture::new();
        let model = &fixture.model;

        assert_eq!(model.row_count(), 0);
        assert!(model.is_loading());
        assert!(!model.is_exporting());
        assert!(!model.is_visible());
        assert_eq!(model.collection_id(), None);
        assert_eq!(model.name(), "");
        assert_eq!(model.data(0, Role::Name), None);
    }

    #[test]
    fn set_collection_id_requests_details() {
        let mut fixture = Fixture::new();

        fixture.model.set_collection_id(3).unwrap();

        assert_eq!(fixture.requests(), vec![StorageRequest::CollectionDetail(3)]);
        assert_eq!(fixture.notices(), vec![ModelNotice::LoadingChanged]);
        assert_eq!(fixture.model.collection_id(), Some(3));
        assert!(fixture.model.is_loading());
    }

    #[test]
    fn details_are_laid_out_tracks_first() {
        let fixture = Fixture::loaded(
            vec![track(1, "Ridge"), track(2, "Valley")],
            vec![waypoint(10, "Hut")],
        );
        let model = &fixture.model;

        assert!(!model.is_loading());
        assert!(model.is_visible());
        assert_eq!(model.name(), "Collection 7");
        assert_eq!(model.description(), "Trips");
        assert_eq!(model.filesystem_name(), "Collection 7");
        assert_eq!(model.row_count(), 3);

        assert_eq!(model.data(0, Role::Name), Some(RoleValue::Text("Ridge".into())));
        assert_eq!(model.data(1, Role::Type), Some(RoleValue::Kind(RowKind::Track)));
        assert_eq!(model.data(2, Role::Type), Some(RoleValue::Kind(RowKind::Waypoint)));
        assert_eq!(model.data(2, Role::Id), Some(RoleValue::Id(10)));
        assert_eq!(model.data(3, Role::Name), None);
    }

    #[test]
    fn type_specific_roles_only_apply_to_their_rows() {
        let fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![waypoint(10, "Hut")]);
        let model = &fixture.model;

        assert_eq!(model.data(0, Role::Distance), Some(RoleValue::Number(1500.0)));
        assert_eq!(model.data(0, Role::Latitude), None);
        assert_eq!(model.data(0, Role::Symbol), None);
        assert_eq!(model.data(0, Role::Time), Some(RoleValue::Time(at(1_700_000_001))));

        assert_eq!(model.data(1, Role::Distance), None);
        assert_eq!(model.data(1, Role::Latitude), Some(RoleValue::Number(60.0)));
        assert_eq!(model.data(1, Role::Longitude), Some(RoleValue::Number(24.0)));
        assert_eq!(model.data(1, Role::Symbol), Some(RoleValue::Text("flag".into())));
    }

    #[test]
    fn missing_symbol_has_no_value() {
        let mut plain = waypoint(10, "Hut");
        plain.symbol = None;
        let fixture = Fixture::loaded(vec![], vec![plain]);

        assert_eq!(fixture.model.data(0, Role::Symbol), None);
    }

    #[test]
    fn role_names_cover_every_role_in_order() {
        let fixture = Fixture::new();
        let names = fixture.model.role_names();

        assert_eq!(names.len(), 9);
        assert_eq!(names[0], (Role::Name, "name"));
        assert_eq!(names[8], (Role::Distance, "distance"));
        assert_eq!(Role::Name as i32, USER_ROLE);
        assert_eq!(Role::Distance as i32, USER_ROLE + 8);
    }

    #[test]
    fn flags_are_empty_outside_the_rows() {
        let fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![]);

        let flags = fixture.model.flags(0);
        assert!(flags.enabled && flags.selectable);
        assert!(fixture.model.flags(1).is_empty());
    }

    #[test]
    fn waypoint_changes_are_offset_past_the_tracks() {
        let mut fixture = Fixture::loaded(
            vec![track(1, "Ridge"), track(2, "Valley")],
            vec![waypoint(10, "Hut"), waypoint(11, "Spring")],
        );

        let mut renamed = waypoint(11, "Spring");
        renamed.name = "Well".to_string();
        fixture.model.collection_details_loaded(
            details(7, vec![track(2, "Valley")], vec![waypoint(10, "Hut"), renamed]),
            true,
        );

        assert_eq!(
            fixture.model.take_changes(),
            vec![
                ListChange::RowsRemoved { first: 0, last: 0 },
                ListChange::DataChanged { first: 2, last: 2 },
            ]
        );
        assert_eq!(fixture.model.row_count(), 3);
        assert_eq!(fixture.model.data(2, Role::Name), Some(RoleValue::Text("Well".into())));
    }

    #[test]
    fn reloading_identical_details_changes_nothing() {
        let mut fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![waypoint(10, "Hut")]);

        fixture
            .model
            .collection_details_loaded(details(7, vec![track(1, "Ridge")], vec![waypoint(10, "Hut")]), true);

        assert!(fixture.model.take_changes().is_empty());
        assert_eq!(fixture.notices(), vec![ModelNotice::LoadingChanged]);
    }

    #[test]
    fn details_of_another_collection_are_ignored() {
        let mut fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![]);

        fixture
            .model
            .collection_details_loaded(details(8, vec![], vec![waypoint(10, "Hut")]), true);

        assert!(fixture.model.take_changes().is_empty());
        assert!(fixture.notices().is_empty());
        assert_eq!(fixture.model.row_count(), 1);
    }

    #[test]
    fn failed_load_keeps_displayed_rows() {
        let mut fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![]);
        fixture.model.set_collection_id(7).unwrap();
        fixture.drain();

        fixture.model.collection_details_loaded(Collection::with_id(7), false);

        assert_eq!(fixture.model.row_count(), 1);
        assert_eq!(fixture.model.name(), "");
        assert!(!fixture.model.is_loading());
        assert_eq!(
            fixture.notices(),
            vec![
                ModelNotice::Error("Failed to load collection 7".into()),
                ModelNotice::LoadingChanged,
            ]
        );
    }

    #[test]
    fn absent_detail_lists_clear_the_rows() {
        let mut fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![waypoint(10, "Hut")]);

        fixture.model.collection_details_loaded(Collection::with_id(7), true);

        assert_eq!(fixture.model.row_count(), 0);
        assert_eq!(fixture.model.take_changes().len(), 2);
    }

    #[test]
    fn actions_forward_exactly_one_request() {
        let mut fixture = Fixture::loaded(vec![track(1, "Ridge")], vec![waypoint(10, "Hut")]);

        fixture.model.create_waypoint(49.5, 15.25, "Peak", "Summit cross").unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::CreateWaypoint {
                collection_id: 7,
                latitude: 49.5,
                longitude: 15.25,
                name: "Peak".into(),
                description: "Summit cross".into(),
            }]
        );

        let points = vec![TrackPoint {
            segment: 0,
            latitude: 1.0,
            longitude: 2.0,
            elevation: None,
            time: None,
        }];
        fixture.model.create_track("Loop", "", points.clone()).unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::CreateTrack {
                collection_id: 7,
                name: "Loop".into(),
                description: "".into(),
                points,
            }]
        );

        fixture.model.edit_waypoint(10, "Hut", "Closed").unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::EditWaypoint {
                collection_id: 7,
                id: 10,
                name: "Hut".into(),
                description: "Closed".into(),
            }]
        );

        fixture.model.edit_track(1, "Ridge walk", "").unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::EditTrack {
                collection_id: 7,
                id: 1,
                name: "Ridge walk".into(),
                description: "".into(),
            }]
        );

        fixture.model.delete_waypoint(10).unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::DeleteWaypoint { collection_id: 7, id: 10 }]
        );

        fixture.model.delete_track(1).unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::DeleteTrack { collection_id: 7, id: 1 }]
        );

        fixture.model.move_waypoint(10, 9).unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::MoveWaypoint { waypoint_id: 10, collection_id: 9 }]
        );

        fixture.model.move_track(1, 9).unwrap();
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::MoveTrack { track_id: 1, collection_id: 9 }]
        );
    }

    #[test]
    fn mutations_mark_the_model_loading() {
        let mut fixture = Fixture::loaded(vec![], vec![waypoint(10, "Hut")]);

        fixture.model.delete_waypoint(10).unwrap();

        assert!(fixture.model.is_loading());
        assert_eq!(fixture.notices(), vec![ModelNotice::LoadingChanged]);
        // Rows stay until storage reports the new state.
        assert_eq!(fixture.model.row_count(), 1);
    }

    #[test]
    fn actions_without_a_collection_report_an_error() {
        let mut fixture = Fixture::new();

        fixture.model.delete_track(1).unwrap();
        fixture.model.export_to_file("out.gpx", Path::new("/tmp")).unwrap();

        assert!(fixture.requests().is_empty());
        assert_eq!(
            fixture.notices(),
            vec![
                ModelNotice::Error(NO_COLLECTION_SELECTED.into()),
                ModelNotice::Error(NO_COLLECTION_SELECTED.into()),
            ]
        );
        assert!(!fixture.model.is_exporting());
    }

    #[test]
    fn export_round_trip_toggles_exporting() {
        let mut fixture = Fixture::loaded(vec![], vec![]);

        fixture
            .model
            .export_to_file("trips.gpx", Path::new("/data/exports"))
            .unwrap();

        assert!(fixture.model.is_exporting());
        assert_eq!(
            fixture.requests(),
            vec![StorageRequest::ExportCollection {
                collection_id: 7,
                file: PathBuf::from("/data/exports/trips.gpx"),
            }]
        );
        assert_eq!(fixture.notices(), vec![ModelNotice::ExportingChanged]);

        fixture.model.collection_exported(false);

        assert!(!fixture.model.is_exporting());
        assert_eq!(
            fixture.notices(),
            vec![
                ModelNotice::ExportingChanged,
                ModelNotice::Error("Export failed".into()),
            ]
        );
    }

    #[test]
    fn storage_ready_re_requests_the_active_collection() {
        let mut fixture = Fixture::new();
        fixture.model.storage_initialised().unwrap();
        assert!(fixture.requests().is_empty());

        fixture.model.set_collection_id(4).unwrap();
        fixture.drain();
        fixture.model.storage_initialised().unwrap();

        assert_eq!(fixture.requests(), vec![StorageRequest::CollectionDetail(4)]);
    }

    #[test]
    fn storage_init_error_is_surfaced() {
        let mut fixture = Fixture::new();

        fixture.model.storage_init_error("database is locked");

        assert_eq!(
            fixture.notices(),
            vec![
                ModelNotice::LoadingChanged,
                ModelNotice::Error("database is locked".into()),
            ]
        );
    }

    #[test]
    fn sending_fails_once_storage_is_gone() {
        let mut fixture = Fixture::new();
        fixture.model.set_collection_id(1).unwrap();
        fixture
            .model
            .collection_details_loaded(Collection::with_id(1), true);
        drop(fixture.storage_rx);

        assert!(fixture.model.set_collection_id(2).is_err());
        assert_eq!(fixture.model.collection_id(), Some(1));
        assert!(!fixture.model.is_loading());

        assert!(fixture.model.delete_waypoint(5).is_err());
        assert!(!fixture.model.is_loading());

        assert!(fixture.model.export_to_file("a.gpx", Path::new("/tmp")).is_err());
        assert!(!fixture.model.is_exporting());
    }

    #[test]
    fn suggested_directories_exist_and_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().to_path_buf();
        let missing = dir.path().join("missing");

        let fixture = Fixture::with_export_dirs(vec![
            missing,
            existing.clone(),
            existing.clone(),
        ]);

        assert_eq!(fixture.model.export_suggested_directories(), vec![existing]);
    }
}
