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

//! Collection browser state.
//!
//! Holds the list of collections shown in the left pane and which one is
//! highlighted. The highlight follows the collection's id across reloads.

use ratatui::widgets::ListState;

use crate::model::{Collection, EntityId};

#[derive(Default)]
pub(crate) struct CollectionBrowser {
    pub(crate) collections: Vec<Collection>,
    pub(crate) state: ListState,
}

impl CollectionBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn selected_id(&self) -> Option<EntityId> {
        let index = self.state.selected()?;
        self.collections.get(index).map(|collection| collection.id)
    }

    /// Replaces the list, keeping the highlighted collection if it is still
    /// present.
    pub(crate) fn set_collections(&mut self, collections: Vec<Collection>) {
        let selected = self.selected_id();
        self.collections = collections;

        let index = selected
            .and_then(|id| self.position(id))
            .or_else(|| (!self.collections.is_empty()).then_some(0));
        self.state.select(index);
    }

    /// Highlights the collection with `id`, if listed.
    pub(crate) fn select_id(&mut self, id: EntityId) {
        if let Some(index) = self.position(id) {
            self.state.select(Some(index));
        }
    }

    pub(crate) fn next(&mut self) {
        let len = self.collections.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub(crate) fn previous(&mut self) {
        let len = self.collections.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.state.select(Some(i));
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.collections.iter().position(|c| c.id == id)
    }
}
