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

//! Table of the rows of the active collection.
//!
//! The table owns only its selection; every cell is read from the
//! [`CollectionModel`](crate::model::collection_model::CollectionModel) when
//! drawing. Row change notifications from the model are replayed onto the
//! selection so that it stays on the same row while rows above it come and
//! go.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::model::reconcile::ListChange;

#[derive(Default)]
pub(crate) struct CollectionTable {
    pub(crate) table_state: TableState,
}

impl CollectionTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Re-anchors the selection after the model reported `changes` and now
    /// has `row_count` rows.
    pub(crate) fn apply_changes(&mut self, changes: &[ListChange], row_count: usize) {
        let mut selected = self.table_state.selected();

        for change in changes {
            let Some(row) = selected else {
                break;
            };

            selected = Some(match *change {
                ListChange::RowsRemoved { first, last } if row > last => row - (last - first + 1),
                ListChange::RowsInserted { first, last } if row >= first => row + (last - first + 1),
                _ => row,
            });
        }

        self.table_state.select(match selected {
            _ if row_count == 0 => None,
            Some(row) => Some(row.min(row_count - 1)),
            None => Some(0),
        });
    }

    fn goto_next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < row_count => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i > 0 && i < row_count => i - 1,
            _ => row_count - 1,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, row_count: usize) {
        if row_count > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, row_count: usize) {
        if row_count > 0 {
            self.table_state.select(Some(row_count - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(selected: Option<usize>) -> CollectionTable {
        let mut table = CollectionTable::new();
        table.table_state.select(selected);
        table
    }

    #[test]
    fn removal_above_shifts_selection_up() {
        let mut table = table(Some(5));

        table.apply_changes(&[ListChange::RowsRemoved { first: 1, last: 2 }], 8);

        assert_eq!(table.selected(), Some(3));
    }

    #[test]
    fn removal_of_selected_row_keeps_position() {
        let mut table = table(Some(2));

        table.apply_changes(&[ListChange::RowsRemoved { first: 2, last: 2 }], 4);

        assert_eq!(table.selected(), Some(2));
    }

    #[test]
    fn insertion_at_or_above_shifts_selection_down() {
        let mut table = table(Some(2));

        table.apply_changes(
            &[
                ListChange::RowsInserted { first: 2, last: 2 },
                ListChange::RowsInserted { first: 9, last: 9 },
            ],
            10,
        );

        assert_eq!(table.selected(), Some(3));
    }

    #[test]
    fn data_changes_leave_selection_alone() {
        let mut table = table(Some(1));

        table.apply_changes(&[ListChange::DataChanged { first: 0, last: 3 }], 4);

        assert_eq!(table.selected(), Some(1));
    }

    #[test]
    fn selection_is_clamped_and_cleared() {
        let mut table = table(Some(3));
        table.apply_changes(&[ListChange::RowsRemoved { first: 3, last: 3 }], 3);
        assert_eq!(table.selected(), Some(2));

        table.apply_changes(&[ListChange::RowsRemoved { first: 0, last: 2 }], 0);
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn first_rows_get_selected() {
        let mut table = table(None);

        table.apply_changes(&[ListChange::RowsInserted { first: 0, last: 0 }], 1);

        assert_eq!(table.selected(), Some(0));
    }
}
