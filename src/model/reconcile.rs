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

//! Incremental list reconciliation.
//!
//! Applies a freshly loaded list onto the list currently on screen, reporting
//! each row removal, insertion and in-place change so that views only redraw
//! (and re-anchor their selection around) the rows that actually changed.
//!
//! Removals are found by rescanning from the start after every removal. This
//! is quadratic, which is fine for the size of a collection but not for
//! arbitrary lists.

use std::collections::HashSet;

use crate::model::{EntityId, Identified};

/// A row-level change notification. Row numbers are absolute model rows and
/// both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListChange {
    RowsRemoved { first: usize, last: usize },
    RowsInserted { first: usize, last: usize },
    DataChanged { first: usize, last: usize },
}

impl ListChange {
    fn single_removed(row: usize) -> Self {
        Self::RowsRemoved {
            first: row,
            last: row,
        }
    }

    fn single_inserted(row: usize) -> Self {
        Self::RowsInserted {
            first: row,
            last: row,
        }
    }

    fn single_changed(row: usize) -> Self {
        Self::DataChanged {
            first: row,
            last: row,
        }
    }
}

/// Receiver of row change notifications.
pub(crate) trait ListChangeSink {
    fn notify(&mut self, change: ListChange);
}

impl ListChangeSink for Vec<ListChange> {
    fn notify(&mut self, change: ListChange) {
        self.push(change);
    }
}

/// Makes `displayed` equal to `current`, in content and order.
///
/// `row_offset` is the model row of `displayed[0]`, so several lists can be
/// stacked in one model.
///
/// Entries whose id is no longer present are removed first. Then `current`
/// is walked in order: unknown ids are inserted at their position, known
/// ids overwrite the entry at that position. An overwrite is only reported
/// when the entry differs from the one displayed there.
///
/// Duplicate ids in `current` are not supported.
pub(crate) fn reconcile<T, S>(row_offset: usize, displayed: &mut Vec<T>, current: &[T], sink: &mut S)
where
    T: Identified + Clone + PartialEq,
    S: ListChangeSink + ?Sized,
{
    let current_ids: HashSet<EntityId> = current.iter().map(Identified::id).collect();

    while let Some(row) = displayed
        .iter()
        .position(|entry| !current_ids.contains(&entry.id()))
    {
        displayed.remove(row);
        sink.notify(ListChange::single_removed(row_offset + row));
    }

    let mut displayed_ids: HashSet<EntityId> = displayed.iter().map(Identified::id).collect();

    for (row, entry) in current.iter().enumerate() {
        if displayed_ids.insert(entry.id()) {
            displayed.insert(row, entry.clone());
            sink.notify(ListChange::single_inserted(row_offset + row));
        } else if displayed[row] != *entry {
            displayed[row] = entry.clone();
            sink.notify(ListChange::single_changed(row_offset + row));
        }
    }
}
