//! Row and column deletion

use fxhash::FxHashSet;
use log::{debug, trace};

use super::{Axis, EditEffect};
use crate::core::table::{CellId, Table};

impl Table {
    /// Delete the anchor's line.
    ///
    /// A merged cell rooted on the deleted line keeps its surviving part:
    /// the first surviving placeholder (row-major) becomes the new root and
    /// takes over the rest. Managed cells on the line are released before
    /// the line goes. Deleting the last line asks for the whole table to be
    /// removed instead.
    pub(crate) fn delete_line(&mut self, axis: Axis, anchor: CellId) -> EditEffect {
        let Some(pos) = self.position(anchor) else {
            debug!("delete {}: anchor {} is not part of this table", axis.name(), anchor);
            return EditEffect::Unchanged;
        };

        let line = axis.line(pos);
        let count = self.line_count(axis);
        if count <= 1 {
            trace!("delete {}: last {} left, removing table", axis.name(), axis.name());
            return EditEffect::RemoveTable;
        }

        let doomed = self.line_cells(axis, line);
        let on_line: FxHashSet<CellId> = doomed.iter().copied().collect();

        for &cell in &doomed {
            if self.is_active(cell) {
                self.rehome_survivors(cell, &on_line);
            }
        }
        for &cell in &doomed {
            self.unmerge(cell);
        }

        match axis {
            Axis::Rows => self.remove_row(line),
            Axis::Columns => self.remove_column(line),
        }
        trace!("deleted {} {}", axis.name(), line);

        let landing = line.min(count - 2);
        let relocated = self
            .slot_cell(axis, landing, axis.slot(pos))
            .map(|cell| self.root(cell));
        EditEffect::Edited { anchor: relocated }
    }

    /// Move the part of `manager`'s footprint outside `on_line` onto its
    /// first surviving cell.
    fn rehome_survivors(&mut self, manager: CellId, on_line: &FxHashSet<CellId>) {
        let mut survivors: Vec<CellId> = self
            .links
            .managed(manager)
            .filter(|cell| !on_line.contains(cell))
            .collect();
        if survivors.is_empty() {
            return;
        }
        survivors.sort_by_key(|&cell| self.position(cell));

        for &cell in &survivors {
            self.links.unmanage(manager, cell);
        }
        let new_root = survivors[0];
        if let Some((header, attributes)) = self
            .cell(manager)
            .map(|cell| (cell.header, cell.attributes.clone()))
        {
            if let Some(root) = self.cell_mut(new_root) {
                root.header = header;
                root.attributes = attributes;
            }
        }
        for &cell in &survivors[1..] {
            self.links.manage(new_root, cell);
        }
        trace!(
            "re-rooted {} surviving cells of {} on {}",
            survivors.len(),
            manager,
            new_root
        );
    }
}
