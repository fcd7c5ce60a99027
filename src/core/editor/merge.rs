//! Merging and unmerging selected cells

use fxhash::FxHashSet;
use log::{debug, trace};

use super::EditEffect;
use crate::core::table::{is_rectangular, CellId, Table};

impl Table {
    /// Merge a rectangular selection into its first cell.
    ///
    /// The remaining cells are merged in selection order, their content
    /// appended to the manager's behind a line break when the manager
    /// already has content. Non-rectangular selections are ignored.
    pub fn merge_cells(&mut self, selection: &[CellId]) -> EditEffect {
        if !is_rectangular(self, selection) {
            debug!("merge: selection of {} cells is not a rectangle", selection.len());
            return EditEffect::Unchanged;
        }

        let manager = self.root(selection[0]);
        let mut merged: FxHashSet<CellId> = FxHashSet::default();
        merged.insert(manager);

        for &cell in &selection[1..] {
            let root = self.root(cell);
            if !merged.insert(root) {
                continue;
            }
            let mut moved = match self.cell_mut(root) {
                Some(c) => std::mem::take(&mut c.content),
                None => continue,
            };
            if let Some(target) = self.cell_mut(manager) {
                if !moved.is_empty() {
                    if !target.content.is_empty() {
                        target.content.push_line_break();
                    }
                    target.content.append(&mut moved);
                }
            }
            self.merge_with(root, manager);
        }

        if merged.len() == 1 {
            return EditEffect::Unchanged;
        }
        trace!("merged {} cells into {}", merged.len(), manager);
        EditEffect::Edited {
            anchor: Some(manager),
        }
    }

    /// Release every cell managed by the active cells of the selection.
    /// Content is not redistributed. The anchor is the first selected cell
    /// that was actually split.
    pub fn unmerge_cells(&mut self, selection: &[CellId]) -> EditEffect {
        let mut released = 0;
        let mut anchor = None;
        for &cell in selection {
            if !self.contains(cell) || !self.is_active(cell) {
                continue;
            }
            let managed = self.managed(cell);
            if managed.is_empty() {
                continue;
            }
            anchor.get_or_insert(cell);
            for managed in managed {
                self.unmerge(managed);
                released += 1;
            }
        }

        if released == 0 {
            debug!("unmerge: nothing to release in {} cells", selection.len());
            return EditEffect::Unchanged;
        }
        trace!("released {} cells", released);
        EditEffect::Edited { anchor }
    }
}
