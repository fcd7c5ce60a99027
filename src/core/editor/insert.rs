//! Row and column insertion

use fxhash::FxHashMap;
use log::{debug, trace};

use super::{Axis, EditEffect};
use crate::core::table::{CellId, Content, Table};

impl Table {
    /// Insert a new line next to the anchor's line.
    ///
    /// The new line crosses into the neighbouring line on the insertion
    /// side. For each slot, a merged cell that already occupies both sides
    /// of the insertion point grows by one placeholder; otherwise the
    /// crossed line's merge shape is mirrored with fresh cells. At the edge
    /// of the table the new line is made of independent cells only.
    pub(crate) fn insert_line(&mut self, axis: Axis, anchor: CellId, after: bool) -> EditEffect {
        let Some(pos) = self.position(anchor) else {
            debug!("add {}: anchor {} is not part of this table", axis.name(), anchor);
            return EditEffect::Unchanged;
        };

        let line = axis.line(pos);
        let count = self.line_count(axis);
        let at = if after { line + 1 } else { line };
        let crossed = if after {
            (at < count).then_some(at)
        } else {
            line.checked_sub(1)
        };
        let reference = crossed.unwrap_or(line);

        let mut fresh: Vec<CellId> = Vec::with_capacity(self.line_len(axis));
        // (new cell, owner) links created once the line is in the grid
        let mut links: Vec<(CellId, CellId)> = Vec::new();
        // root on the crossed line -> new cell mirroring it
        let mut mirrored: FxHashMap<CellId, CellId> = FxHashMap::default();

        for slot in 0..self.line_len(axis) {
            let Some(near) = self.slot_cell(axis, reference, slot) else {
                continue;
            };
            let root = self.root(near);
            let (header, attributes) = match self.cell(root) {
                Some(cell) => (cell.header, cell.attributes.clone()),
                None => continue,
            };
            let cell = self.alloc_cell(header, attributes, Content::new());
            fresh.push(cell);

            if crossed.is_none() {
                continue;
            }
            let spans_gap = self
                .slot_cell(axis, line, slot)
                .is_some_and(|own| self.root(own) == root);
            if spans_gap {
                links.push((cell, root));
            } else if let Some(&owner) = mirrored.get(&root) {
                links.push((cell, owner));
            } else {
                mirrored.insert(root, cell);
            }
        }

        match axis {
            Axis::Rows => {
                let (header, attributes) = {
                    let template = &self.rows[reference];
                    (template.header, template.attributes.clone())
                };
                let mut row = self.alloc_row(header, attributes);
                row.cells = fresh;
                self.insert_row(at, row);
            }
            Axis::Columns => self.insert_column(at, fresh),
        }

        let linked = links.len();
        for (cell, owner) in links {
            self.merge_with(cell, owner);
        }

        trace!("inserted {} at {} ({} linked slots)", axis.name(), at, linked);
        EditEffect::Edited {
            anchor: Some(anchor),
        }
    }
}
