//! Cell management: merging cells into a manager and releasing them

use log::{debug, trace};

use super::cell::CellId;
use super::Table;

impl Table {
    /// Attach `cell` to `manager` without touching content or attributes.
    ///
    /// Both cells must belong to this table.
    pub fn manage(&mut self, manager: CellId, cell: CellId) {
        if self.contains(manager) && self.contains(cell) {
            self.links.manage(manager, cell);
        }
    }

    /// Detach `cell` from `manager`; no-op if they are not linked
    pub fn unmanage(&mut self, manager: CellId, cell: CellId) {
        self.links.unmanage(manager, cell);
    }

    /// Make `cell` a managed cell of `manager`.
    ///
    /// `cell` takes over the manager's `header` flag and attributes, and its
    /// content moves to the end of the manager's content behind a line
    /// break. Cells that `cell` was managing are re-parented onto `manager`.
    /// When `manager` is itself managed the merge targets its manager, so
    /// ownership stays one level deep.
    pub fn merge_with(&mut self, cell: CellId, manager: CellId) {
        if !self.contains(cell) || !self.contains(manager) {
            debug!("merge_with: {} or {} is not part of this table", cell, manager);
            return;
        }
        let manager = self.root(manager);
        if manager == cell {
            return;
        }

        let (header, attributes) = match self.cells.get(&manager) {
            Some(m) => (m.header, m.attributes.clone()),
            None => return,
        };
        let mut moved = match self.cells.get_mut(&cell) {
            Some(c) => {
                c.header = header;
                c.attributes = attributes;
                std::mem::take(&mut c.content)
            }
            None => return,
        };
        if !moved.is_empty() {
            if let Some(m) = self.cells.get_mut(&manager) {
                m.content.push_line_break();
                m.content.append(&mut moved);
            }
        }

        let owned: Vec<CellId> = self.links.managed(cell).collect();
        self.links.manage(manager, cell);
        for child in owned {
            self.merge_with(child, manager);
        }

        self.adopt_row_section(cell, manager);
        debug_assert_eq!(self.links.manager(cell), Some(manager));
        trace!("merged {} into {}", cell, manager);
    }

    /// Release `cell` from its manager. Content already moved to the
    /// manager stays there.
    pub fn unmerge(&mut self, cell: CellId) {
        if let Some(manager) = self.links.manager(cell) {
            self.links.unmanage(manager, cell);
            trace!("released {} from {}", cell, manager);
        }
    }

    /// When every slot of `cell`'s row is owned by `manager`, that row takes
    /// over the manager row's `header` flag and attributes.
    fn adopt_row_section(&mut self, cell: CellId, manager: CellId) {
        let (Some(row), Some(manager_row)) = (self.row_index(cell), self.row_index(manager))
        else {
            return;
        };
        if row == manager_row {
            return;
        }
        let fully_managed = self.rows[row]
            .cells
            .iter()
            .all(|&c| self.links.manager(c) == Some(manager));
        if !fully_managed {
            return;
        }
        let header = self.rows[manager_row].header;
        let attributes = self.rows[manager_row].attributes.clone();
        let target = &mut self.rows[row];
        target.header = header;
        target.attributes = attributes;
    }
}
