//! Manager/managed ownership graph
//!
//! Both directions of the relationship live in two maps that are only ever
//! mutated together, so `c ∈ managed(m) ⇔ manager(c) = m` holds after
//! every call.

use fxhash::FxHashMap;
use indexmap::IndexSet;

use super::cell::CellId;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Links {
    manager_of: FxHashMap<CellId, CellId>,
    managed_by: FxHashMap<CellId, IndexSet<CellId>>,
}

impl Links {
    pub fn manager(&self, cell: CellId) -> Option<CellId> {
        self.manager_of.get(&cell).copied()
    }

    pub fn is_active(&self, cell: CellId) -> bool {
        !self.manager_of.contains_key(&cell)
    }

    /// Cells owned by `manager`, in the order they were attached
    pub fn managed(&self, manager: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.managed_by
            .get(&manager)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn managed_count(&self, manager: CellId) -> usize {
        self.managed_by.get(&manager).map_or(0, IndexSet::len)
    }

    /// Attach `cell` to `manager`, detaching it from any previous manager
    pub fn manage(&mut self, manager: CellId, cell: CellId) {
        if manager == cell {
            return;
        }
        if let Some(previous) = self.manager(cell) {
            if previous == manager {
                return;
            }
            self.unmanage(previous, cell);
        }
        self.manager_of.insert(cell, manager);
        self.managed_by.entry(manager).or_default().insert(cell);
    }

    /// Detach `cell` from `manager`; no-op if they are not linked
    pub fn unmanage(&mut self, manager: CellId, cell: CellId) {
        if self.manager(cell) != Some(manager) {
            return;
        }
        self.manager_of.remove(&cell);
        if let Some(set) = self.managed_by.get_mut(&manager) {
            set.shift_remove(&cell);
            if set.is_empty() {
                self.managed_by.remove(&manager);
            }
        }
    }

    /// Drop every link touching `cell`, in both directions
    pub fn forget(&mut self, cell: CellId) {
        if let Some(manager) = self.manager(cell) {
            self.unmanage(manager, cell);
        }
        if let Some(set) = self.managed_by.remove(&cell) {
            for managed in set {
                self.manager_of.remove(&managed);
            }
        }
    }

    /// All (managed, manager) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (CellId, CellId)> + '_ {
        self.manager_of.iter().map(|(&cell, &manager)| (cell, manager))
    }

    /// Managers with their managed sets
    pub fn managers(&self) -> impl Iterator<Item = (CellId, &IndexSet<CellId>)> + '_ {
        self.managed_by.iter().map(|(&manager, set)| (manager, set))
    }

    /// Manually break one direction of a link; used to exercise diagnostics
    #[cfg(test)]
    pub fn corrupt_forward(&mut self, cell: CellId) {
        self.manager_of.remove(&cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> CellId {
        CellId(n)
    }

    #[test]
    fn test_manage_is_reciprocal() {
        let mut links = Links::default();
        links.manage(id(0), id(1));
        assert_eq!(links.manager(id(1)), Some(id(0)));
        assert_eq!(links.managed(id(0)).collect::<Vec<_>>(), vec![id(1)]);
        assert!(links.is_active(id(0)));
        assert!(!links.is_active(id(1)));
    }

    #[test]
    fn test_manage_moves_between_managers() {
        let mut links = Links::default();
        links.manage(id(0), id(2));
        links.manage(id(1), id(2));
        assert_eq!(links.manager(id(2)), Some(id(1)));
        assert_eq!(links.managed_count(id(0)), 0);
        assert_eq!(links.managed_count(id(1)), 1);
    }

    #[test]
    fn test_self_management_ignored() {
        let mut links = Links::default();
        links.manage(id(3), id(3));
        assert!(links.is_active(id(3)));
        assert_eq!(links.managed_count(id(3)), 0);
    }

    #[test]
    fn test_unmanage_wrong_manager_is_noop() {
        let mut links = Links::default();
        links.manage(id(0), id(1));
        links.unmanage(id(5), id(1));
        assert_eq!(links.manager(id(1)), Some(id(0)));
    }

    #[test]
    fn test_forget_clears_both_directions() {
        let mut links = Links::default();
        links.manage(id(0), id(1));
        links.manage(id(0), id(2));
        links.forget(id(0));
        assert!(links.is_active(id(1)));
        assert!(links.is_active(id(2)));
        assert_eq!(links.pairs().count(), 0);
    }
}
