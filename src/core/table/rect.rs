//! Rectangle validation for cell selections

use fxhash::FxHashSet;

use super::cell::{CellId, GridPos};
use super::Table;

/// Inclusive grid rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
}

impl Bounds {
    fn of(pos: GridPos) -> Self {
        Bounds {
            top: pos.row,
            left: pos.column,
            bottom: pos.row,
            right: pos.column,
        }
    }

    /// Grow to include `pos`; returns true if the bounds changed
    fn include(&mut self, pos: GridPos) -> bool {
        let before = *self;
        self.top = self.top.min(pos.row);
        self.left = self.left.min(pos.column);
        self.bottom = self.bottom.max(pos.row);
        self.right = self.right.max(pos.column);
        before != *self
    }

    fn slots(self) -> impl Iterator<Item = GridPos> {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |column| GridPos::new(row, column)))
    }
}

/// Check whether `cells` exactly tile an axis-aligned rectangle.
///
/// Each member is expanded to the full footprint of the merged cell it
/// belongs to, so a selection that cuts through a merged cell fails.
/// Empty selections and cells from another table fail as well.
pub fn is_rectangular(table: &Table, cells: &[CellId]) -> bool {
    if cells.is_empty() {
        return false;
    }

    let mut expanded: FxHashSet<CellId> = FxHashSet::default();
    for &cell in cells {
        if !table.contains(cell) {
            return false;
        }
        let root = table.root(cell);
        expanded.insert(root);
        expanded.extend(table.links.managed(root));
    }

    let mut covered: FxHashSet<GridPos> = FxHashSet::default();
    let mut bounds: Option<Bounds> = None;
    for &cell in &expanded {
        let Some(pos) = table.position(cell) else {
            return false;
        };
        covered.insert(pos);
        match bounds.as_mut() {
            Some(b) => {
                b.include(pos);
            }
            None => bounds = Some(Bounds::of(pos)),
        }
    }

    let Some(bounds) = bounds else {
        return false;
    };
    bounds.slots().all(|slot| covered.contains(&slot))
        && covered.len() == bounds.slots().count()
}

/// Smallest rectangle spanned by `from` and `to` that no merged cell
/// straddles, as root cells in row-major order.
///
/// Returns an empty selection if either cell is not in the table.
pub fn selection_rectangle(table: &Table, from: CellId, to: CellId) -> Vec<CellId> {
    let (Some(a), Some(b)) = (table.position(from), table.position(to)) else {
        return Vec::new();
    };

    let mut bounds = Bounds::of(a);
    bounds.include(b);
    for cell in [from, to] {
        for pos in table.footprint(table.root(cell)) {
            bounds.include(pos);
        }
    }

    loop {
        let mut grown = false;
        for slot in bounds.slots().collect::<Vec<_>>() {
            let Some(cell) = table.cell_at(slot.row, slot.column) else {
                continue;
            };
            for pos in table.footprint(table.root(cell)) {
                grown |= bounds.include(pos);
            }
        }
        if !grown {
            break;
        }
    }

    let mut seen = FxHashSet::default();
    bounds
        .slots()
        .filter_map(|slot| table.cell_at(slot.row, slot.column))
        .map(|cell| table.root(cell))
        .filter(|root| seen.insert(*root))
        .collect()
}
