//! Position index.
//!
//! Maps cells to the entities standing on them so that "what is at this
//! cell" is a hash lookup instead of a scan over every entity. The index is
//! updated on every mutation that changes where an entity is, and can be
//! rebuilt from scratch when a game is loaded.
//!
//! Units are kept per cell in registration order. The rules never put two
//! live units on one cell, but a built unit appears on its base's cell and
//! the index tolerates any stacking: callers that need a single occupant
//! take the first.

use std::collections::HashMap;

use crate::components::{BaseId, UnitId};
use crate::grid::Cell;

/// Cell → entity lookup tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    units: HashMap<Cell, Vec<UnitId>>,
    bases: HashMap<Cell, BaseId>,
}

impl OccupancyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a unit at `cell`, after any unit already there.
    pub fn insert_unit(&mut self, id: UnitId, cell: Cell) {
        let slot = self.units.entry(cell).or_default();
        if !slot.contains(&id) {
            slot.push(id);
            slot.sort_unstable();
        }
    }

    /// Forget a unit at `cell`.
    ///
    /// Returns `false` if the unit was not recorded there.
    pub fn remove_unit(&mut self, id: UnitId, cell: Cell) -> bool {
        let Some(slot) = self.units.get_mut(&cell) else {
            return false;
        };
        let Some(pos) = slot.iter().position(|&u| u == id) else {
            return false;
        };
        slot.remove(pos);
        if slot.is_empty() {
            self.units.remove(&cell);
        }
        true
    }

    /// Move a unit between cells.
    pub fn move_unit(&mut self, id: UnitId, from: Cell, to: Cell) {
        self.remove_unit(id, from);
        self.insert_unit(id, to);
    }

    /// Record a base at `cell`.
    ///
    /// Returns the base previously recorded there, if any.
    pub fn insert_base(&mut self, id: BaseId, cell: Cell) -> Option<BaseId> {
        self.bases.insert(cell, id)
    }

    /// All units at `cell`, lowest id first.
    #[must_use]
    pub fn units_at(&self, cell: Cell) -> &[UnitId] {
        self.units.get(&cell).map_or(&[], Vec::as_slice)
    }

    /// The first unit at `cell`.
    #[must_use]
    pub fn first_unit_at(&self, cell: Cell) -> Option<UnitId> {
        self.units_at(cell).first().copied()
    }

    /// The base at `cell`.
    #[must_use]
    pub fn base_at(&self, cell: Cell) -> Option<BaseId> {
        self.bases.get(&cell).copied()
    }

    /// Number of cells holding at least one unit.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.units.len()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.units.clear();
        self.bases.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut index = OccupancyIndex::new();
        index.insert_unit(UnitId(1), Cell::new(0, 0));
        index.insert_base(BaseId(1), Cell::new(0, 0));

        assert_eq!(index.first_unit_at(Cell::new(0, 0)), Some(UnitId(1)));
        assert_eq!(index.base_at(Cell::new(0, 0)), Some(BaseId(1)));
        assert_eq!(index.first_unit_at(Cell::new(1, 0)), None);
        assert!(index.units_at(Cell::new(1, 0)).is_empty());
    }

    #[test]
    fn test_stacked_units_keep_id_order() {
        let mut index = OccupancyIndex::new();
        index.insert_unit(UnitId(5), Cell::ORIGIN);
        index.insert_unit(UnitId(2), Cell::ORIGIN);
        index.insert_unit(UnitId(5), Cell::ORIGIN);

        assert_eq!(index.units_at(Cell::ORIGIN), &[UnitId(2), UnitId(5)]);
        assert_eq!(index.first_unit_at(Cell::ORIGIN), Some(UnitId(2)));
    }

    #[test]
    fn test_move_unit() {
        let mut index = OccupancyIndex::new();
        index.insert_unit(UnitId(1), Cell::new(0, 0));
        index.move_unit(UnitId(1), Cell::new(0, 0), Cell::new(2, 3));

        assert_eq!(index.first_unit_at(Cell::new(0, 0)), None);
        assert_eq!(index.first_unit_at(Cell::new(2, 3)), Some(UnitId(1)));
        assert_eq!(index.occupied_cells(), 1);
    }

    #[test]
    fn test_remove_missing_unit() {
        let mut index = OccupancyIndex::new();
        index.insert_unit(UnitId(1), Cell::ORIGIN);
        assert!(!index.remove_unit(UnitId(2), Cell::ORIGIN));
        assert!(!index.remove_unit(UnitId(1), Cell::new(1, 1)));
        assert!(index.remove_unit(UnitId(1), Cell::ORIGIN));
        assert_eq!(index.occupied_cells(), 0);
    }

    #[test]
    fn test_clear() {
        let mut index = OccupancyIndex::new();
        index.insert_unit(UnitId(1), Cell::ORIGIN);
        index.insert_base(BaseId(1), Cell::ORIGIN);
        index.clear();
        assert_eq!(index.first_unit_at(Cell::ORIGIN), None);
        assert_eq!(index.base_at(Cell::ORIGIN), None);
    }
}
