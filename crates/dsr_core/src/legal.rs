//! Legal-move computation.
//!
//! Given a selected unit, work out every cell it may move to and every
//! cell it may fire at this turn. The reach is a Manhattan diamond of
//! [`Rules::move_radius`](crate::config::Rules::move_radius) around the
//! unit; nothing blocks movement except what stands on the destination.
//!
//! For each cell in the diamond, looking only at the first unit standing
//! there:
//!
//! | occupant                        | result                          |
//! |---------------------------------|---------------------------------|
//! | live unit of the active player  | excluded                        |
//! | dead unit (either side)         | excluded                        |
//! | live enemy unit                 | `Attack`, if the unit can fire  |
//! | nothing                         | `Move`, if the unit can move    |

use serde::{Deserialize, Serialize};

use crate::components::UnitId;
use crate::grid::Cell;
use crate::state::{GameState, Selection};

/// What selecting a cell from the legal set would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Drive to an empty cell.
    Move,
    /// Fire at the enemy unit on the cell.
    Attack,
}

/// One entry of a legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalAction {
    /// Target cell.
    pub cell: Cell,
    /// Action performed on that cell.
    pub kind: ActionKind,
}

/// Every legal move and attack for one unit, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    actions: Vec<LegalAction>,
}

impl LegalActions {
    /// An empty legal set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if nothing is legal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate all entries.
    pub fn iter(&self) -> impl Iterator<Item = &LegalAction> {
        self.actions.iter()
    }

    /// The action available on `cell`, if any.
    #[must_use]
    pub fn kind_at(&self, cell: Cell) -> Option<ActionKind> {
        self.actions
            .iter()
            .find(|action| action.cell == cell)
            .map(|action| action.kind)
    }

    /// Check if `cell` is legal for `kind`.
    #[must_use]
    pub fn contains(&self, cell: Cell, kind: ActionKind) -> bool {
        self.kind_at(cell) == Some(kind)
    }

    /// Cells the unit may move to.
    #[must_use]
    pub fn moves(&self) -> Vec<Cell> {
        self.cells_of(ActionKind::Move)
    }

    /// Cells the unit may attack.
    #[must_use]
    pub fn attacks(&self) -> Vec<Cell> {
        self.cells_of(ActionKind::Attack)
    }

    fn cells_of(&self, kind: ActionKind) -> Vec<Cell> {
        self.actions
            .iter()
            .filter(|action| action.kind == kind)
            .map(|action| action.cell)
            .collect()
    }
}

impl<'a> IntoIterator for &'a LegalActions {
    type Item = &'a LegalAction;
    type IntoIter = std::slice::Iter<'a, LegalAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Legal actions for whatever is selected.
///
/// Bases never move or attack, and an empty selection has nothing to do,
/// so both yield an empty set.
#[must_use]
pub fn compute_legal_actions(state: &GameState, selection: Option<Selection>) -> LegalActions {
    match selection {
        Some(Selection::Unit(id)) => legal_actions_for_unit(state, id),
        Some(Selection::Base(_)) | None => LegalActions::empty(),
    }
}

/// Legal actions for a single unit.
///
/// Only a live unit belonging to the active player has any.
#[must_use]
pub fn legal_actions_for_unit(state: &GameState, id: UnitId) -> LegalActions {
    let Some(unit) = state.unit(id) else {
        return LegalActions::empty();
    };
    let active = state.active_player();
    if !unit.is_controlled_by(active) {
        return LegalActions::empty();
    }
    if unit.has_moved && unit.has_fired {
        return LegalActions::empty();
    }

    let mut actions = Vec::new();
    for cell in unit.cell.diamond(state.rules().move_radius) {
        let occupant = state.first_unit_at(cell);
        let kind = match occupant {
            Some(other) if other.owner == active || !other.is_alive() => continue,
            Some(_) => ActionKind::Attack,
            None => ActionKind::Move,
        };
        let allowed = match kind {
            ActionKind::Attack => !unit.has_fired,
            ActionKind::Move => !unit.has_moved,
        };
        if allowed {
            actions.push(LegalAction { cell, kind });
        }
    }

    tracing::trace!(unit = %id, count = actions.len(), "Computed legal actions");
    LegalActions { actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Layout, UnitPlacement};
    use crate::grid::diamond_size;
    use crate::player::Player;

    fn game(units: Vec<UnitPlacement>) -> GameState {
        GameState::from_config(GameConfig::with_layout(Layout {
            bases: Vec::new(),
            units,
        }))
        .unwrap()
    }

    #[test]
    fn test_lone_unit_can_reach_whole_diamond() {
        let state = game(vec![UnitPlacement::new(Player::Red, Cell::ORIGIN)]);
        let legal = legal_actions_for_unit(&state, UnitId(1));

        // Every cell but its own.
        assert_eq!(legal.len() as u32, diamond_size(4) - 1);
        assert!(legal.attacks().is_empty());
        assert!(legal.contains(Cell::new(0, 4), ActionKind::Move));
        assert!(legal.contains(Cell::new(-2, 2), ActionKind::Move));
        assert_eq!(legal.kind_at(Cell::new(3, 2)), None);
        assert_eq!(legal.kind_at(Cell::ORIGIN), None);
    }

    #[test]
    fn test_friendly_cells_excluded_enemy_cells_attack() {
        let state = game(vec![
            UnitPlacement::new(Player::Red, Cell::ORIGIN),
            UnitPlacement::new(Player::Red, Cell::new(1, 0)),
            UnitPlacement::new(Player::Blue, Cell::new(0, 2)),
        ]);
        let legal = legal_actions_for_unit(&state, UnitId(1));

        assert_eq!(legal.kind_at(Cell::new(1, 0)), None);
        assert_eq!(legal.kind_at(Cell::new(0, 2)), Some(ActionKind::Attack));
        assert_eq!(legal.attacks(), vec![Cell::new(0, 2)]);
    }

    #[test]
    fn test_dead_unit_blocks_cell() {
        let state = game(vec![
            UnitPlacement::new(Player::Red, Cell::ORIGIN),
            UnitPlacement::with_health(Player::Blue, Cell::new(0, 1), 0),
            UnitPlacement::with_health(Player::Red, Cell::new(0, -1), 0),
        ]);
        let legal = legal_actions_for_unit(&state, UnitId(1));

        assert_eq!(legal.kind_at(Cell::new(0, 1)), None);
        assert_eq!(legal.kind_at(Cell::new(0, -1)), None);
    }

    #[test]
    fn test_enemy_out_of_range_not_attackable() {
        let state = game(vec![
            UnitPlacement::new(Player::Red, Cell::ORIGIN),
            UnitPlacement::new(Player::Blue, Cell::new(3, 2)),
        ]);
        let legal = legal_actions_for_unit(&state, UnitId(1));
        assert!(legal.attacks().is_empty());
    }

    #[test]
    fn test_enemy_unit_yields_nothing() {
        let state = game(vec![
            UnitPlacement::new(Player::Red, Cell::ORIGIN),
            UnitPlacement::new(Player::Blue, Cell::new(0, 5)),
        ]);
        assert!(legal_actions_for_unit(&state, UnitId(2)).is_empty());
    }

    #[test]
    fn test_dead_selected_unit_yields_nothing() {
        let state = game(vec![UnitPlacement::with_health(
            Player::Red,
            Cell::ORIGIN,
            0,
        )]);
        assert!(legal_actions_for_unit(&state, UnitId(1)).is_empty());
    }

    #[test]
    fn test_unknown_unit_yields_nothing() {
        let state = game(vec![UnitPlacement::new(Player::Red, Cell::ORIGIN)]);
        assert!(legal_actions_for_unit(&state, UnitId(42)).is_empty());
    }

    #[test]
    fn test_base_selection_yields_nothing() {
        let state = GameState::new_game();
        let legal = compute_legal_actions(&state, Some(Selection::Base(crate::BaseId(1))));
        assert!(legal.is_empty());
        assert!(compute_legal_actions(&state, None).is_empty());
    }

    #[test]
    fn test_standard_layout_bound() {
        let state = GameState::new_game();
        for unit in state.units() {
            let legal = legal_actions_for_unit(&state, unit.id);
            assert!(legal.len() <= 41);
            assert!(legal
                .iter()
                .all(|action| action.cell.manhattan_distance(unit.cell) <= 4));
        }
    }
}
