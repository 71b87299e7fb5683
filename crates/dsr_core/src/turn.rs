//! Turn handover.
//!
//! Ending a turn is the only point where dead units leave the board and
//! the only point where per-turn flags are cleared. The order is fixed:
//! swap the active player, reset bases, reset live units and collect the
//! dead, remove the dead, clear the selection.

use serde::{Deserialize, Serialize};

use crate::components::UnitId;
use crate::player::Player;
use crate::state::GameState;

/// What happened when a turn ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Player whose turn just ended.
    pub previous: Player,
    /// Player now to act.
    pub active: Player,
    /// New turn number.
    pub turn: u32,
    /// Dead units removed from the board, lowest id first.
    pub pruned: Vec<UnitId>,
}

impl GameState {
    /// Hand the turn to the other player.
    ///
    /// Every base may build again and every surviving unit may move and
    /// fire again, whichever side owns it. Units that died since the last
    /// handover are removed. The selection is cleared.
    pub fn end_turn(&mut self) -> TurnReport {
        let previous = self.active;
        self.active = previous.opponent();

        for base in self.bases.values_mut() {
            base.reset_for_turn();
        }

        let mut pruned = Vec::new();
        for unit in self.units.values_mut() {
            if unit.is_alive() {
                unit.reset_for_turn();
            } else {
                pruned.push(unit.id);
            }
        }
        for &id in &pruned {
            self.remove_unit(id);
        }

        self.selection = None;
        self.turn += 1;

        tracing::info!(
            turn = self.turn,
            active = %self.active,
            pruned = pruned.len(),
            "Turn ended"
        );
        self.debug_validate("end_turn");

        TurnReport {
            previous,
            active: self.active,
            turn: self.turn,
            pruned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BaseId;
    use crate::config::{BasePlacement, GameConfig, Layout, UnitPlacement};
    use crate::grid::Cell;

    fn layout_game(layout: Layout) -> GameState {
        GameState::from_config(GameConfig::with_layout(layout)).unwrap()
    }

    #[test]
    fn test_end_turn_alternates() {
        let mut state = GameState::new_game();
        let report = state.end_turn();
        assert_eq!(report.previous, Player::Red);
        assert_eq!(report.active, Player::Blue);
        assert_eq!(report.turn, 2);
        assert_eq!(state.active_player(), Player::Blue);

        state.end_turn();
        assert_eq!(state.active_player(), Player::Red);
        assert_eq!(state.turn(), 3);
    }

    #[test]
    fn test_end_turn_resets_flags_for_both_sides() {
        let mut state = layout_game(Layout {
            bases: Vec::new(),
            units: vec![
                UnitPlacement::new(Player::Red, Cell::ORIGIN),
                UnitPlacement::new(Player::Blue, Cell::new(0, 2)),
            ],
        });
        state.select(Cell::ORIGIN);
        state.attack(Cell::new(0, 2)).unwrap();
        state.move_selected(Cell::new(-1, 0)).unwrap();

        state.end_turn();
        let red = state.unit(UnitId(1)).unwrap();
        assert!(!red.has_moved);
        assert!(!red.has_fired);
        assert_eq!(state.unit(UnitId(2)).unwrap().health.current, 2);
    }

    #[test]
    fn test_end_turn_prunes_dead_units() {
        let mut state = layout_game(Layout {
            bases: Vec::new(),
            units: vec![
                UnitPlacement::new(Player::Red, Cell::ORIGIN),
                UnitPlacement::with_health(Player::Blue, Cell::new(0, 1), 1),
            ],
        });
        state.select(Cell::ORIGIN);
        state.attack(Cell::new(0, 1)).unwrap();
        assert_eq!(state.units().count(), 2);

        let report = state.end_turn();
        assert_eq!(report.pruned, vec![UnitId(2)]);
        assert!(state.unit(UnitId(2)).is_none());
        assert!(state.first_unit_at(Cell::new(0, 1)).is_none());
        assert!(state.consistency_errors().is_empty());
    }

    #[test]
    fn test_end_turn_resets_every_base() {
        let mut state = layout_game(Layout {
            bases: vec![
                BasePlacement::owned(Cell::ORIGIN, Player::Red),
                BasePlacement::owned(Cell::new(5, 5), Player::Blue),
            ],
            units: Vec::new(),
        });
        state.select(Cell::ORIGIN);
        state.build_unit().unwrap();
        assert!(state.base(BaseId(1)).unwrap().has_built);

        state.end_turn();
        assert!(!state.base(BaseId(1)).unwrap().has_built);
        assert!(!state.base(BaseId(2)).unwrap().has_built);
    }

    #[test]
    fn test_end_turn_clears_selection() {
        let mut state = GameState::new_game();
        state.select(Cell::new(0, -5));
        state.end_turn();
        assert_eq!(state.current_selection(), None);
    }

    #[test]
    fn test_built_unit_acts_after_owner_turn_returns() {
        let mut state = layout_game(Layout {
            bases: vec![BasePlacement::owned(Cell::ORIGIN, Player::Red)],
            units: Vec::new(),
        });
        state.select(Cell::ORIGIN);
        let id = state.build_unit().unwrap();
        assert!(state.legal_actions_for(id).is_empty());

        state.end_turn();
        state.end_turn();
        assert!(!state.legal_actions_for(id).is_empty());
    }
}
