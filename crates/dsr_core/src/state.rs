//! The game state aggregate.
//!
//! [`GameState`] owns every unit and base, knows whose turn it is and what
//! is selected. All rule changes go through its methods: selection here,
//! actions in [`crate::actions`], turn changes in [`crate::turn`].
//!
//! # Example
//!
//! ```
//! use dsr_core::prelude::*;
//!
//! let mut game = GameState::new_game();
//! let red_tank = Cell::from_world(WorldPos::new(-128, -320));
//!
//! let selected = game.select(red_tank);
//! assert!(selected.legal_moves.contains(&Cell::from_world(WorldPos::new(-128, -256))));
//!
//! let outcome = game.move_selected(red_tank + CellOffset::new(0, 1)).unwrap();
//! assert_eq!(outcome.to, Cell::new(-2, -4));
//!
//! game.end_turn();
//! assert_eq!(game.active_player(), Player::Blue);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{Base, BaseId, Health, Unit, UnitId};
use crate::config::{GameConfig, Rules};
use crate::error::Result;
use crate::grid::Cell;
use crate::legal::{compute_legal_actions, legal_actions_for_unit, LegalActions};
use crate::occupancy::OccupancyIndex;
use crate::player::Player;

/// The currently selected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    /// A unit of the active player.
    Unit(UnitId),
    /// A base of the active player.
    Base(BaseId),
}

/// What a selection makes possible.
///
/// Returned by [`GameState::select`] so a presentation layer can highlight
/// cells and enable controls without asking again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// The selected entity, if the cell held a selectable one.
    pub selection: Option<Selection>,
    /// Cells the selected unit may move to.
    pub legal_moves: Vec<Cell>,
    /// Cells the selected unit may attack.
    pub legal_attacks: Vec<Cell>,
    /// Whether [`GameState::capture_base`] would succeed.
    pub can_capture: bool,
    /// Whether [`GameState::build_unit`] would succeed.
    pub can_build: bool,
}

/// Per-player tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// The player tallied.
    pub player: Player,
    /// Units still alive.
    pub live_units: usize,
    /// Bases owned.
    pub bases_owned: usize,
}

/// A read-only copy of the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Current turn number, starting at 1.
    pub turn: u32,
    /// Player to act.
    pub active_player: Player,
    /// Current selection.
    pub selection: Option<Selection>,
    /// Every unit, dead ones included until pruned.
    pub units: Vec<Unit>,
    /// Every base.
    pub bases: Vec<Base>,
}

/// The aggregate root of a game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) rules: Rules,
    pub(crate) units: BTreeMap<UnitId, Unit>,
    pub(crate) bases: BTreeMap<BaseId, Base>,
    pub(crate) index: OccupancyIndex,
    pub(crate) active: Player,
    pub(crate) selection: Option<Selection>,
    pub(crate) turn: u32,
    next_unit_id: u32,
    next_base_id: u32,
}

impl GameState {
    /// Start a game with the standard layout.
    #[must_use]
    pub fn new_game() -> Self {
        Self::build(GameConfig::default())
    }

    /// Start a game from a config.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](crate::error::GameError::InvalidConfig)
    /// if the config fails validation.
    pub fn from_config(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let mut state = Self {
            rules: config.rules,
            units: BTreeMap::new(),
            bases: BTreeMap::new(),
            index: OccupancyIndex::new(),
            active: config.first_player,
            selection: None,
            turn: 1,
            next_unit_id: 1,
            next_base_id: 1,
        };

        for placement in &config.layout.bases {
            let id = state.allocate_base_id();
            let mut base = Base::neutral(id, placement.cell);
            base.owner = placement.owner;
            state.index.insert_base(id, base.cell);
            state.bases.insert(id, base);
        }

        for placement in &config.layout.units {
            let id = state.allocate_unit_id();
            let mut unit = Unit::new(id, placement.owner, placement.cell, config.rules.unit_health);
            if let Some(current) = placement.health {
                unit.health = Health::with_current(current, config.rules.unit_health);
            }
            state.insert_unit(unit);
        }

        tracing::info!(
            units = state.units.len(),
            bases = state.bases.len(),
            first = %state.active,
            "New game started"
        );
        state
    }

    pub(crate) fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    fn allocate_base_id(&mut self) -> BaseId {
        let id = BaseId(self.next_base_id);
        self.next_base_id += 1;
        id
    }

    pub(crate) fn insert_unit(&mut self, unit: Unit) {
        self.index.insert_unit(unit.id, unit.cell);
        self.units.insert(unit.id, unit);
    }

    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.index.remove_unit(id, unit.cell);
        Some(unit)
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Rules in force.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Player whose turn it is.
    #[must_use]
    pub const fn active_player(&self) -> Player {
        self.active
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// All units in registration order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// All bases in registration order.
    pub fn bases(&self) -> impl Iterator<Item = &Base> {
        self.bases.values()
    }

    /// Look up a unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Look up a base.
    #[must_use]
    pub fn base(&self, id: BaseId) -> Option<&Base> {
        self.bases.get(&id)
    }

    /// The first unit at `cell`, alive or dead.
    #[must_use]
    pub fn first_unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.index
            .first_unit_at(cell)
            .and_then(|id| self.units.get(&id))
    }

    /// Every unit at `cell`.
    pub fn units_at(&self, cell: Cell) -> impl Iterator<Item = &Unit> {
        self.index
            .units_at(cell)
            .iter()
            .filter_map(|id| self.units.get(id))
    }

    /// The base at `cell`.
    #[must_use]
    pub fn base_at(&self, cell: Cell) -> Option<&Base> {
        self.index.base_at(cell).and_then(|id| self.bases.get(&id))
    }

    /// Cell of the selected entity.
    #[must_use]
    pub fn selection_cell(&self) -> Option<Cell> {
        match self.selection? {
            Selection::Unit(id) => self.unit(id).map(|u| u.cell),
            Selection::Base(id) => self.base(id).map(|b| b.cell),
        }
    }

    /// Legal actions for a unit this turn.
    #[must_use]
    pub fn legal_actions_for(&self, id: UnitId) -> LegalActions {
        legal_actions_for_unit(self, id)
    }

    /// Legal actions for the current selection.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        compute_legal_actions(self, self.selection)
    }

    /// Units alive and bases owned by `player`.
    #[must_use]
    pub fn summary(&self, player: Player) -> PlayerSummary {
        PlayerSummary {
            player,
            live_units: self
                .units()
                .filter(|u| u.is_controlled_by(player))
                .count(),
            bases_owned: self.bases().filter(|b| b.is_owned_by(player)).count(),
        }
    }

    /// Copy the whole board for display.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn: self.turn,
            active_player: self.active,
            selection: self.selection,
            units: self.units().cloned().collect(),
            bases: self.bases().cloned().collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Currently selected entity.
    #[must_use]
    pub const fn current_selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Select whatever the active player may control at `cell`.
    ///
    /// A unit on the cell shadows a base under it. The selection is cleared
    /// if the first unit there is an enemy or dead, or if there is no unit
    /// and the base is not the active player's. Selecting the same cell
    /// twice gives the same result.
    pub fn select(&mut self, cell: Cell) -> SelectionResult {
        self.selection = self.selectable_at(cell);

        tracing::debug!(%cell, selection = ?self.selection, "Selected");
        self.selection_result()
    }

    /// What [`GameState::select`] would pick at `cell`.
    #[must_use]
    pub fn selectable_at(&self, cell: Cell) -> Option<Selection> {
        let active = self.active;
        if let Some(unit) = self.first_unit_at(cell) {
            unit.is_controlled_by(active)
                .then_some(Selection::Unit(unit.id))
        } else {
            self.base_at(cell)
                .filter(|base| base.is_owned_by(active))
                .map(|base| Selection::Base(base.id))
        }
    }

    /// Describe what the current selection can do.
    #[must_use]
    pub fn selection_result(&self) -> SelectionResult {
        let legal = self.legal_actions();
        SelectionResult {
            selection: self.selection,
            legal_moves: legal.moves(),
            legal_attacks: legal.attacks(),
            can_capture: self.can_capture(),
            can_build: self.can_build(),
        }
    }

    fn can_capture(&self) -> bool {
        let Some(Selection::Unit(_)) = self.selection else {
            return false;
        };
        self.selection_cell()
            .and_then(|cell| self.base_at(cell))
            .is_some_and(|base| !base.is_owned_by(self.active))
    }

    fn can_build(&self) -> bool {
        let Some(Selection::Base(id)) = self.selection else {
            return false;
        };
        self.base(id)
            .is_some_and(|base| base.is_owned_by(self.active) && !base.has_built)
    }

    // ------------------------------------------------------------------------
    // Consistency
    // ------------------------------------------------------------------------

    /// Check internal bookkeeping.
    ///
    /// Returns a description of every inconsistency between the entity
    /// tables and the position index; empty when all is well.
    #[must_use]
    pub fn consistency_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for unit in self.units() {
            if !self.index.units_at(unit.cell).contains(&unit.id) {
                errors.push(format!("{} missing from index at {}", unit.id, unit.cell));
            }
            if unit.health.current > unit.health.max {
                errors.push(format!("{} is above maximum health", unit.id));
            }
        }
        for base in self.bases() {
            if self.index.base_at(base.cell) != Some(base.id) {
                errors.push(format!("{} missing from index at {}", base.id, base.cell));
            }
        }
        let indexed: usize = self
            .units()
            .map(|u| u.cell)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        if indexed != self.index.occupied_cells() {
            errors.push(format!(
                "index has {} occupied cells, units occupy {indexed}",
                self.index.occupied_cells()
            ));
        }

        match self.selection {
            Some(Selection::Unit(id)) if !self.units.contains_key(&id) => {
                errors.push(format!("selection points at missing {id}"));
            }
            Some(Selection::Base(id)) if !self.bases.contains_key(&id) => {
                errors.push(format!("selection points at missing {id}"));
            }
            _ => {}
        }

        errors
    }

    /// Panics on any inconsistency after `context`.
    #[cfg(feature = "debug-validation")]
    pub(crate) fn debug_validate(&self, context: &str) {
        let errors = self.consistency_errors();
        if !errors.is_empty() {
            for error in &errors {
                tracing::error!(context, error = %error, "Game state inconsistency");
            }
            panic!(
                "game state inconsistent after {context}: {}",
                errors.join("; ")
            );
        }
    }

    #[cfg(not(feature = "debug-validation"))]
    #[allow(clippy::unused_self)]
    pub(crate) fn debug_validate(&self, _context: &str) {}
}
