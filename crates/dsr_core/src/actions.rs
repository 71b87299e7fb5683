//! Action resolution.
//!
//! Every action follows the same shape: look up the selection, check every
//! precondition against the current state, and only then mutate. A returned
//! [`ActionError`] therefore always means nothing changed.
//!
//! Moves and attacks leave the selection in place so the same unit can
//! follow up (move then fire, or be told it already moved). Capturing
//! clears it.

use serde::{Deserialize, Serialize};

use crate::components::{BaseId, Unit, UnitId, ATTACK_DAMAGE};
use crate::error::ActionError;
use crate::grid::{Cell, CellOffset, Direction};
use crate::legal::ActionKind;
use crate::player::Player;
use crate::state::{GameState, Selection};

/// Result of a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Unit that moved.
    pub unit: UnitId,
    /// Cell it left.
    pub from: Cell,
    /// Cell it arrived at.
    pub to: Cell,
    /// Straight legs to animate: the X leg first, then the Y leg.
    /// Zero-length legs are omitted.
    pub path: Vec<CellOffset>,
}

/// Result of a successful attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Unit that fired.
    pub attacker: UnitId,
    /// Unit that was hit.
    pub target: UnitId,
    /// Where the shot started.
    pub from: Cell,
    /// Where the shot landed.
    pub to: Cell,
    /// Damage dealt.
    pub damage: u32,
    /// Target health after the hit.
    pub remaining_health: u32,
    /// Whether this hit destroyed the target.
    pub target_died: bool,
}

impl AttackOutcome {
    /// The direction the attacker turns to fire.
    #[must_use]
    pub fn facing(&self) -> Option<Direction> {
        self.from.offset_to(self.to).dominant_direction()
    }
}

/// Result of a successful capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    /// Base that changed hands.
    pub base: BaseId,
    /// Its cell.
    pub cell: Cell,
    /// Owner before the capture.
    pub previous_owner: Option<Player>,
    /// Owner after the capture.
    pub owner: Player,
}

/// Split a displacement into an X leg followed by a Y leg.
#[must_use]
pub fn straight_path(from: Cell, to: Cell) -> Vec<CellOffset> {
    let offset = from.offset_to(to);
    [CellOffset::new(offset.dx, 0), CellOffset::new(0, offset.dy)]
        .into_iter()
        .filter(|leg| !leg.is_zero())
        .collect()
}

impl GameState {
    fn selected_unit(&self) -> Result<Option<&Unit>, ActionError> {
        match self.selection {
            None => Err(ActionError::NothingSelected),
            Some(Selection::Unit(id)) => Ok(self.unit(id)),
            Some(Selection::Base(_)) => Ok(None),
        }
    }

    /// Move the selected unit to `destination`.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NothingSelected`] if nothing is selected.
    /// - [`ActionError::AlreadyMoved`] if the unit moved this turn.
    /// - [`ActionError::IllegalDestination`] if `destination` is not in the
    ///   unit's legal move set (a selected base has none).
    pub fn move_selected(&mut self, destination: Cell) -> Result<MoveOutcome, ActionError> {
        let Some(unit) = self.selected_unit()? else {
            return Err(ActionError::IllegalDestination);
        };
        if unit.has_moved {
            return Err(ActionError::AlreadyMoved);
        }
        let id = unit.id;
        let from = unit.cell;
        if !self
            .legal_actions_for(id)
            .contains(destination, ActionKind::Move)
        {
            return Err(ActionError::IllegalDestination);
        }

        if let Some(unit) = self.units.get_mut(&id) {
            unit.has_moved = true;
            unit.cell = destination;
        }
        self.index.move_unit(id, from, destination);

        tracing::debug!(unit = %id, %from, to = %destination, "Unit moved");
        self.debug_validate("move");

        Ok(MoveOutcome {
            unit: id,
            from,
            to: destination,
            path: straight_path(from, destination),
        })
    }

    /// Fire the selected unit at the enemy on `target`.
    ///
    /// Deals exactly one point of damage. A unit brought to zero health is
    /// dead from that moment but stays on the board until the turn ends.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NothingSelected`] if nothing is selected.
    /// - [`ActionError::AlreadyFired`] if the unit fired this turn.
    /// - [`ActionError::IllegalTarget`] if `target` is not in the unit's
    ///   legal attack set (a selected base has none).
    pub fn attack(&mut self, target: Cell) -> Result<AttackOutcome, ActionError> {
        let Some(unit) = self.selected_unit()? else {
            return Err(ActionError::IllegalTarget);
        };
        if unit.has_fired {
            return Err(ActionError::AlreadyFired);
        }
        let attacker = unit.id;
        let from = unit.cell;
        if !self
            .legal_actions_for(attacker)
            .contains(target, ActionKind::Attack)
        {
            return Err(ActionError::IllegalTarget);
        }
        let Some(victim) = self.index.first_unit_at(target) else {
            return Err(ActionError::IllegalTarget);
        };

        if let Some(unit) = self.units.get_mut(&attacker) {
            unit.has_fired = true;
        }
        let (target_died, remaining_health) = match self.units.get_mut(&victim) {
            Some(unit) => (unit.take_hit(), unit.health.current),
            None => (false, 0),
        };

        tracing::debug!(
            attacker = %attacker,
            target = %victim,
            remaining_health,
            target_died,
            "Unit fired"
        );
        if target_died {
            tracing::info!(unit = %victim, cell = %target, "Unit destroyed");
        }
        self.debug_validate("attack");

        Ok(AttackOutcome {
            attacker,
            target: victim,
            from,
            to: target,
            damage: ATTACK_DAMAGE,
            remaining_health,
            target_died,
        })
    }

    /// Claim the base under the selected entity for the active player.
    ///
    /// The captured base cannot build until the next turn starts. The
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NothingSelected`] if nothing is selected.
    /// - [`ActionError::NoBaseHere`] if no base shares the selection's cell.
    /// - [`ActionError::AlreadyOwned`] if the active player already owns it.
    pub fn capture_base(&mut self) -> Result<CaptureOutcome, ActionError> {
        if self.selection.is_none() {
            return Err(ActionError::NothingSelected);
        }
        let Some(cell) = self.selection_cell() else {
            return Err(ActionError::NoBaseHere);
        };
        let Some(base_id) = self.index.base_at(cell) else {
            return Err(ActionError::NoBaseHere);
        };
        let active = self.active;
        let Some(base) = self.bases.get_mut(&base_id) else {
            return Err(ActionError::NoBaseHere);
        };
        if base.is_owned_by(active) {
            return Err(ActionError::AlreadyOwned);
        }

        let previous_owner = base.owner;
        base.capture(active);
        self.selection = None;

        tracing::info!(base = %base_id, %cell, owner = %active, "Base captured");
        self.debug_validate("capture");

        Ok(CaptureOutcome {
            base: base_id,
            cell,
            previous_owner,
            owner: active,
        })
    }

    /// Have the selected base produce a unit.
    ///
    /// The new unit belongs to the base's owner, appears on the base's cell
    /// and cannot act until its owner's next turn. The selection is left
    /// on the base.
    ///
    /// # Errors
    ///
    /// - [`ActionError::NothingSelected`] if nothing is selected.
    /// - [`ActionError::NotABase`] if the selection is not a base owned by
    ///   the active player.
    /// - [`ActionError::AlreadyBuilt`] if the base already built this turn.
    pub fn build_unit(&mut self) -> Result<UnitId, ActionError> {
        let base_id = match self.selection {
            None => return Err(ActionError::NothingSelected),
            Some(Selection::Unit(_)) => return Err(ActionError::NotABase),
            Some(Selection::Base(id)) => id,
        };
        let active = self.active;
        let Some(base) = self.bases.get(&base_id) else {
            return Err(ActionError::NotABase);
        };
        if !base.is_owned_by(active) {
            return Err(ActionError::NotABase);
        }
        if base.has_built {
            return Err(ActionError::AlreadyBuilt);
        }
        let cell = base.cell;

        if let Some(base) = self.bases.get_mut(&base_id) {
            base.has_built = true;
        }
        let id = self.allocate_unit_id();
        self.insert_unit(Unit::exhausted(id, active, cell, self.rules.unit_health));

        tracing::debug!(base = %base_id, unit = %id, %cell, "Unit built");
        self.debug_validate("build");

        Ok(id)
    }
}
