//! Entity definitions.
//!
//! Units and bases are plain data. They never point back at the game state
//! or at each other; everything relational is answered by position lookup
//! in [`crate::occupancy`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::player::Player;

/// Damage dealt by a single attack.
pub const ATTACK_DAMAGE: u32 = 1;

/// Unique identifier for a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Unique identifier for a base.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BaseId(pub u32);

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base#{}", self.0)
    }
}

// ============================================================================
// Health
// ============================================================================

/// Hit points of a unit.
///
/// Health only ever goes down. It bottoms out at zero, which is the one and
/// only definition of death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Maximum health points.
    pub max: u32,
}

impl Health {
    /// Create new health at full strength.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Create health with a specific current value, clamped to `max`.
    #[must_use]
    pub const fn with_current(current: u32, max: u32) -> Self {
        let current = if current > max { max } else { current };
        Self { current, max }
    }

    /// Check if health has run out.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Check if at full health.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Apply damage, returning the damage actually taken.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }
}

// ============================================================================
// Unit
// ============================================================================

/// A tank on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Owning player.
    pub owner: Player,
    /// Current cell.
    pub cell: Cell,
    /// Remaining hit points.
    pub health: Health,
    /// Whether the unit has moved this turn.
    pub has_moved: bool,
    /// Whether the unit has fired this turn.
    pub has_fired: bool,
}

impl Unit {
    /// Create a fresh unit that can act immediately.
    #[must_use]
    pub const fn new(id: UnitId, owner: Player, cell: Cell, max_health: u32) -> Self {
        Self {
            id,
            owner,
            cell,
            health: Health::new(max_health),
            has_moved: false,
            has_fired: false,
        }
    }

    /// Create a unit that has already spent its turn.
    ///
    /// Freshly built units start this way.
    #[must_use]
    pub const fn exhausted(id: UnitId, owner: Player, cell: Cell, max_health: u32) -> Self {
        Self {
            has_moved: true,
            has_fired: true,
            ..Self::new(id, owner, cell, max_health)
        }
    }

    /// Whether the unit still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Whether the unit is alive and belongs to `player`.
    #[must_use]
    pub fn is_controlled_by(&self, player: Player) -> bool {
        self.owner == player && self.is_alive()
    }

    /// Take one attack's worth of damage.
    ///
    /// Returns `true` if this hit killed the unit.
    pub fn take_hit(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.health.apply_damage(ATTACK_DAMAGE);
        was_alive && !self.is_alive()
    }

    /// Clear the per-turn flags. Dead units keep theirs.
    pub fn reset_for_turn(&mut self) {
        if self.is_alive() {
            self.has_moved = false;
            self.has_fired = false;
        }
    }
}

// ============================================================================
// Base
// ============================================================================

/// A capturable production site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    /// Unique identifier.
    pub id: BaseId,
    /// Owning player, `None` while unclaimed.
    pub owner: Option<Player>,
    /// Cell the base occupies.
    pub cell: Cell,
    /// Whether the base has produced a unit since the last reset.
    pub has_built: bool,
}

impl Base {
    /// Create an unclaimed base.
    #[must_use]
    pub const fn neutral(id: BaseId, cell: Cell) -> Self {
        Self {
            id,
            owner: None,
            cell,
            has_built: false,
        }
    }

    /// Whether `player` owns this base.
    #[must_use]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    /// Hand the base to a new owner.
    ///
    /// A newly captured base cannot build until the next reset.
    pub fn capture(&mut self, player: Player) {
        self.owner = Some(player);
        self.has_built = true;
    }

    /// Allow the base to build again.
    pub fn reset_for_turn(&mut self) {
        self.has_built = false;
    }
}
