//! Game configuration.
//!
//! A [`GameConfig`] describes the rules constants and the starting
//! layout of a game. It is plain data that can be written in RON:
//!
//! ```ron
//! GameConfig(
//!     rules: Rules(move_radius: 4, unit_health: 3),
//!     layout: Layout(
//!         bases: [BasePlacement(cell: (x: 0, y: 0))],
//!         units: [
//!             UnitPlacement(owner: red, cell: (x: 0, y: -2)),
//!             UnitPlacement(owner: blue, cell: (x: 0, y: 2), health: Some(1)),
//!         ],
//!     ),
//! )
//! ```
//!
//! This module does no IO. File loading lives in the headless runner.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::grid::{Cell, WorldPos, CELL_SIZE};
use crate::player::Player;

/// Default Manhattan reach of a unit's move and attack.
pub const DEFAULT_MOVE_RADIUS: u32 = 4;

/// Default hit points of a unit.
pub const DEFAULT_UNIT_HEALTH: u32 = 3;

/// Largest accepted move radius.
pub const MAX_MOVE_RADIUS: u32 = 64;

/// Largest accepted absolute cell coordinate of a starting placement.
pub const MAX_COORDINATE: i32 = 1 << 24;

/// Largest accepted width or height, in cells, of the starting layout.
pub const MAX_BOARD_EXTENT: u32 = 1024;

/// Rules constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Manhattan reach of moves and attacks.
    #[serde(default = "default_move_radius")]
    pub move_radius: u32,
    /// Starting (and maximum) health of every unit.
    #[serde(default = "default_unit_health")]
    pub unit_health: u32,
}

fn default_move_radius() -> u32 {
    DEFAULT_MOVE_RADIUS
}

fn default_unit_health() -> u32 {
    DEFAULT_UNIT_HEALTH
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            move_radius: DEFAULT_MOVE_RADIUS,
            unit_health: DEFAULT_UNIT_HEALTH,
        }
    }
}

/// Where a base starts and who holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePlacement {
    /// Cell of the base.
    pub cell: Cell,
    /// Initial owner, `None` for a neutral base.
    #[serde(default)]
    pub owner: Option<Player>,
}

impl BasePlacement {
    /// A neutral base at `cell`.
    #[must_use]
    pub const fn neutral(cell: Cell) -> Self {
        Self { cell, owner: None }
    }

    /// A base already held by `owner`.
    #[must_use]
    pub const fn owned(cell: Cell, owner: Player) -> Self {
        Self {
            cell,
            owner: Some(owner),
        }
    }
}

/// Where a unit starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// Owning player.
    pub owner: Player,
    /// Starting cell.
    pub cell: Cell,
    /// Starting health, full health when `None`.
    #[serde(default)]
    pub health: Option<u32>,
}

impl UnitPlacement {
    /// A full-health unit.
    #[must_use]
    pub const fn new(owner: Player, cell: Cell) -> Self {
        Self {
            owner,
            cell,
            health: None,
        }
    }

    /// A unit starting with `health` hit points.
    #[must_use]
    pub const fn with_health(owner: Player, cell: Cell, health: u32) -> Self {
        Self {
            owner,
            cell,
            health: Some(health),
        }
    }
}

/// Starting positions of every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Bases, registered in this order.
    #[serde(default)]
    pub bases: Vec<BasePlacement>,
    /// Units, registered in this order.
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
}

impl Layout {
    /// The standard opening: a 3×3 grid of neutral bases with five Red
    /// tanks along the bottom and five Blue tanks between them and the
    /// bases.
    #[must_use]
    pub fn standard() -> Self {
        let mut bases = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                let world = WorldPos::new(-256 + col * 256, -64 + row * 256);
                bases.push(BasePlacement::neutral(Cell::from_world(world)));
            }
        }

        let mut units = Vec::with_capacity(10);
        for i in 0..5 {
            let world = WorldPos::new(-128 + i * CELL_SIZE, -320);
            units.push(UnitPlacement::new(Player::Red, Cell::from_world(world)));
        }
        for i in 0..5 {
            let world = WorldPos::new(-128 + i * CELL_SIZE, -128);
            units.push(UnitPlacement::new(Player::Blue, Cell::from_world(world)));
        }

        Self { bases, units }
    }
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rules constants.
    #[serde(default)]
    pub rules: Rules,
    /// Starting layout.
    pub layout: Layout,
    /// Player who moves first.
    #[serde(default = "default_first_player")]
    pub first_player: Player,
}

fn default_first_player() -> Player {
    Player::Red
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            layout: Layout::standard(),
            first_player: Player::Red,
        }
    }
}

impl GameConfig {
    /// Config with default rules and the given layout.
    #[must_use]
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Parse and validate a config from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfigParse`] for malformed RON and
    /// [`GameError::InvalidConfig`] if validation fails.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this config as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if serialization fails.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    /// Check that this config describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if the move radius is zero or
    /// above [`MAX_MOVE_RADIUS`], unit health is zero, a unit starts above
    /// maximum health, two bases share a cell, a placement lies beyond
    /// [`MAX_COORDINATE`], or the layout spans more than
    /// [`MAX_BOARD_EXTENT`] cells on either axis.
    pub fn validate(&self) -> Result<()> {
        if self.rules.move_radius == 0 {
            return Err(GameError::InvalidConfig(
                "move radius must be positive".into(),
            ));
        }
        if self.rules.move_radius > MAX_MOVE_RADIUS {
            return Err(GameError::InvalidConfig(format!(
                "move radius {} exceeds the maximum of {MAX_MOVE_RADIUS}",
                self.rules.move_radius
            )));
        }
        if self.rules.unit_health == 0 {
            return Err(GameError::InvalidConfig(
                "unit health must be positive".into(),
            ));
        }

        for placement in &self.layout.units {
            if let Some(health) = placement.health {
                if health > self.rules.unit_health {
                    return Err(GameError::InvalidConfig(format!(
                        "unit at {} starts with {health} health, maximum is {}",
                        placement.cell, self.rules.unit_health
                    )));
                }
            }
        }

        for (i, a) in self.layout.bases.iter().enumerate() {
            if self.layout.bases[..i].iter().any(|b| b.cell == a.cell) {
                return Err(GameError::InvalidConfig(format!(
                    "two bases share cell {}",
                    a.cell
                )));
            }
        }

        self.layout.validate_bounds()
    }
}

impl Layout {
    /// Every placed cell, bases first.
    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bases
            .iter()
            .map(|b| b.cell)
            .chain(self.units.iter().map(|u| u.cell))
    }

    fn validate_bounds(&self) -> Result<()> {
        let range = -MAX_COORDINATE..=MAX_COORDINATE;
        if let Some(cell) = self
            .cells()
            .find(|c| !range.contains(&c.x) || !range.contains(&c.y))
        {
            return Err(GameError::InvalidConfig(format!(
                "placement at {cell} is beyond coordinate {MAX_COORDINATE}"
            )));
        }

        let Some(first) = self.cells().next() else {
            return Ok(());
        };
        let (min, max) = self.cells().fold((first, first), |(min, max), c| {
            (
                Cell::new(min.x.min(c.x), min.y.min(c.y)),
                Cell::new(max.x.max(c.x), max.y.max(c.y)),
            )
        });
        let width = max.x.abs_diff(min.x) + 1;
        let height = max.y.abs_diff(min.y) + 1;
        if width > MAX_BOARD_EXTENT || height > MAX_BOARD_EXTENT {
            return Err(GameError::InvalidConfig(format!(
                "layout spans {width}x{height} cells, maximum is {MAX_BOARD_EXTENT} on each axis"
            )));
        }
        Ok(())
    }
}
