//! Test fixtures and helpers.
//!
//! Small hand-placed layouts for tests that care about exact positions.
//! The standard opening is available through [`GameState::new_game`].

use dsr_core::config::{BasePlacement, GameConfig, Layout, Rules, UnitPlacement};
use dsr_core::grid::Cell;
use dsr_core::player::Player;
use dsr_core::state::GameState;

/// Fluent builder for [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutBuilder {
    layout: Layout,
    rules: Rules,
    first_player: Option<Player>,
}

impl LayoutBuilder {
    /// Start from an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a full-health unit.
    #[must_use]
    pub fn unit(mut self, owner: Player, x: i32, y: i32) -> Self {
        self.layout
            .units
            .push(UnitPlacement::new(owner, Cell::new(x, y)));
        self
    }

    /// Add a damaged unit.
    #[must_use]
    pub fn wounded(mut self, owner: Player, x: i32, y: i32, health: u32) -> Self {
        self.layout
            .units
            .push(UnitPlacement::with_health(owner, Cell::new(x, y), health));
        self
    }

    /// Add a neutral base.
    #[must_use]
    pub fn neutral_base(mut self, x: i32, y: i32) -> Self {
        self.layout
            .bases
            .push(BasePlacement::neutral(Cell::new(x, y)));
        self
    }

    /// Add an owned base.
    #[must_use]
    pub fn base(mut self, owner: Player, x: i32, y: i32) -> Self {
        self.layout
            .bases
            .push(BasePlacement::owned(Cell::new(x, y), owner));
        self
    }

    /// Override the rules.
    #[must_use]
    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Let `player` move first.
    #[must_use]
    pub fn first(mut self, player: Player) -> Self {
        self.first_player = Some(player);
        self
    }

    /// The layout built so far.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout.clone()
    }

    /// The config built so far.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        GameConfig {
            rules: self.rules,
            layout: self.layout.clone(),
            first_player: self.first_player.unwrap_or(Player::Red),
        }
    }

    /// Start a game.
    ///
    /// # Panics
    ///
    /// Panics if the layout is not a valid config.
    #[must_use]
    pub fn build(self) -> GameState {
        match GameState::from_config(self.config()) {
            Ok(state) => state,
            Err(e) => panic!("fixture layout rejected: {e}"),
        }
    }
}

/// One Red tank at the origin facing one Blue tank two cells north.
#[must_use]
pub fn duel() -> GameState {
    LayoutBuilder::new()
        .unit(Player::Red, 0, 0)
        .unit(Player::Blue, 0, 2)
        .build()
}

/// A Red tank parked on a neutral base, nothing else on the board.
#[must_use]
pub fn tank_on_neutral_base() -> GameState {
    LayoutBuilder::new()
        .neutral_base(0, 0)
        .unit(Player::Red, 0, 0)
        .build()
}

/// A Red base with an empty board around it.
#[must_use]
pub fn red_factory() -> GameState {
    LayoutBuilder::new().base(Player::Red, 0, 0).build()
}
