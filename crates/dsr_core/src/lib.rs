//! # Dead Storm Rising Core
//!
//! Rules engine for a two-player, turn-based tank game on an unbounded
//! square grid.
//!
//! This crate contains **only** game rules:
//! - No rendering
//! - No IO
//! - No randomness
//!
//! A presentation layer (or the headless runner) feeds it selections and
//! actions and reads back typed outcomes.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Cells, world positions and offsets
//! - [`components`] - Units and bases
//! - [`state`] - The [`GameState`] aggregate and selection
//! - [`legal`] - Legal move and attack computation
//! - [`actions`] - Move, attack, capture and build
//! - [`turn`] - Turn handover
//! - [`input`] - Tap gestures and the tap interaction loop
//! - [`config`] - Rules constants and starting layouts

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod actions;
pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod legal;
pub mod occupancy;
pub mod player;
pub mod state;
pub mod turn;

pub use components::{BaseId, UnitId};
pub use state::GameState;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::actions::{AttackOutcome, CaptureOutcome, MoveOutcome};
    pub use crate::components::*;
    pub use crate::config::{BasePlacement, GameConfig, Layout, Rules, UnitPlacement};
    pub use crate::error::{ActionError, ErrorKind, GameError, Result};
    pub use crate::grid::{Cell, CellOffset, Direction, WorldPos, CELL_SIZE};
    pub use crate::input::{ScreenPoint, TapGesture, TapOutcome, TapTarget, UiControl};
    pub use crate::legal::{ActionKind, LegalAction, LegalActions};
    pub use crate::player::Player;
    pub use crate::state::{GameSnapshot, GameState, PlayerSummary, Selection, SelectionResult};
    pub use crate::turn::TurnReport;
}
