//! JSON protocol for headless game communication.
//!
//! The headless runner communicates via JSON lines (one JSON object per line):
//!
//! **Input (stdin):** Commands from the controller
//! **Output (stdout):** Outcomes, board state and errors
//!
//! # Protocol Flow
//!
//! 1. Runner starts, outputs `{"type":"ready",...}`
//! 2. Controller sends commands as JSON lines
//! 3. Runner answers every command with exactly one line
//! 4. On `quit`, outputs `{"type":"bye"}` and stops reading
//!
//! Coordinates are cells unless the command carries `"world": true`, in
//! which case they are world units and snap to the nearest cell.
//!
//! # Example Session
//!
//! ```text
//! <- {"type":"ready","version":"1.0","turn":1,"active_player":"red"}
//! -> {"cmd":"select","x":-128,"y":-320,"world":true}
//! <- {"type":"selected","result":{"selection":{"kind":"unit","id":1},...}}
//! -> {"cmd":"move","x":-2,"y":-4}
//! <- {"type":"moved","outcome":{"unit":1,"from":{"x":-2,"y":-5},...}}
//! -> {"cmd":"move","x":-2,"y":-3}
//! <- {"type":"error","message":"Unit has already moved this turn","kind":"precondition","cmd":"move"}
//! -> {"cmd":"end_turn"}
//! <- {"type":"turn_ended","report":{"previous":"red","active":"blue","turn":2,"pruned":[]}}
//! ```

use serde::{Deserialize, Serialize};

use dsr_core::actions::{AttackOutcome, CaptureOutcome, MoveOutcome};
use dsr_core::error::{ActionError, ErrorKind};
use dsr_core::grid::{Cell, WorldPos};
use dsr_core::input::UiControl;
use dsr_core::player::Player;
use dsr_core::state::{GameSnapshot, PlayerSummary, SelectionResult};
use dsr_core::turn::TurnReport;
use dsr_core::UnitId;

/// Protocol version reported in the ready line.
pub const PROTOCOL_VERSION: &str = "1.0";

// ============================================================================
// Input Commands (Controller -> Runner)
// ============================================================================

/// Commands that can be sent to the headless runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Discard the current game and start the standard one.
    NewGame,

    /// Discard the current game and start one from a scenario file.
    LoadScenario { path: String },

    /// Select whatever the active player controls at a cell.
    Select {
        x: i32,
        y: i32,
        #[serde(default)]
        world: bool,
    },

    /// Tap a cell through the interaction loop.
    Tap {
        x: i32,
        y: i32,
        #[serde(default)]
        world: bool,
    },

    /// Press a menu control.
    Control { control: UiControl },

    /// Move the selected unit.
    Move {
        x: i32,
        y: i32,
        #[serde(default)]
        world: bool,
    },

    /// Fire the selected unit.
    Attack {
        x: i32,
        y: i32,
        #[serde(default)]
        world: bool,
    },

    /// Capture the base under the selection.
    Capture,

    /// Build at the selected base.
    Build,

    /// Hand the turn to the other player.
    EndTurn,

    /// Report the whole board without changing it.
    Query,

    /// Render the board as ASCII.
    Render,

    /// Stop the runner.
    Quit,
}

/// Resolve protocol coordinates to a cell.
#[must_use]
pub const fn resolve_cell(x: i32, y: i32, world: bool) -> Cell {
    if world {
        Cell::from_world(WorldPos::new(x, y))
    } else {
        Cell::new(x, y)
    }
}

// ============================================================================
// Output Responses (Runner -> Controller)
// ============================================================================

/// Responses sent from the headless runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Runner is ready to accept commands, or a new game has started.
    Ready {
        version: String,
        turn: u32,
        active_player: Player,
    },

    /// The selection changed.
    Selected { result: SelectionResult },

    /// A unit moved.
    Moved { outcome: MoveOutcome },

    /// A unit fired.
    Attacked { outcome: AttackOutcome },

    /// A base changed hands.
    Captured { outcome: CaptureOutcome },

    /// A base produced a unit.
    Built { unit: UnitId, cell: Cell },

    /// The turn passed.
    TurnEnded { report: TurnReport },

    /// Full board state.
    State {
        snapshot: GameSnapshot,
        summaries: Vec<PlayerSummary>,
    },

    /// ASCII rendering of the board, top row first.
    Board { turn: u32, lines: Vec<String> },

    /// A command failed. The game is unchanged.
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        kind: Option<ErrorKind>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cmd: Option<String>,
    },

    /// Goodbye message before shutdown.
    Bye,
}

// ============================================================================
// Helpers
// ============================================================================

impl Response {
    /// Create a ready response.
    pub fn ready(turn: u32, active_player: Player) -> Self {
        Self::Ready {
            version: PROTOCOL_VERSION.to_string(),
            turn,
            active_player,
        }
    }

    /// Create an error response for a malformed line or failed IO.
    pub fn error(message: impl Into<String>, cmd: Option<&str>) -> Self {
        Self::Error {
            message: message.into(),
            kind: None,
            cmd: cmd.map(String::from),
        }
    }

    /// Create an error response for a refused action.
    pub fn rejected(error: ActionError, cmd: &str) -> Self {
        Self::Error {
            message: error.to_string(),
            kind: Some(error.kind()),
            cmd: Some(cmd.to_string()),
        }
    }

    /// Serialize to JSON line (with newline).
    pub fn to_json_line(&self) -> String {
        let mut json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"Serialization failed: {e}"}}"#)
        });
        json.push('\n');
        json
    }
}

impl Command {
    /// Parse from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get command name for error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewGame => "new_game",
            Self::LoadScenario { .. } => "load_scenario",
            Self::Select { .. } => "select",
            Self::Tap { .. } => "tap",
            Self::Control { .. } => "control",
            Self::Move { .. } => "move",
            Self::Attack { .. } => "attack",
            Self::Capture => "capture",
            Self::Build => "build",
            Self::EndTurn => "end_turn",
            Self::Query => "query",
            Self::Render => "render",
            Self::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_defaults_to_cells() {
        let cmd = Command::from_json(r#"{"cmd":"select","x":-2,"y":-5}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Select {
                x: -2,
                y: -5,
                world: false
            }
        );
    }

    #[test]
    fn test_parse_world_coordinates() {
        let cmd = Command::from_json(r#"{"cmd":"move","x":-128,"y":-256,"world":true}"#).unwrap();
        let Command::Move { x, y, world } = cmd else {
            panic!("expected a move");
        };
        assert_eq!(resolve_cell(x, y, world), Cell::new(-2, -4));
    }

    #[test]
    fn test_extreme_world_coordinates_resolve() {
        let cmd =
            Command::from_json(r#"{"cmd":"select","x":2147483647,"y":-2147483648,"world":true}"#)
                .unwrap();
        let Command::Select { x, y, world } = cmd else {
            panic!("expected a select");
        };
        assert_eq!(resolve_cell(x, y, world), Cell::new(33_554_432, -33_554_432));
    }

    #[test]
    fn test_parse_control() {
        let cmd = Command::from_json(r#"{"cmd":"control","control":"end_turn"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Control {
                control: UiControl::EndTurn
            }
        );
    }

    #[test]
    fn test_parse_unit_commands() {
        assert_eq!(Command::from_json(r#"{"cmd":"capture"}"#).unwrap(), Command::Capture);
        assert_eq!(Command::from_json(r#"{"cmd":"end_turn"}"#).unwrap(), Command::EndTurn);
        assert!(Command::from_json(r#"{"cmd":"teleport"}"#).is_err());
    }

    #[test]
    fn test_serialize_rejection() {
        let json = Response::rejected(ActionError::AlreadyMoved, "move").to_json_line();
        assert!(json.ends_with('\n'));
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""kind":"precondition""#));
        assert!(json.contains(r#""cmd":"move""#));
    }

    #[test]
    fn test_serialize_ready() {
        let json = Response::ready(1, Player::Red).to_json_line();
        assert!(json.contains(r#""type":"ready""#));
        assert!(json.contains(r#""active_player":"red""#));
    }

    #[test]
    fn test_plain_error_omits_kind() {
        let json = Response::error("Parse error", None).to_json_line();
        assert!(!json.contains("kind"));
        assert!(!json.contains("cmd"));
    }
}
