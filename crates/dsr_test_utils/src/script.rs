//! Scripted play.
//!
//! A script is a list of [`Op`]s applied in order to a [`GameState`].
//! Rejected actions are recorded, not raised, so arbitrary scripts can be
//! thrown at the engine by property tests.
//!
//! The engine has no randomness and iterates entities in id order, so two
//! runs of the same script from the same start must end on identical
//! boards. [`verify_replay`] checks exactly that.

use dsr_core::error::ActionError;
use dsr_core::grid::Cell;
use dsr_core::input::TapTarget;
use dsr_core::state::{GameSnapshot, GameState};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Select a cell.
    Select(Cell),
    /// Move the selection.
    Move(Cell),
    /// Fire the selection.
    Attack(Cell),
    /// Capture under the selection.
    Capture,
    /// Build at the selection.
    Build,
    /// Hand over the turn.
    EndTurn,
    /// Feed a tap through the interaction loop.
    Tap(TapTarget),
}

/// What a script run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptLog {
    /// Actions that succeeded.
    pub accepted: usize,
    /// Actions that were refused, with the op index.
    pub rejected: Vec<(usize, ActionError)>,
}

/// Apply one op.
///
/// # Errors
///
/// Returns the engine's refusal for move, attack, capture and build.
pub fn apply(state: &mut GameState, op: Op) -> Result<(), ActionError> {
    match op {
        Op::Select(cell) => {
            state.select(cell);
        }
        Op::Move(cell) => {
            state.move_selected(cell)?;
        }
        Op::Attack(cell) => {
            state.attack(cell)?;
        }
        Op::Capture => {
            state.capture_base()?;
        }
        Op::Build => {
            state.build_unit()?;
        }
        Op::EndTurn => {
            state.end_turn();
        }
        Op::Tap(target) => {
            state.tap(target);
        }
    }
    Ok(())
}

/// Apply every op in order.
pub fn run_script(state: &mut GameState, ops: &[Op]) -> ScriptLog {
    let mut log = ScriptLog::default();
    for (i, &op) in ops.iter().enumerate() {
        match apply(state, op) {
            Ok(()) => log.accepted += 1,
            Err(e) => log.rejected.push((i, e)),
        }
    }
    log
}

/// Run a script twice from fresh starts and compare the final boards.
///
/// Returns the final snapshot when both runs agree.
pub fn verify_replay<F>(setup: F, ops: &[Op]) -> Option<GameSnapshot>
where
    F: Fn() -> GameState,
{
    let mut first = setup();
    let mut second = setup();
    let first_log = run_script(&mut first, ops);
    let second_log = run_script(&mut second, ops);

    let snapshot = first.snapshot();
    (first_log == second_log && snapshot == second.snapshot()).then_some(snapshot)
}
