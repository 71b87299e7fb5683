//! Tap input.
//!
//! A presentation layer reports raw presses in screen points to a
//! [`TapGesture`], which separates taps from camera drags, then resolves
//! what was tapped into a [`TapTarget`] and hands it to [`GameState::tap`].
//! That method is the whole interaction loop: it decides whether a tap
//! selects, moves, attacks, or presses a menu control.

use serde::{Deserialize, Serialize};

use crate::actions::{AttackOutcome, CaptureOutcome, MoveOutcome};
use crate::components::UnitId;
use crate::error::ActionError;
use crate::grid::Cell;
use crate::legal::ActionKind;
use crate::state::{GameState, Selection, SelectionResult};
use crate::turn::TurnReport;

/// Presses that travel this far or more (Manhattan, in screen points) are
/// drags, not taps.
pub const TAP_THRESHOLD: i32 = 44;

/// A point on the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl ScreenPoint {
    /// Create a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// Tap versus drag discrimination for one pointer.
///
/// Drags accumulate into [`TapGesture::pan`] so the caller can scroll its
/// camera by the same amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapGesture {
    origin: Option<ScreenPoint>,
    last: ScreenPoint,
    pan: ScreenPoint,
}

impl TapGesture {
    /// A gesture with no press in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down.
    pub fn press(&mut self, at: ScreenPoint) {
        self.origin = Some(at);
        self.last = at;
    }

    /// Pointer moved while down. Ignored if no press is in progress.
    pub fn drag(&mut self, to: ScreenPoint) {
        if self.origin.is_none() {
            return;
        }
        self.pan.x = self.pan.x.saturating_add(self.last.x.saturating_sub(to.x));
        self.pan.y = self.pan.y.saturating_add(to.y.saturating_sub(self.last.y));
        self.last = to;
    }

    /// Pointer went up.
    ///
    /// Returns the release point if the press counts as a tap.
    pub fn release(&mut self, at: ScreenPoint) -> Option<ScreenPoint> {
        self.drag(at);
        let origin = self.origin.take()?;
        (origin.manhattan_distance(self.last) < TAP_THRESHOLD.unsigned_abs()).then_some(at)
    }

    /// Total camera offset produced by drags so far.
    #[must_use]
    pub const fn pan(&self) -> ScreenPoint {
        self.pan
    }
}

/// Menu bar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiControl {
    /// Hand the turn over.
    EndTurn,
    /// Capture the base under the selected unit.
    Capture,
    /// Build a unit at the selected base.
    Build,
}

/// Whatever was under the tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "value", rename_all = "snake_case")]
pub enum TapTarget {
    /// A menu control.
    Control(UiControl),
    /// A board cell.
    Cell(Cell),
}

/// What a tap did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum TapOutcome {
    /// The selection changed, possibly to nothing.
    Selected(SelectionResult),
    /// The selected unit was tapped again and released.
    Deselected,
    /// The selected unit moved.
    Moved(MoveOutcome),
    /// The selected unit fired.
    Attacked(AttackOutcome),
    /// A base was captured.
    Captured(CaptureOutcome),
    /// A unit was built.
    Built(UnitId),
    /// The turn passed.
    TurnEnded(TurnReport),
    /// The requested action was not allowed. Nothing changed.
    Rejected(ActionError),
}

impl GameState {
    /// Apply a tap.
    ///
    /// Board taps on a highlighted cell move or fire the selected unit and
    /// then drop the selection, and tapping the selected unit again drops
    /// it. Tapping something the active player cannot control keeps the
    /// selection. Any other board tap behaves as [`GameState::select`].
    /// Pressing Build drops a base selection whether or not the build
    /// succeeds.
    pub fn tap(&mut self, target: TapTarget) -> TapOutcome {
        let outcome = match target {
            TapTarget::Control(control) => self.press_control(control),
            TapTarget::Cell(cell) => self.tap_cell(cell),
        };
        tracing::trace!(?target, ?outcome, "Tap");
        outcome
    }

    fn press_control(&mut self, control: UiControl) -> TapOutcome {
        match control {
            UiControl::EndTurn => TapOutcome::TurnEnded(self.end_turn()),
            UiControl::Capture => self
                .capture_base()
                .map_or_else(TapOutcome::Rejected, TapOutcome::Captured),
            UiControl::Build => {
                let base_selected = matches!(self.selection, Some(Selection::Base(_)));
                let result = self.build_unit();
                if base_selected {
                    self.selection = None;
                }
                result.map_or_else(TapOutcome::Rejected, TapOutcome::Built)
            }
        }
    }

    fn tap_cell(&mut self, cell: Cell) -> TapOutcome {
        let Some(Selection::Unit(selected)) = self.selection else {
            return self.tap_select(cell);
        };

        let outcome = match self.legal_actions_for(selected).kind_at(cell) {
            Some(ActionKind::Move) => self
                .move_selected(cell)
                .map_or_else(TapOutcome::Rejected, TapOutcome::Moved),
            Some(ActionKind::Attack) => self
                .attack(cell)
                .map_or_else(TapOutcome::Rejected, TapOutcome::Attacked),
            None if self.index.first_unit_at(cell) == Some(selected) => TapOutcome::Deselected,
            None => return self.tap_select(cell),
        };
        self.selection = None;
        outcome
    }

    /// Select at a tapped cell. Enemy units, wrecks and bases the active
    /// player does not own leave the current selection alone; only an
    /// empty cell clears it.
    fn tap_select(&mut self, cell: Cell) -> TapOutcome {
        let occupied = self.first_unit_at(cell).is_some() || self.base_at(cell).is_some();
        if occupied && self.selectable_at(cell).is_none() {
            return TapOutcome::Selected(self.selection_result());
        }
        TapOutcome::Selected(self.select(cell))
    }
}
