//! Proptest strategies for engine inputs.
//!
//! Coordinates are drawn from a small window around the origin so that
//! random scripts actually hit units and bases often enough to matter.

use std::collections::BTreeSet;

use proptest::prelude::*;

use dsr_core::config::{BasePlacement, Layout, UnitPlacement};
use dsr_core::grid::{Cell, CellOffset};
use dsr_core::input::{TapTarget, UiControl};
use dsr_core::player::Player;

use crate::script::Op;

/// Half-width of the board window strategies draw from.
pub const WINDOW: i32 = 8;

/// Generate a cell inside the window.
pub fn arb_cell() -> impl Strategy<Value = Cell> {
    (-WINDOW..=WINDOW, -WINDOW..=WINDOW).prop_map(|(x, y)| Cell::new(x, y))
}

/// Generate a cell anywhere in a large range, negative coordinates included.
pub fn arb_far_cell() -> impl Strategy<Value = Cell> {
    (-100_000i32..100_000, -100_000i32..100_000).prop_map(|(x, y)| Cell::new(x, y))
}

/// Generate an offset of Manhattan length at most `radius`.
pub fn arb_offset_within(radius: i32) -> impl Strategy<Value = CellOffset> {
    (-radius..=radius)
        .prop_flat_map(move |dx| {
            let rest = radius - dx.abs();
            (Just(dx), -rest..=rest)
        })
        .prop_map(|(dx, dy)| CellOffset::new(dx, dy))
}

/// Generate either player.
pub fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Red), Just(Player::Blue)]
}

/// Generate a menu control.
pub fn arb_control() -> impl Strategy<Value = UiControl> {
    prop_oneof![
        Just(UiControl::EndTurn),
        Just(UiControl::Capture),
        Just(UiControl::Build),
    ]
}

/// Generate a layout with units on distinct cells and bases on distinct
/// cells. Units may start on bases and may start damaged.
pub fn arb_layout(max_units: usize, max_bases: usize) -> impl Strategy<Value = Layout> {
    let units = proptest::collection::vec((arb_player(), arb_cell(), 1u32..=3), 1..=max_units);
    let bases = proptest::collection::vec(
        (proptest::option::of(arb_player()), arb_cell()),
        0..=max_bases,
    );
    (units, bases).prop_map(|(units, bases)| {
        let mut seen = BTreeSet::new();
        let units = units
            .into_iter()
            .filter(|(_, cell, _)| seen.insert(*cell))
            .map(|(owner, cell, health)| UnitPlacement::with_health(owner, cell, health))
            .collect();
        let mut seen = BTreeSet::new();
        let bases = bases
            .into_iter()
            .filter(|(_, cell)| seen.insert(*cell))
            .map(|(owner, cell)| BasePlacement { cell, owner })
            .collect();
        Layout { bases, units }
    })
}

/// Generate one scripted op.
pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_cell().prop_map(Op::Select),
        3 => arb_cell().prop_map(Op::Move),
        3 => arb_cell().prop_map(Op::Attack),
        1 => Just(Op::Capture),
        1 => Just(Op::Build),
        1 => Just(Op::EndTurn),
        2 => arb_cell().prop_map(|cell| Op::Tap(TapTarget::Cell(cell))),
        1 => arb_control().prop_map(|control| Op::Tap(TapTarget::Control(control))),
    ]
}

/// Generate a script.
pub fn arb_script(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..max_len)
}
