//! Scenario tests that play short games through the public API.
//!
//! Each test follows one complete interaction the way a player would:
//! select, act, hand over the turn, and check the board afterwards.

use dsr_core::prelude::*;
use dsr_test_utils::fixtures::{duel, red_factory, tank_on_neutral_base, LayoutBuilder};

// =============================================================================
// Movement
// =============================================================================

#[test]
fn test_opening_move() {
    let mut game = GameState::new_game();
    let tank = Cell::from_world(WorldPos::new(-128, -320));

    let result = game.select(tank);
    assert!(matches!(result.selection, Some(Selection::Unit(_))));
    assert!(result
        .legal_moves
        .contains(&Cell::from_world(WorldPos::new(-128, -256))));
    for other in game.units().filter(|u| u.owner == Player::Red) {
        assert!(!result.legal_moves.contains(&other.cell));
    }

    let destination = Cell::from_world(WorldPos::new(-128, -256));
    let outcome = game.move_selected(destination).unwrap();
    assert_eq!(outcome.to, destination);
    assert_eq!(game.first_unit_at(destination).unwrap().id, outcome.unit);

    assert_eq!(
        game.move_selected(destination + CellOffset::new(0, 1)),
        Err(ActionError::AlreadyMoved)
    );
}

#[test]
fn test_move_path_legs() {
    let mut game = duel();
    game.select(Cell::ORIGIN);
    let outcome = game.move_selected(Cell::new(-2, -2)).unwrap();
    assert_eq!(
        outcome.path,
        vec![CellOffset::new(-2, 0), CellOffset::new(0, -2)]
    );
}

#[test]
fn test_moved_unit_can_move_next_turn() {
    let mut game = duel();
    game.select(Cell::ORIGIN);
    game.move_selected(Cell::new(1, 0)).unwrap();
    game.end_turn();
    game.end_turn();

    game.select(Cell::new(1, 0));
    assert!(game.move_selected(Cell::new(2, 0)).is_ok());
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_three_attacks_over_three_turns_kill() {
    let mut game = duel();
    let blue_cell = Cell::new(0, 2);

    game.select(Cell::ORIGIN);
    let first = game.attack(blue_cell).unwrap();
    assert_eq!(first.remaining_health, 2);
    assert!(!first.target_died);
    assert!(game.first_unit_at(blue_cell).unwrap().is_alive());

    let mut last = first;
    for _ in 0..2 {
        game.end_turn();
        game.end_turn();
        game.select(Cell::ORIGIN);
        last = game.attack(blue_cell).unwrap();
    }

    assert_eq!(last.remaining_health, 0);
    assert!(last.target_died);
    let dead = game.unit(last.target).unwrap();
    assert!(!dead.is_alive());
    assert_eq!(dead.health.current, 0);

    let report = game.end_turn();
    assert_eq!(report.pruned, vec![last.target]);
    assert!(game.first_unit_at(blue_cell).is_none());
}

#[test]
fn test_dead_unit_blocks_until_pruned() {
    let mut game = LayoutBuilder::new()
        .unit(Player::Red, 0, 0)
        .unit(Player::Red, 3, 0)
        .wounded(Player::Blue, 1, 0, 1)
        .build();

    game.select(Cell::ORIGIN);
    assert!(game.attack(Cell::new(1, 0)).unwrap().target_died);

    // Neither side may enter or target the wreck.
    game.select(Cell::new(3, 0));
    let legal = game.legal_actions();
    assert_eq!(legal.kind_at(Cell::new(1, 0)), None);
    assert_eq!(
        game.move_selected(Cell::new(1, 0)),
        Err(ActionError::IllegalDestination)
    );

    game.end_turn();
    game.end_turn();
    game.select(Cell::new(3, 0));
    assert!(game.move_selected(Cell::new(1, 0)).is_ok());
}

#[test]
fn test_enemy_turn_cannot_touch_red() {
    let mut game = duel();
    game.end_turn();

    let result = game.select(Cell::ORIGIN);
    assert_eq!(result.selection, None);
    assert_eq!(
        game.attack(Cell::ORIGIN),
        Err(ActionError::NothingSelected)
    );

    game.select(Cell::new(0, 2));
    let attack = game.attack(Cell::ORIGIN).unwrap();
    assert_eq!(attack.facing(), Some(Direction::South));
}

// =============================================================================
// Bases
// =============================================================================

#[test]
fn test_capture_then_build_next_turn() {
    let mut game = tank_on_neutral_base();
    game.select(Cell::ORIGIN);
    let capture = game.capture_base().unwrap();
    assert_eq!(capture.owner, Player::Red);
    assert_eq!(game.current_selection(), None);
    assert_eq!(game.capture_base(), Err(ActionError::NothingSelected));

    game.select(Cell::ORIGIN);
    assert_eq!(game.capture_base(), Err(ActionError::AlreadyOwned));

    // The tank shadows the base; move it off, then the base is selectable
    // but still marked as built for this turn.
    game.move_selected(Cell::new(1, 0)).unwrap();
    let result = game.select(Cell::ORIGIN);
    assert!(matches!(result.selection, Some(Selection::Base(_))));
    assert!(!result.can_build);
    assert_eq!(game.build_unit(), Err(ActionError::AlreadyBuilt));

    game.end_turn();
    game.end_turn();
    game.select(Cell::ORIGIN);
    assert!(game.build_unit().is_ok());
}

#[test]
fn test_build_cycle() {
    let mut game = red_factory();
    game.select(Cell::ORIGIN);
    let first = game.build_unit().unwrap();
    let unit = game.unit(first).unwrap();
    assert!(unit.has_moved && unit.has_fired);
    assert_eq!(unit.owner, Player::Red);
    assert_eq!(game.build_unit(), Err(ActionError::AlreadyBuilt));

    game.end_turn();
    game.end_turn();

    // The new tank sits on the base, so it is what a tap there selects.
    let result = game.select(Cell::ORIGIN);
    assert_eq!(result.selection, Some(Selection::Unit(first)));
    game.move_selected(Cell::new(0, 1)).unwrap();

    game.select(Cell::ORIGIN);
    let second = game.build_unit().unwrap();
    assert!(second > first);
    assert_eq!(game.summary(Player::Red).live_units, 2);
}

#[test]
fn test_enemy_cannot_use_captured_base() {
    let mut game = tank_on_neutral_base();
    game.select(Cell::ORIGIN);
    game.capture_base().unwrap();
    game.end_turn();

    assert_eq!(game.select(Cell::ORIGIN).selection, None);
    assert_eq!(game.build_unit(), Err(ActionError::NothingSelected));
}

// =============================================================================
// Taps
// =============================================================================

#[test]
fn test_tap_loop_plays_a_turn() {
    let mut game = GameState::new_game();
    let mut gesture = TapGesture::new();

    gesture.press(ScreenPoint::new(10, 10));
    assert!(gesture.release(ScreenPoint::new(12, 14)).is_some());

    let tank = Cell::new(-2, -5);
    assert!(matches!(
        game.tap(TapTarget::Cell(tank)),
        TapOutcome::Selected(_)
    ));
    assert!(matches!(
        game.tap(TapTarget::Cell(Cell::new(-2, -3))),
        TapOutcome::Moved(_)
    ));
    let TapOutcome::TurnEnded(report) = game.tap(TapTarget::Control(UiControl::EndTurn)) else {
        panic!("expected a turn change");
    };
    assert_eq!(report.active, Player::Blue);
    assert_eq!(report.turn, 2);
}
