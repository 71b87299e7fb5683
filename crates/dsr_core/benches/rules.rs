//! Rules engine benchmarks for dsr_core.
//!
//! Run with: `cargo bench -p dsr_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsr_core::prelude::*;

/// A dense board: a 9x9 block of alternating Red and Blue tanks.
fn crowded_game(radius: u32) -> GameState {
    let mut units = Vec::new();
    for y in -4..=4 {
        for x in -4..=4 {
            let owner = if (x + y) % 2 == 0 {
                Player::Red
            } else {
                Player::Blue
            };
            units.push(UnitPlacement::new(owner, Cell::new(x * 2, y * 2)));
        }
    }
    let config = GameConfig {
        rules: Rules {
            move_radius: radius,
            ..Rules::default()
        },
        layout: Layout {
            bases: Vec::new(),
            units,
        },
        first_player: Player::Red,
    };
    GameState::from_config(config).unwrap_or_else(|_| GameState::new_game())
}

/// Legal set computation at the standard and an extended reach.
pub fn legal_actions_benchmark(c: &mut Criterion) {
    let standard = GameState::new_game();
    let first = standard.units().next().map(|u| u.id).unwrap_or(UnitId(1));
    c.bench_function("legal_actions/opening", |b| {
        b.iter(|| black_box(standard.legal_actions_for(black_box(first))))
    });

    let crowded = crowded_game(12);
    c.bench_function("legal_actions/crowded_radius_12", |b| {
        b.iter(|| black_box(crowded.legal_actions_for(black_box(UnitId(41)))))
    });
}

/// A full Red turn: every tank selects, moves one row up, and the turn ends.
pub fn turn_cycle_benchmark(c: &mut Criterion) {
    c.bench_function("turn_cycle/opening", |b| {
        b.iter_batched(
            GameState::new_game,
            |mut game| {
                let red: Vec<Cell> = game
                    .units()
                    .filter(|u| u.owner == Player::Red)
                    .map(|u| u.cell)
                    .collect();
                for cell in red {
                    game.select(cell);
                    let _ = game.move_selected(cell + CellOffset::new(0, 1));
                }
                black_box(game.end_turn())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, legal_actions_benchmark, turn_cycle_benchmark);
criterion_main!(benches);
