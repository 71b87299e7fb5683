//! ASCII board renderer.
//!
//! Draws one character per cell over the bounding box of every unit and
//! base, top row first:
//!
//! | char | meaning                 |
//! |------|-------------------------|
//! | `R`  | live Red unit           |
//! | `B`  | live Blue unit          |
//! | `x`  | dead unit, not yet gone |
//! | `r`  | Red base                |
//! | `b`  | Blue base               |
//! | `o`  | neutral base            |
//! | `.`  | empty                   |
//!
//! A unit standing on a base hides it. Boards wider or taller than
//! [`MAX_RENDER_EXTENT`] are clipped, keeping the left columns and the top
//! rows.

use dsr_core::components::{Base, Unit};
use dsr_core::grid::Cell;
use dsr_core::player::Player;
use dsr_core::state::GameState;

/// Most columns or rows drawn for one board.
pub const MAX_RENDER_EXTENT: i32 = 256;

/// ASCII rendering configuration.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Empty cells added around the bounding box.
    pub margin: i32,
    /// Prefix each row with its y coordinate.
    pub show_coordinates: bool,
    /// Append a per-player tally after the board.
    pub show_legend: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            margin: 0,
            show_coordinates: false,
            show_legend: false,
        }
    }
}

/// Character for a unit.
fn unit_char(unit: &Unit) -> char {
    if !unit.is_alive() {
        return 'x';
    }
    unit.owner.symbol()
}

/// Character for a base.
fn base_char(base: &Base) -> char {
    match base.owner {
        Some(Player::Red) => 'r',
        Some(Player::Blue) => 'b',
        None => 'o',
    }
}

/// Inclusive bounding box of every entity, `(min, max)`.
fn bounds(state: &GameState) -> Option<(Cell, Cell)> {
    let cells = state
        .units()
        .map(|u| u.cell)
        .chain(state.bases().map(|b| b.cell));
    cells.fold(None, |acc, cell| match acc {
        None => Some((cell, cell)),
        Some((min, max)) => Some((
            Cell::new(min.x.min(cell.x), min.y.min(cell.y)),
            Cell::new(max.x.max(cell.x), max.y.max(cell.y)),
        )),
    })
}

/// Render the board rows, top row first. An empty board renders no rows.
pub fn render_board(state: &GameState, config: &AsciiConfig) -> Vec<String> {
    let Some((min, max)) = bounds(state) else {
        return Vec::new();
    };
    let margin = config.margin.clamp(0, MAX_RENDER_EXTENT);
    let min_x = min.x.saturating_sub(margin);
    let max_x = max
        .x
        .saturating_add(margin)
        .min(min_x.saturating_add(MAX_RENDER_EXTENT - 1));
    let max_y = max.y.saturating_add(margin);
    let min_y = min
        .y
        .saturating_sub(margin)
        .max(max_y.saturating_sub(MAX_RENDER_EXTENT - 1));

    let label_width = if config.show_coordinates {
        min_y.to_string().len().max(max_y.to_string().len())
    } else {
        0
    };

    (min_y..=max_y)
        .rev()
        .map(|y| {
            let row: String = (min_x..=max_x)
                .map(|x| {
                    let cell = Cell::new(x, y);
                    state
                        .first_unit_at(cell)
                        .map(unit_char)
                        .or_else(|| state.base_at(cell).map(base_char))
                        .unwrap_or('.')
                })
                .collect();
            if config.show_coordinates {
                format!("{y:>label_width$} {row}")
            } else {
                row
            }
        })
        .collect()
}

/// Render the board and optional legend as one string.
pub fn render_ascii(state: &GameState, config: &AsciiConfig) -> String {
    let mut output = render_board(state, config).join("\n");
    if config.show_legend {
        output.push_str(&format!(
            "\nturn {} - {} to move",
            state.turn(),
            state.active_player()
        ));
        for player in Player::ALL {
            let summary = state.summary(player);
            output.push_str(&format!(
                "\n{player}: {} units, {} bases",
                summary.live_units, summary.bases_owned
            ));
        }
    }
    output
}
