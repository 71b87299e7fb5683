//! Grid addressing.
//!
//! The board is an unbounded square grid addressed by integer cells.
//! Presentation layers work in world units; one cell spans
//! [`CELL_SIZE`] world units on each axis and cell `(0, 0)` is centred
//! on the world origin. The y axis points up.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// World units per cell along each axis.
pub const CELL_SIZE: i32 = 64;

/// A position in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPos {
    /// Horizontal world coordinate.
    pub x: i32,
    /// Vertical world coordinate (up is positive).
    pub y: i32,
}

impl WorldPos {
    /// Create a new world position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another world position.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// A single grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row (up is positive).
    pub y: i32,
}

impl Cell {
    /// The origin cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Snap a world position to the nearest cell.
    ///
    /// A position exactly halfway between two cells belongs to the cell
    /// in the positive direction.
    #[must_use]
    pub const fn from_world(pos: WorldPos) -> Self {
        Self {
            x: snap_axis(pos.x),
            y: snap_axis(pos.y),
        }
    }

    /// World position of this cell's centre.
    ///
    /// Saturates for cells whose centre lies outside the `i32` world.
    #[must_use]
    pub const fn to_world(self) -> WorldPos {
        WorldPos {
            x: self.x.saturating_mul(CELL_SIZE),
            y: self.y.saturating_mul(CELL_SIZE),
        }
    }

    /// Manhattan distance (`|dx| + |dy|`) to another cell, saturating at `u32::MAX`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Offset from this cell to `other`, saturating on each axis.
    #[must_use]
    pub const fn offset_to(self, other: Self) -> CellOffset {
        CellOffset {
            dx: other.x.saturating_sub(self.x),
            dy: other.y.saturating_sub(self.y),
        }
    }

    /// The cell `(dx, dy)` away, or `None` if it lies outside the `i32` grid.
    #[must_use]
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Iterate every cell within `radius` (Manhattan) of this one.
    ///
    /// The square window `[-radius, radius]²` is scanned row by row from
    /// the bottom, and cells outside the diamond are skipped. The cell
    /// itself is included. Cells that would fall outside the `i32` grid
    /// are skipped.
    pub fn diamond(self, radius: u32) -> impl Iterator<Item = Cell> {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        (-r..=r).flat_map(move |dy| {
            (-r..=r).filter_map(move |dx| {
                if dx.unsigned_abs().saturating_add(dy.unsigned_abs()) <= radius {
                    self.checked_offset(dx, dy)
                } else {
                    None
                }
            })
        })
    }
}

/// Round one world coordinate to the nearest cell index, halves upwards.
const fn snap_axis(world: i32) -> i32 {
    let cell = world.div_euclid(CELL_SIZE);
    if world.rem_euclid(CELL_SIZE) >= CELL_SIZE / 2 {
        cell + 1
    } else {
        cell
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of cells within Manhattan distance `radius` of a cell, itself included.
#[must_use]
pub const fn diamond_size(radius: u32) -> u32 {
    2 * radius * (radius + 1) + 1
}

/// A displacement between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellOffset {
    /// Horizontal displacement in cells.
    pub dx: i32,
    /// Vertical displacement in cells.
    pub dy: i32,
}

impl CellOffset {
    /// Create a new offset.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Check if this offset moves nowhere.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The cardinal direction this offset mostly points in.
    ///
    /// Horizontal wins ties. Returns `None` for the zero offset.
    #[must_use]
    pub const fn dominant_direction(self) -> Option<Direction> {
        if self.is_zero() {
            return None;
        }
        if self.dx.unsigned_abs() >= self.dy.unsigned_abs() {
            if self.dx > 0 {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if self.dy > 0 {
            Some(Direction::North)
        } else {
            Some(Direction::South)
        }
    }
}

impl Add<CellOffset> for Cell {
    type Output = Cell;

    fn add(self, rhs: CellOffset) -> Cell {
        Cell::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

impl Sub for Cell {
    type Output = CellOffset;

    fn sub(self, rhs: Cell) -> CellOffset {
        rhs.offset_to(self)
    }
}

/// Cardinal directions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards positive y.
    North,
    /// Towards negative y.
    South,
    /// Towards positive x.
    East,
    /// Towards negative x.
    West,
}
