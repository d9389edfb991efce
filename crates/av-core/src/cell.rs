//! Grid coordinates and cardinal headings.
//!
//! Rows grow downwards and columns grow to the right, so `North` is `(-1, 0)`.
//! Coordinates are signed: projecting a "front" cell off the edge of the grid
//! yields a `Cell` with a negative component, and bounds checking is left to
//! the grid that owns the dimensions.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A `(row, col)` grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance, the A* heuristic on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The cell one step away in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        let (dr, dc) = dir.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Offset by a raw `(dr, dc)` vector.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Cell {
        Cell::new(self.row + dr, self.col + dc)
    }

    /// The four orthogonal neighbours in North, South, West, East order.
    pub fn neighbors(self) -> [Cell; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Direction of a unit step from `self` to `next`, or `None` if the two
    /// cells are not orthogonally adjacent.
    pub fn direction_to(self, next: Cell) -> Option<Direction> {
        Direction::from_delta(next.row - self.row, next.col - self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell::new(row, col)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four cardinal headings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// `(-1, 0)`. Also the heading assumed before a vehicle has moved.
    #[default]
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Sampling order used by wandering agents.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// `(dr, dc)` unit vector.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West  => (0, -1),
            Direction::East  => (0, 1),
        }
    }

    pub fn from_delta(dr: i32, dc: i32) -> Option<Direction> {
        match (dr, dc) {
            (-1, 0) => Some(Direction::North),
            (1, 0)  => Some(Direction::South),
            (0, -1) => Some(Direction::West),
            (0, 1)  => Some(Direction::East),
            _       => None,
        }
    }

    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West  => Direction::East,
            Direction::East  => Direction::West,
        }
    }

    /// Rotate 90° towards `side`: `(dr, dc)` becomes `(-dc, dr)` for a left
    /// turn and `(dc, -dr)` for a right turn.
    pub fn turn(self, side: Side) -> Direction {
        let (dr, dc) = self.delta();
        let (r, c) = match side {
            Side::Left  => (-dc, dr),
            Side::Right => (dc, -dr),
        };
        // A rotated unit vector is always another unit vector.
        Direction::from_delta(r, c).unwrap_or(self)
    }

    /// Rendering angle in degrees (0 = facing up, counter-clockwise positive).
    pub fn angle_deg(self) -> i16 {
        match self {
            Direction::North => 0,
            Direction::West  => 90,
            Direction::South => 180,
            Direction::East  => -90,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::West  => "west",
            Direction::East  => "east",
        })
    }
}

// ── Side ──────────────────────────────────────────────────────────────────────

/// Lateral side relative to a heading.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left  => "left",
            Side::Right => "right",
        })
    }
}
