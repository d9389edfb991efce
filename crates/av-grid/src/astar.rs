//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! Vehicles and episodes call planning via the [`Pathfinder`] trait, so a
//! run can swap in another planner without touching the controller.  The
//! default [`AStar`] searches the 4-connected grid with unit edge costs and
//! the Manhattan heuristic.
//!
//! # What blocks a plan
//!
//! Only building terrain.  Pedestrians, debris and vehicles are transient and
//! are handled by the controller at run time, not by the planner.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use av_core::Cell;

use crate::Grid;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Planned route: every cell after the start, ending at the goal.
///
/// An empty path means "no route" **or** "already there"; callers that care
/// compare the start and goal themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, step: usize) -> Option<Cell> {
        self.cells.get(step).copied()
    }

    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl From<Vec<Cell>> for Path {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid planner.
///
/// Implementations must be `Send + Sync` so one planner can be shared by the
/// Rayon workers of an evaluation batch.
pub trait Pathfinder: Send + Sync {
    /// Plan from `start` to `goal` on the current grid.
    ///
    /// Never fails: an unreachable goal, an out-of-bounds endpoint, and
    /// `start == goal` all yield an empty [`Path`].
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Path;
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// A* over the occupancy grid.
///
/// Frontier entries are ordered by `(f, cell)`, so ties in `f` break towards
/// the smaller `(row, col)` and results are reproducible.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl Pathfinder for AStar {
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> Path {
        astar(grid, start, goal)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

#[inline]
fn slot(grid: &Grid, cell: Cell) -> usize {
    cell.row as usize * grid.cols() as usize + cell.col as usize
}

fn astar(grid: &Grid, start: Cell, goal: Cell) -> Path {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        tracing::warn!(%start, %goal, "path endpoint outside the grid");
        return Path::default();
    }
    if start == goal {
        return Path::default();
    }

    let n = grid.rows() as usize * grid.cols() as usize;
    // cost[v] = best known step count to reach v.
    let mut cost = vec![u32::MAX; n];
    // came_from[v] = predecessor on the best known route to v.
    let mut came_from: Vec<Option<Cell>> = vec![None; n];

    cost[slot(grid, start)] = 0;

    let mut heap: BinaryHeap<Reverse<(u32, Cell)>> = BinaryHeap::new();
    heap.push(Reverse((start.manhattan(goal), start)));

    while let Some(Reverse((f, current))) = heap.pop() {
        if current == goal {
            let path = reconstruct(grid, &came_from, start, goal);
            tracing::trace!(%start, %goal, len = path.len(), "path found");
            return path;
        }

        let g = cost[slot(grid, current)];
        // Skip stale heap entries.
        if f > g + current.manhattan(goal) {
            continue;
        }

        for next in current.neighbors() {
            if !grid.in_bounds(next) || grid.is_static_obstacle(next) {
                continue;
            }
            let new_cost = g + 1;
            let i = slot(grid, next);
            if new_cost < cost[i] {
                cost[i] = new_cost;
                came_from[i] = Some(current);
                heap.push(Reverse((new_cost + next.manhattan(goal), next)));
            }
        }
    }

    tracing::trace!(%start, %goal, "goal unreachable");
    Path::default()
}

fn reconstruct(grid: &Grid, came_from: &[Option<Cell>], start: Cell, goal: Cell) -> Path {
    let mut cells = Vec::new();
    let mut cur = goal;
    while cur != start {
        cells.push(cur);
        match came_from[slot(grid, cur)] {
            Some(prev) => cur = prev,
            None => break,
        }
    }
    cells.reverse();
    Path::new(cells)
}
