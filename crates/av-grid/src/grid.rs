//! Two-layer occupancy grid.
//!
//! Every cell carries a static **terrain** tag (empty road, building, start,
//! goal) and at most one dynamic **occupant** (pedestrian, debris, vehicle).
//! Movers never write terrain, and an occupant can never sit on a building.
//!
//! Storage is row-major SoA: `terrain[i]` and `occupant[i]` describe the
//! cell at `i = row * cols + col`.

use av_core::Cell;

use crate::{GridError, GridResult};

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Static layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Empty,
    Building,
    Start,
    Goal,
}

/// Dynamic layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Pedestrian,
    Debris,
    Vehicle,
}

impl Occupant {
    /// Pedestrians and debris block the vehicle; planning ignores them.
    #[inline]
    pub fn is_hazard(self) -> bool {
        matches!(self, Occupant::Pedestrian | Occupant::Debris)
    }
}

/// What a cell reads as: its occupant if it has one, otherwise its terrain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Empty,
    Building,
    Start,
    Goal,
    Pedestrian,
    Debris,
    Vehicle,
}

impl CellKind {
    #[inline]
    pub fn is_static_obstacle(self) -> bool {
        self == CellKind::Building
    }

    #[inline]
    pub fn is_hazard(self) -> bool {
        matches!(self, CellKind::Pedestrian | CellKind::Debris)
    }

    pub fn as_occupant(self) -> Option<Occupant> {
        match self {
            CellKind::Pedestrian => Some(Occupant::Pedestrian),
            CellKind::Debris     => Some(Occupant::Debris),
            CellKind::Vehicle    => Some(Occupant::Vehicle),
            _                    => None,
        }
    }

    pub fn as_terrain(self) -> Option<Terrain> {
        match self {
            CellKind::Empty    => Some(Terrain::Empty),
            CellKind::Building => Some(Terrain::Building),
            CellKind::Start    => Some(Terrain::Start),
            CellKind::Goal     => Some(Terrain::Goal),
            _                  => None,
        }
    }
}

impl From<Terrain> for CellKind {
    fn from(t: Terrain) -> Self {
        match t {
            Terrain::Empty    => CellKind::Empty,
            Terrain::Building => CellKind::Building,
            Terrain::Start    => CellKind::Start,
            Terrain::Goal     => CellKind::Goal,
        }
    }
}

impl From<Occupant> for CellKind {
    fn from(o: Occupant) -> Self {
        match o {
            Occupant::Pedestrian => CellKind::Pedestrian,
            Occupant::Debris     => CellKind::Debris,
            Occupant::Vehicle    => CellKind::Vehicle,
        }
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Fixed-size rectangular occupancy map.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: u16,
    cols: u16,
    terrain: Vec<Terrain>,
    occupant: Vec<Option<Occupant>>,
}

impl Grid {
    /// All-empty grid of `rows × cols` cells.
    pub fn new(rows: u16, cols: u16) -> Self {
        let n = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            terrain: vec![Terrain::Empty; n],
            occupant: vec![None; n],
        }
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && cell.row < self.rows as i32
            && cell.col < self.cols as i32
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.cols as usize + cell.col as usize)
    }

    fn checked_index(&self, cell: Cell) -> GridResult<usize> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Iterate all in-bounds cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |r| (0..cols).map(move |c| Cell::new(r, c)))
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Effective tag of `cell`; `None` when out of bounds.
    pub fn cell_at(&self, cell: Cell) -> Option<CellKind> {
        let i = self.index(cell)?;
        Some(match self.occupant[i] {
            Some(o) => o.into(),
            None    => self.terrain[i].into(),
        })
    }

    pub fn terrain_at(&self, cell: Cell) -> Option<Terrain> {
        self.index(cell).map(|i| self.terrain[i])
    }

    pub fn occupant_at(&self, cell: Cell) -> Option<Occupant> {
        self.index(cell).and_then(|i| self.occupant[i])
    }

    /// `true` for in-bounds building cells.
    #[inline]
    pub fn is_static_obstacle(&self, cell: Cell) -> bool {
        self.terrain_at(cell) == Some(Terrain::Building)
    }

    /// `true` if a pedestrian or debris item stands on `cell`.
    #[inline]
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.occupant_at(cell).is_some_and(Occupant::is_hazard)
    }

    /// `true` if a vehicle may enter `cell`: in bounds, no building, no hazard.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_static_obstacle(cell) && !self.is_hazard(cell)
    }

    /// `true` if a wandering agent may enter `cell`: it must read as `Empty`.
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.cell_at(cell) == Some(CellKind::Empty)
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Overwrite the tag of `cell`.
    ///
    /// Terrain kinds replace the terrain and clear any occupant.  Occupant
    /// kinds set the occupant, except on a building.
    pub fn set_cell_type(&mut self, cell: Cell, kind: CellKind) -> GridResult<()> {
        let i = self.checked_index(cell)?;
        match (kind.as_terrain(), kind.as_occupant()) {
            (Some(t), _) => {
                self.terrain[i] = t;
                self.occupant[i] = None;
                Ok(())
            }
            (None, Some(o)) => self.place(cell, o),
            (None, None) => Ok(()),
        }
    }

    /// Stamp `occupant` onto `cell`, replacing any previous occupant.
    pub fn place(&mut self, cell: Cell, occupant: Occupant) -> GridResult<()> {
        let i = self.checked_index(cell)?;
        if self.terrain[i] == Terrain::Building {
            return Err(GridError::StaticObstacle { cell, occupant });
        }
        self.occupant[i] = Some(occupant);
        Ok(())
    }

    /// Clear `cell` if, and only if, it currently holds `occupant`.
    ///
    /// Returns whether anything was cleared.  Out-of-bounds cells are a no-op.
    pub fn vacate(&mut self, cell: Cell, occupant: Occupant) -> bool {
        match self.index(cell) {
            Some(i) if self.occupant[i] == Some(occupant) => {
                self.occupant[i] = None;
                true
            }
            _ => false,
        }
    }

    /// Remove every `occupant` tag, then stamp it at each of `positions`.
    ///
    /// This is how drivers re-synchronise the grid with agent lists after a
    /// tick.  Later species overwrite earlier ones on a shared cell, which
    /// [`check_occupancy`](Self::check_occupancy) then reports.
    pub fn resync(&mut self, occupant: Occupant, positions: &[Cell]) -> GridResult<()> {
        for slot in self.occupant.iter_mut() {
            if *slot == Some(occupant) {
                *slot = None;
            }
        }
        for &p in positions {
            self.place(p, occupant)?;
        }
        Ok(())
    }

    /// Assert that `positions` are pairwise distinct, in bounds, off
    /// buildings, and tagged `occupant` on the grid.
    pub fn check_occupancy(&self, occupant: Occupant, positions: &[Cell]) -> GridResult<()> {
        for (k, &p) in positions.iter().enumerate() {
            let i = self.checked_index(p)?;
            if self.terrain[i] == Terrain::Building {
                return Err(GridError::StaticObstacle { cell: p, occupant });
            }
            if positions[..k].contains(&p) {
                return Err(GridError::Occupancy { cell: p, reason: "two agents share a cell" });
            }
            if self.occupant[i] != Some(occupant) {
                return Err(GridError::Occupancy { cell: p, reason: "grid tag out of sync" });
            }
        }
        Ok(())
    }

    /// Count cells whose effective tag is `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells().filter(|&c| self.cell_at(c) == Some(kind)).count()
    }
}
