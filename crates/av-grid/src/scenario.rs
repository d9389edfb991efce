//! Scenario bootstrap: building placement, start/target selection, and
//! initial agent spawns.
//!
//! A `Scenario` is plain data.  Episodes keep it so that `reset()` can rebuild
//! the exact same world, and [`Scenario::generate`] is a pure function of the
//! config and seed, so two calls with the same inputs agree cell for cell.

use av_core::{Cell, SimConfig, SimRng};

use crate::{CellKind, Grid, GridError, GridResult};

/// Everything needed to rebuild a world from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub rows: u16,
    pub cols: u16,
    pub buildings: Vec<Cell>,
    pub start: Cell,
    /// Visited in order; the first one is the initial target.
    pub targets: Vec<Cell>,
    pub pedestrians: Vec<Cell>,
    pub debris: Vec<Cell>,
}

impl Scenario {
    /// Draw a random scenario.
    ///
    /// Placement order is buildings, start, targets, pedestrians, debris.
    /// Every placement takes a distinct cell that nothing earlier claimed.
    pub fn generate(config: &SimConfig, seed: u64) -> GridResult<Scenario> {
        config.validate()?;
        let mut rng = SimRng::new(seed);

        let mut free: Vec<Cell> = Grid::new(config.rows, config.cols).cells().collect();
        let mut draw = |rng: &mut SimRng| -> GridResult<Cell> {
            if free.is_empty() {
                return Err(GridError::Scenario("ran out of free cells".into()));
            }
            let i = rng.gen_range(0..free.len());
            Ok(free.swap_remove(i))
        };

        let buildings = (0..config.building_count)
            .map(|_| draw(&mut rng))
            .collect::<GridResult<Vec<_>>>()?;
        let start = draw(&mut rng)?;

        let n_targets = rng.gen_range(config.target_count.clone());
        let targets = (0..n_targets)
            .map(|_| draw(&mut rng))
            .collect::<GridResult<Vec<_>>>()?;

        let n_peds = rng.gen_range(config.pedestrian_count.clone());
        let pedestrians = (0..n_peds)
            .map(|_| draw(&mut rng))
            .collect::<GridResult<Vec<_>>>()?;

        let debris = (0..config.debris_count)
            .map(|_| draw(&mut rng))
            .collect::<GridResult<Vec<_>>>()?;

        tracing::debug!(
            seed,
            buildings = buildings.len(),
            targets = targets.len(),
            pedestrians = pedestrians.len(),
            debris = debris.len(),
            "scenario generated"
        );

        Ok(Scenario {
            rows: config.rows,
            cols: config.cols,
            buildings,
            start,
            targets,
            pedestrians,
            debris,
        })
    }

    /// Fresh grid carrying this scenario's terrain (buildings, start, goals).
    ///
    /// Agents are not stamped; drivers do that through `Grid::resync` once
    /// their agent lists exist.
    pub fn build_grid(&self) -> GridResult<Grid> {
        let mut grid = Grid::new(self.rows, self.cols);
        for &b in &self.buildings {
            grid.set_cell_type(b, CellKind::Building)?;
        }
        grid.set_cell_type(self.start, CellKind::Start)?;
        for &t in &self.targets {
            grid.set_cell_type(t, CellKind::Goal)?;
        }
        Ok(grid)
    }

    /// The target the vehicle heads for first.
    pub fn first_target(&self) -> Option<Cell> {
        self.targets.first().copied()
    }

    /// Targets queued after the first one.
    pub fn remaining_targets(&self) -> &[Cell] {
        self.targets.get(1..).unwrap_or(&[])
    }
}

// ── ScenarioBuilder ───────────────────────────────────────────────────────────

/// Hand-authored scenarios for tests and demos.
///
/// # Example
///
/// ```
/// use av_core::Cell;
/// use av_grid::ScenarioBuilder;
///
/// let scenario = ScenarioBuilder::new(10, 10)
///     .start(Cell::new(0, 0))
///     .target(Cell::new(0, 9))
///     .building(Cell::new(5, 5))
///     .pedestrian(Cell::new(9, 9))
///     .build()
///     .unwrap();
/// let grid = scenario.build_grid().unwrap();
/// assert!(grid.is_static_obstacle(Cell::new(5, 5)));
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    rows: u16,
    cols: u16,
    buildings: Vec<Cell>,
    start: Option<Cell>,
    targets: Vec<Cell>,
    pedestrians: Vec<Cell>,
    debris: Vec<Cell>,
}

impl ScenarioBuilder {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            buildings: Vec::new(),
            start: None,
            targets: Vec::new(),
            pedestrians: Vec::new(),
            debris: Vec::new(),
        }
    }

    pub fn start(mut self, cell: Cell) -> Self {
        self.start = Some(cell);
        self
    }

    pub fn target(mut self, cell: Cell) -> Self {
        self.targets.push(cell);
        self
    }

    pub fn building(mut self, cell: Cell) -> Self {
        self.buildings.push(cell);
        self
    }

    pub fn buildings(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.buildings.extend(cells);
        self
    }

    pub fn pedestrian(mut self, cell: Cell) -> Self {
        self.pedestrians.push(cell);
        self
    }

    pub fn debris(mut self, cell: Cell) -> Self {
        self.debris.push(cell);
        self
    }

    /// Validate and finish.
    ///
    /// Requires a start and at least one target; every listed cell must be
    /// in bounds and no two placements may share a cell.
    pub fn build(self) -> GridResult<Scenario> {
        let start = self
            .start
            .ok_or_else(|| GridError::Scenario("no start cell".into()))?;
        if self.targets.is_empty() {
            return Err(GridError::Scenario("no target cell".into()));
        }

        let probe = Grid::new(self.rows, self.cols);
        let mut seen: Vec<Cell> = Vec::new();
        let all = self
            .buildings
            .iter()
            .chain(std::iter::once(&start))
            .chain(&self.targets)
            .chain(&self.pedestrians)
            .chain(&self.debris);
        for &cell in all {
            if !probe.in_bounds(cell) {
                return Err(GridError::OutOfBounds { cell, rows: self.rows, cols: self.cols });
            }
            if seen.contains(&cell) {
                return Err(GridError::Scenario(format!("cell {cell} listed twice")));
            }
            seen.push(cell);
        }

        Ok(Scenario {
            rows: self.rows,
            cols: self.cols,
            buildings: self.buildings,
            start,
            targets: self.targets,
            pedestrians: self.pedestrians,
            debris: self.debris,
        })
    }
}
