//! Fluent construction of a [`Vehicle`].
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use av_behavior::{Action, QTable};
//! use av_core::Cell;
//! use av_grid::{AStar, Grid, Pathfinder};
//! use av_vehicle::VehicleBuilder;
//!
//! let grid = Grid::new(10, 10);
//! let start = Cell::new(0, 0);
//! let target = Cell::new(0, 9);
//!
//! let car = VehicleBuilder::new(start)
//!     .target(target)
//!     .path(AStar.find_path(&grid, start, target))
//!     .policy(Arc::new(QTable::uniform(Action::Forward)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(car.next_step(), Some(Cell::new(0, 1)));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use av_behavior::Policy;
use av_core::{Cell, SimConfig, VehicleId};
use av_grid::Path;

use crate::{ControlState, DiagnosticLog, Mode, Vehicle, VehicleError, VehicleResult};

pub struct VehicleBuilder {
    id: VehicleId,
    mode: Mode,
    start: Cell,
    target: Option<Cell>,
    destinations: VecDeque<Cell>,
    path: Path,
    policy: Option<Arc<dyn Policy>>,
    wait_threshold: u32,
    diagnostic_capacity: usize,
}

impl VehicleBuilder {
    pub fn new(start: Cell) -> Self {
        Self {
            id: VehicleId(0),
            mode: Mode::Hybrid,
            start,
            target: None,
            destinations: VecDeque::new(),
            path: Path::default(),
            policy: None,
            wait_threshold: 3,
            diagnostic_capacity: 25,
        }
    }

    pub fn id(mut self, id: VehicleId) -> Self {
        self.id = id;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Initial target.  Defaults to the first queued destination, or the
    /// start cell when there is none.
    pub fn target(mut self, cell: Cell) -> Self {
        self.target = Some(cell);
        self
    }

    /// Destinations visited after the initial target, in order.
    pub fn destinations(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.destinations.extend(cells);
        self
    }

    /// Initial path, normally planned from the start to the initial target.
    pub fn path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    pub fn policy(mut self, policy: Arc<dyn Policy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn wait_threshold(mut self, ticks: u32) -> Self {
        self.wait_threshold = ticks;
        self
    }

    pub fn diagnostic_capacity(mut self, entries: usize) -> Self {
        self.diagnostic_capacity = entries;
        self
    }

    /// Take the wait threshold and log size from a run config.
    pub fn config(self, config: &SimConfig) -> Self {
        self.wait_threshold(config.wait_threshold)
            .diagnostic_capacity(config.diagnostic_capacity)
    }

    pub fn build(self) -> VehicleResult<Vehicle> {
        if self.wait_threshold == 0 {
            return Err(VehicleError::ZeroThreshold);
        }
        if self.mode == Mode::Hybrid && self.policy.is_none() {
            return Err(VehicleError::MissingPolicy(self.id));
        }
        let current_target = self
            .target
            .or_else(|| self.destinations.front().copied())
            .unwrap_or(self.start);

        Ok(Vehicle {
            id: self.id,
            mode: self.mode,
            pos: self.start,
            path: self.path,
            cursor: 0,
            destinations: self.destinations,
            current_target,
            last_heading: None,
            state: ControlState::FollowingPath,
            wait_threshold: self.wait_threshold,
            diagnostics: DiagnosticLog::new(self.diagnostic_capacity),
            policy: self.policy,
        })
    }
}
