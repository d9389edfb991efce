//! Fluent builder for `AgentSet`.
//!
//! # Usage
//!
//! ```rust
//! use av_agent::AgentSetBuilder;
//! use av_core::{Cell, SimRng};
//! use av_grid::Occupant;
//!
//! let mut rng = SimRng::new(42);
//! let peds = AgentSetBuilder::new(Occupant::Pedestrian)
//!     .spawn(Cell::new(2, 3))
//!     .spawn(Cell::new(7, 1))
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(peds.len(), 2);
//! assert_eq!(peds.spawns(), &[Cell::new(2, 3), Cell::new(7, 1)]);
//! ```

use av_core::{Cell, RandomSource};
use av_grid::Occupant;

use crate::{AgentResult, AgentSet};

/// Collects spawn cells, then draws headings in one pass at `build`.
pub struct AgentSetBuilder {
    species: Occupant,
    spawns: Vec<Cell>,
}

impl AgentSetBuilder {
    pub fn new(species: Occupant) -> Self {
        Self { species, spawns: Vec::new() }
    }

    pub fn spawn(mut self, cell: Cell) -> Self {
        self.spawns.push(cell);
        self
    }

    pub fn spawns(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.spawns.extend(cells);
        self
    }

    /// Headings are drawn in spawn order, one `below(4)` per agent.
    pub fn build(self, rng: &mut impl RandomSource) -> AgentResult<AgentSet> {
        let mut set = AgentSet::new(self.species)?;
        for cell in self.spawns {
            set.spawn(cell, rng)?;
        }
        Ok(set)
    }
}
