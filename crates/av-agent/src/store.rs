//! `AgentSet`: SoA storage for one species of wandering agent.
//!
//! Every `Vec` field has exactly `len()` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let pos = set.positions[agent.index()];
//! ```
//!
//! Agents are processed in ascending `AgentId` order everywhere, which makes
//! contested-cell resolution reproducible for a fixed seed.

use av_core::{AgentId, Cell, Direction, RandomSource};
use av_grid::Occupant;

use crate::{AgentError, AgentResult};

/// Positions, headings and spawn points of one species.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSet {
    species: Occupant,
    /// Current cell of each agent.
    pub positions: Vec<Cell>,
    /// Heading kept between ticks (inertia).
    pub directions: Vec<Direction>,
    /// Where each agent stood when the set was built; restored by `reset`.
    spawns: Vec<Cell>,
}

impl AgentSet {
    /// Empty set for `species`.  Only pedestrians and debris wander.
    pub fn new(species: Occupant) -> AgentResult<Self> {
        if !species.is_hazard() {
            return Err(AgentError::NotWandering(species));
        }
        Ok(Self {
            species,
            positions: Vec::new(),
            directions: Vec::new(),
            spawns: Vec::new(),
        })
    }

    #[inline]
    pub fn species(&self) -> Occupant {
        self.species
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Cell> {
        self.positions.get(agent.index()).copied()
    }

    #[inline]
    pub fn direction(&self, agent: AgentId) -> Option<Direction> {
        self.directions.get(agent.index()).copied()
    }

    pub fn spawns(&self) -> &[Cell] {
        &self.spawns
    }

    /// `true` if any agent of this set stands on `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.positions.contains(&cell)
    }

    /// Add an agent at `cell` with a random initial heading.
    ///
    /// A second agent on an occupied cell is refused.
    pub fn spawn(&mut self, cell: Cell, rng: &mut impl RandomSource) -> AgentResult<AgentId> {
        if self.occupies(cell) {
            return Err(AgentError::DuplicateSpawn { species: self.species, cell });
        }
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(cell);
        self.directions.push(Direction::ALL[rng.below(Direction::ALL.len())]);
        self.spawns.push(cell);
        Ok(id)
    }

    /// Return every agent to its spawn cell with a freshly drawn heading.
    pub fn reset(&mut self, rng: &mut impl RandomSource) {
        self.positions.clone_from(&self.spawns);
        self.directions = self
            .spawns
            .iter()
            .map(|_| Direction::ALL[rng.below(Direction::ALL.len())])
            .collect();
    }

    /// Drop every agent, spawns included.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.directions.clear();
        self.spawns.clear();
    }
}
