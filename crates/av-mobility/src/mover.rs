//! One-tick movement of a whole species.

use av_agent::AgentSet;
use av_core::{Cell, RandomSource};
use av_grid::Grid;

use crate::{MobilityError, MobilityResult, WanderRule};

#[cfg(feature = "fx-hash")]
type ClaimSet = rustc_hash::FxHashSet<Cell>;
#[cfg(not(feature = "fx-hash"))]
type ClaimSet = std::collections::HashSet<Cell>;

/// Outcome counts for one call to [`Mover::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveReport {
    pub moved: usize,
    pub stayed: usize,
}

/// Applies the wandering rule to an `AgentSet` one tick at a time.
#[derive(Copy, Clone, Debug)]
pub struct Mover {
    resample_probability: f64,
}

impl Mover {
    pub fn new(resample_probability: f64) -> MobilityResult<Self> {
        if !(0.0..=1.0).contains(&resample_probability) {
            return Err(MobilityError::BadProbability(resample_probability));
        }
        Ok(Self { resample_probability })
    }

    #[inline]
    pub fn resample_probability(&self) -> f64 {
        self.resample_probability
    }

    /// Advance every agent in `set` by at most one cell.
    ///
    /// `vehicles` are the cells no agent may enter this tick.  Every starting
    /// position stays claimed for the whole tick, so an agent cannot step
    /// into a cell another agent left earlier in the same pass.  The grid is
    /// left with this species stamped at its new positions.
    pub fn step(
        &self,
        set: &mut AgentSet,
        grid: &mut Grid,
        vehicles: &[Cell],
        rng: &mut impl RandomSource,
    ) -> MobilityResult<MoveReport> {
        let species = set.species();
        let Some(rule) = WanderRule::for_species(species) else {
            return Ok(MoveReport::default());
        };

        let mut claimed: ClaimSet = set.positions.iter().copied().collect();
        claimed.extend(vehicles.iter().copied());

        let mut report = MoveReport::default();
        for i in 0..set.len() {
            let origin = set.positions[i];
            grid.vacate(origin, species);

            let heading = rule.next_heading(set.directions[i], self.resample_probability, rng);
            set.directions[i] = heading;

            let dest = origin.step(heading);
            if grid.is_vacant(dest) && !claimed.contains(&dest) {
                set.positions[i] = dest;
                claimed.insert(dest);
                report.moved += 1;
            } else {
                report.stayed += 1;
            }
        }

        for &p in &set.positions {
            grid.place(p, species)?;
        }

        tracing::trace!(
            species = ?species,
            moved = report.moved,
            stayed = report.stayed,
            "agents moved"
        );
        Ok(report)
    }
}

impl Default for Mover {
    fn default() -> Self {
        Self { resample_probability: 0.2 }
    }
}
