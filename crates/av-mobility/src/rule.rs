//! Heading rules for wandering species.

use av_core::{Direction, RandomSource};
use av_grid::Occupant;

/// How a species picks its heading each tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WanderRule {
    /// Keep heading, or resample uniformly.
    Pedestrian,
    /// Like `Pedestrian`, but a resample that exactly reverses the current
    /// heading is discarded and the old heading kept.
    Debris,
}

impl WanderRule {
    pub fn for_species(species: Occupant) -> Option<WanderRule> {
        match species {
            Occupant::Pedestrian => Some(WanderRule::Pedestrian),
            Occupant::Debris     => Some(WanderRule::Debris),
            Occupant::Vehicle    => None,
        }
    }

    /// Heading for this tick.
    ///
    /// Draw order is fixed: one `chance(p)`, then one `below(4)` only if the
    /// chance fired.
    pub fn next_heading(
        self,
        current: Direction,
        resample_probability: f64,
        rng: &mut impl RandomSource,
    ) -> Direction {
        if !rng.chance(resample_probability) {
            return current;
        }
        let sampled = Direction::ALL[rng.below(Direction::ALL.len())];
        match self {
            WanderRule::Debris if sampled == current.reverse() => current,
            _ => sampled,
        }
    }
}
