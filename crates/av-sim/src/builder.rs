//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use av_agent::AgentSetBuilder;
use av_behavior::{HazardOracle, Policy};
use av_core::{SimClock, SimConfig, SimRng, VehicleId};
use av_grid::{Occupant, Pathfinder, Scenario};
use av_mobility::Mover;
use av_vehicle::{Mode, VehicleBuilder};

use crate::{Sim, SimError, SimResult};

/// Default hard stop for an interactive run.
pub const DEFAULT_MAX_TICKS: u64 = 500;

/// Fluent builder for [`Sim<F, O>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, wait threshold, resample probability, tick length
/// - [`Scenario`]: start, targets, buildings, agent spawns
/// - `Arc<dyn Policy>`: the primary vehicle's fallback policy
/// - `O: HazardOracle`: the vision capability (e.g. [`av_behavior::GridOracle`])
/// - `F: Pathfinder`: the planner (e.g. [`av_grid::AStar`])
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default               |
/// |--------------------|-----------------------|
/// | `.companion(b)`    | `true`                |
/// | `.max_ticks(n)`    | [`DEFAULT_MAX_TICKS`] |
///
/// The primary vehicle (`VehicleId(0)`) runs in [`Mode::Hybrid`].  The
/// companion (`VehicleId(1)`) follows the same initial path in
/// [`Mode::PathOnly`] so the two can be compared.
///
/// # Example
///
/// ```rust,ignore
/// let scenario = Scenario::generate(&config, config.seed)?;
/// let mut sim = SimBuilder::new(config, scenario, policy, GridOracle, AStar)
///     .max_ticks(200)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: Pathfinder, O: HazardOracle> {
    config: SimConfig,
    scenario: Scenario,
    policy: Arc<dyn Policy>,
    oracle: O,
    pathfinder: F,
    companion: bool,
    max_ticks: u64,
    run_id: u32,
}

impl<F: Pathfinder, O: HazardOracle> SimBuilder<F, O> {
    /// Create a builder with all required inputs.
    pub fn new(
        config: SimConfig,
        scenario: Scenario,
        policy: Arc<dyn Policy>,
        oracle: O,
        pathfinder: F,
    ) -> Self {
        Self {
            config,
            scenario,
            policy,
            oracle,
            pathfinder,
            companion: true,
            max_ticks: DEFAULT_MAX_TICKS,
            run_id: 0,
        }
    }

    /// Whether to add the path-only companion vehicle.
    pub fn companion(mut self, enabled: bool) -> Self {
        self.companion = enabled;
        self
    }

    pub fn max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Identifier carried by this run's arrivals (default 0).
    pub fn run(mut self, id: u32) -> Self {
        self.run_id = id;
        self
    }

    /// Validate inputs, stamp the world, plan the first path, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<F, O>> {
        self.config.validate()?;
        let scenario = self.scenario;
        let Some(first) = scenario.first_target() else {
            return Err(SimError::Config("scenario has no target".into()));
        };
        let final_target = scenario.targets.last().copied().unwrap_or(first);

        let mut rng = SimRng::new(self.config.seed);
        let mut grid = scenario.build_grid()?;

        let pedestrians = AgentSetBuilder::new(Occupant::Pedestrian)
            .spawns(scenario.pedestrians.iter().copied())
            .build(&mut rng)?;
        let debris = AgentSetBuilder::new(Occupant::Debris)
            .spawns(scenario.debris.iter().copied())
            .build(&mut rng)?;
        grid.resync(Occupant::Pedestrian, &pedestrians.positions)?;
        grid.resync(Occupant::Debris, &debris.positions)?;

        let path = self.pathfinder.find_path(&grid, scenario.start, first);
        if path.is_empty() {
            tracing::warn!(start = %scenario.start, target = %first, "no initial path");
        }

        let base = |id: u16, mode: Mode| {
            VehicleBuilder::new(scenario.start)
                .id(VehicleId(id))
                .mode(mode)
                .target(first)
                .destinations(scenario.remaining_targets().iter().copied())
                .path(path.clone())
                .config(&self.config)
        };
        let mut vehicles = vec![base(0, Mode::Hybrid).policy(Arc::clone(&self.policy)).build()?];
        if self.companion {
            vehicles.push(base(1, Mode::PathOnly).build()?);
        }
        grid.resync(Occupant::Vehicle, &[scenario.start])?;

        let mover = Mover::new(self.config.resample_probability)?;
        let clock = SimClock::new(self.config.tick_millis);
        let arrivals = vec![None; vehicles.len()];

        tracing::debug!(
            vehicles = vehicles.len(),
            pedestrians = pedestrians.len(),
            debris = debris.len(),
            %final_target,
            "sim built"
        );

        Ok(Sim {
            config: self.config,
            clock,
            max_ticks: self.max_ticks,
            run_id: self.run_id,
            grid,
            pedestrians,
            debris,
            vehicles,
            arrivals,
            final_target,
            mover,
            rng,
            pathfinder: self.pathfinder,
            oracle: self.oracle,
        })
    }
}
