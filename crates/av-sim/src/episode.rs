//! The `Episode`: one reinforcement-style run of a single vehicle.
//!
//! An episode owns its scenario, grid, agent sets, vehicle and RNG.  Each
//! [`Episode::step`] moves the wandering agents, applies one vehicle action,
//! and scores the result against a [`RewardConfig`].

use av_agent::{AgentSet, AgentSetBuilder};
use av_behavior::{Action, GridOracle, Observation, Policy};
use av_core::{Cell, RandomSource, RewardConfig, SimConfig, SimRng, VehicleId};
use av_grid::{Grid, Occupant, Pathfinder, Scenario};
use av_mobility::Mover;
use av_vehicle::{ActionOutcome, Advance, Mode, Vehicle, VehicleBuilder};

use crate::{SimError, SimResult};

// ── Step results ──────────────────────────────────────────────────────────────

/// Bookkeeping for one step.  Termination flags are independent; more than
/// one can be set on the same step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepInfo {
    /// 1-based index of this step.
    pub step: u32,
    /// Action passed in by the caller.
    pub requested: Action,
    /// Action actually applied (differs when a stalled wait was replaced).
    pub action: Action,
    pub outcome: ActionOutcome,
    /// Target cell the vehicle stands on after the step, if any.
    pub reached_target: Option<Cell>,
    pub collision: bool,
    pub timed_out: bool,
}

impl StepInfo {
    #[inline]
    pub fn substituted(&self) -> bool {
        self.requested != self.action
    }
}

/// What [`Episode::step`] returns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

// ── Episode ───────────────────────────────────────────────────────────────────

/// One episode over a fixed scenario.
///
/// The grid size and placements come from the scenario; `config` supplies the
/// step ceiling, wait threshold, resample probability and log capacity.
///
/// The vehicle does not choose its own actions here: callers pass them to
/// [`step`](Episode::step), or let a policy pick greedily from the current
/// observation with [`step_with`](Episode::step_with).
pub struct Episode<F: Pathfinder> {
    scenario: Scenario,
    config: SimConfig,
    rewards: RewardConfig,
    pathfinder: F,
    mover: Mover,
    rng: SimRng,

    grid: Grid,
    pedestrians: AgentSet,
    debris: AgentSet,
    vehicle: Vehicle,

    steps: u32,
    wait_counter: u32,
    total_reward: f64,
    done: bool,
}

impl<F: Pathfinder> Episode<F> {
    /// Build an episode and put it in its initial state.
    ///
    /// `seed` drives spawn headings, agent wandering and stalled-wait
    /// substitution.  Two episodes built from equal inputs step identically.
    pub fn new(
        scenario: Scenario,
        config: SimConfig,
        rewards: RewardConfig,
        pathfinder: F,
        seed: u64,
    ) -> SimResult<Self> {
        config.validate()?;
        if scenario.targets.is_empty() {
            return Err(SimError::Config("scenario has no target".into()));
        }
        let mover = Mover::new(config.resample_probability)?;
        let mut rng = SimRng::new(seed);

        let pedestrians = AgentSetBuilder::new(Occupant::Pedestrian)
            .spawns(scenario.pedestrians.iter().copied())
            .build(&mut rng)?;
        let debris = AgentSetBuilder::new(Occupant::Debris)
            .spawns(scenario.debris.iter().copied())
            .build(&mut rng)?;

        let grid = scenario.build_grid()?;
        let vehicle = Self::spawn_vehicle(&scenario, &config, &grid, &pathfinder)?;

        let mut episode = Self {
            scenario,
            config,
            rewards,
            pathfinder,
            mover,
            rng,
            grid,
            pedestrians,
            debris,
            vehicle,
            steps: 0,
            wait_counter: 0,
            total_reward: 0.0,
            done: false,
        };
        episode.restore()?;
        Ok(episode)
    }

    /// Restore the scenario: terrain, agent spawns (with fresh headings), and
    /// the vehicle on the start cell with a new path.  Returns the first
    /// observation.
    ///
    /// The RNG is not reseeded, so successive resets see different agent
    /// behaviour.
    pub fn reset(&mut self) -> SimResult<Observation> {
        self.pedestrians.reset(&mut self.rng);
        self.debris.reset(&mut self.rng);
        self.restore()?;
        Ok(self.observation())
    }

    fn restore(&mut self) -> SimResult<()> {
        self.grid = self.scenario.build_grid()?;
        self.grid.resync(Occupant::Pedestrian, &self.pedestrians.positions)?;
        self.grid.resync(Occupant::Debris, &self.debris.positions)?;
        self.vehicle =
            Self::spawn_vehicle(&self.scenario, &self.config, &self.grid, &self.pathfinder)?;
        self.grid.resync(Occupant::Vehicle, &[self.vehicle.pos()])?;
        self.steps = 0;
        self.wait_counter = 0;
        self.total_reward = 0.0;
        self.done = false;
        Ok(())
    }

    fn spawn_vehicle(
        scenario: &Scenario,
        config: &SimConfig,
        grid: &Grid,
        pathfinder: &F,
    ) -> SimResult<Vehicle> {
        let first = scenario
            .first_target()
            .ok_or_else(|| SimError::Config("scenario has no target".into()))?;
        let vehicle = VehicleBuilder::new(scenario.start)
            .id(VehicleId(0))
            .mode(Mode::PathOnly)
            .target(first)
            .destinations(scenario.remaining_targets().iter().copied())
            .path(pathfinder.find_path(grid, scenario.start, first))
            .config(config)
            .build()?;
        Ok(vehicle)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn pedestrians(&self) -> &AgentSet {
        &self.pedestrians
    }

    pub fn debris(&self) -> &AgentSet {
        &self.debris
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Consecutive waits since the last move or lane-change attempt.
    #[inline]
    pub fn wait_counter(&self) -> u32 {
        self.wait_counter
    }

    #[inline]
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Hazards at front-left, front and front-right of the vehicle.
    pub fn observation(&self) -> Observation {
        self.vehicle.observe(&self.grid, &GridOracle)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Let `policy` pick the action for the current observation, then step.
    pub fn step_with<P: Policy + ?Sized>(&mut self, policy: &P) -> SimResult<StepOutcome> {
        let action = policy.lookup(self.observation().code());
        self.step(action)
    }

    /// Advance one tick with `action`.
    ///
    /// Order: pedestrians move, then debris (neither may enter the vehicle
    /// cell); a wait requested while the wait counter is at the threshold is
    /// replaced with a random moving action; the action is applied and
    /// scored; termination is checked.
    pub fn step(&mut self, action: Action) -> SimResult<StepOutcome> {
        if self.done {
            return Err(SimError::EpisodeFinished { steps: self.steps });
        }
        self.steps += 1;

        let vehicles = [self.vehicle.pos()];
        self.mover.step(&mut self.pedestrians, &mut self.grid, &vehicles, &mut self.rng)?;
        self.mover.step(&mut self.debris, &mut self.grid, &vehicles, &mut self.rng)?;
        self.grid.resync(Occupant::Vehicle, &vehicles)?;

        let requested = action;
        let action = if action == Action::Wait && self.wait_counter >= self.config.wait_threshold
        {
            Action::MOVING[self.rng.below(Action::MOVING.len())]
        } else {
            action
        };

        let outcome = self.vehicle.apply_action(action, &self.grid, &self.pathfinder);
        let mut reward = self.score(outcome);

        let pos = self.vehicle.pos();
        self.grid.resync(Occupant::Vehicle, &[pos])?;

        let reached_target = self.scenario.targets.contains(&pos).then_some(pos);
        if reached_target.is_some() {
            reward += self.rewards.goal;
            self.done = true;
        }
        let collision = self.pedestrians.occupies(pos) || self.debris.occupies(pos);
        if collision {
            reward += self.rewards.collision;
            self.done = true;
        }
        let timed_out = self.steps >= self.config.max_steps;
        if timed_out {
            reward += self.rewards.timeout;
            self.done = true;
        }

        self.total_reward += reward;
        if self.done {
            tracing::debug!(
                steps = self.steps,
                total_reward = self.total_reward,
                reached = reached_target.is_some(),
                collision,
                timed_out,
                "episode finished"
            );
        }

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            done: self.done,
            info: StepInfo {
                step: self.steps,
                requested,
                action,
                outcome,
                reached_target,
                collision,
                timed_out,
            },
        })
    }

    /// Per-action reward; also maintains the wait counter.
    fn score(&mut self, outcome: ActionOutcome) -> f64 {
        let r = &self.rewards;
        match outcome {
            ActionOutcome::Waited => {
                self.wait_counter += 1;
                r.wait
            }
            ActionOutcome::Forward(Advance::Moved { .. }) => {
                self.wait_counter = 0;
                r.forward_success
            }
            ActionOutcome::Forward(_) => r.forward_fail,
            ActionOutcome::LaneChange { result, .. } => {
                self.wait_counter = 0;
                if result.moved() { r.lane_change_success } else { r.lane_change_fail }
            }
        }
    }

    /// Run greedily with `policy` until the episode ends.
    pub fn run_with<P: Policy + ?Sized>(&mut self, policy: &P) -> SimResult<f64> {
        while !self.done {
            self.step_with(policy)?;
        }
        Ok(self.total_reward)
    }
}
