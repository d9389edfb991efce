//! The `Sim` struct and its interactive tick loop.

use av_agent::AgentSet;
use av_behavior::HazardOracle;
use av_core::{Cell, SimClock, SimConfig, SimRng, Tick, VehicleId};
use av_grid::{Grid, Occupant, Pathfinder};
use av_mobility::Mover;
use av_vehicle::{Mode, TickReport, Vehicle};

use crate::{SimObserver, SimResult};

/// A vehicle reaching the final target for the first time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arrival {
    /// Caller-chosen identifier of the run this arrival belongs to.
    pub run: u32,
    /// Seed the run was built from.
    pub seed: u64,
    pub vehicle: VehicleId,
    pub mode: Mode,
    pub tick: Tick,
    /// Simulated seconds since the run started.
    pub elapsed_secs: f64,
}

/// The interactive run: every vehicle drives itself through the same world.
///
/// Each tick:
///
/// 1. **Agents**: pedestrians, then debris, take one wandering step.  No
///    agent may enter a cell holding a vehicle.
/// 2. **Arrivals**: vehicles standing on the final target are recorded once.
/// 3. **Vehicles**: every vehicle that has not arrived runs one controller
///    tick in `VehicleId` order, then vehicle tags are restamped.
///
/// The run stops when every vehicle has arrived or `max_ticks` is reached.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: Pathfinder, O: HazardOracle> {
    /// Global configuration (seed, wait threshold, tick length, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to simulated time.
    pub clock: SimClock,

    /// Hard stop for [`run`](Sim::run).
    pub max_ticks: u64,

    /// Identifier stamped on every [`Arrival`].
    pub run_id: u32,

    pub grid: Grid,
    pub pedestrians: AgentSet,
    pub debris: AgentSet,

    /// Vehicles, indexed by `VehicleId`.
    pub vehicles: Vec<Vehicle>,

    /// First arrival tick per vehicle.
    pub arrivals: Vec<Option<Tick>>,

    pub(crate) final_target: Cell,
    pub(crate) mover: Mover,
    pub(crate) rng: SimRng,
    pub(crate) pathfinder: F,
    pub(crate) oracle: O,
}

impl<F: Pathfinder, O: HazardOracle> Sim<F, O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every vehicle has arrived or `max_ticks` is reached.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        while !self.all_arrived() && self.clock.current_tick.0 < self.max_ticks {
            self.run_tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(
            ticks = self.clock.current_tick.0,
            arrived = self.arrivals.iter().filter(|a| a.is_some()).count(),
            vehicles = self.vehicles.len(),
            "run finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `max_ticks`
    /// and arrivals).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<Obs: SimObserver>(&mut self, n: u64, observer: &mut Obs) -> SimResult<()> {
        for _ in 0..n {
            self.run_tick(observer)?;
        }
        Ok(())
    }

    /// Queue another destination on every vehicle.  It becomes the new final
    /// target.
    pub fn push_destination(&mut self, cell: Cell) {
        for v in &mut self.vehicles {
            v.push_destination(cell);
        }
        self.final_target = cell;
    }

    #[inline]
    pub fn final_target(&self) -> Cell {
        self.final_target
    }

    pub fn all_arrived(&self) -> bool {
        self.arrivals.iter().all(Option::is_some)
    }

    /// Simulated seconds each vehicle took to arrive.
    pub fn arrival_secs(&self) -> Vec<Option<f64>> {
        self.arrivals
            .iter()
            .map(|a| a.map(|t| self.clock.secs_for_ticks(t.0)))
            .collect()
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn run_tick<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        observer.on_tick_end(now, &self.vehicles);
        self.clock.advance();
        Ok(())
    }

    fn process_tick<Obs: SimObserver>(&mut self, now: Tick, observer: &mut Obs) -> SimResult<()> {
        // ① Agents
        let occupied: Vec<Cell> = self.vehicles.iter().map(Vehicle::pos).collect();
        self.mover.step(&mut self.pedestrians, &mut self.grid, &occupied, &mut self.rng)?;
        self.mover.step(&mut self.debris, &mut self.grid, &occupied, &mut self.rng)?;

        // ② Arrivals
        self.record_arrivals(now, observer);

        // ③ Vehicles
        for i in 0..self.vehicles.len() {
            if self.arrivals[i].is_some() {
                continue;
            }
            let report = self.vehicles[i].tick(&self.grid, &self.oracle, &self.pathfinder);
            log_report(&self.vehicles[i], now, &report);
        }
        let occupied: Vec<Cell> = self.vehicles.iter().map(Vehicle::pos).collect();
        self.grid.resync(Occupant::Vehicle, &occupied)?;

        #[cfg(debug_assertions)]
        {
            self.grid.check_occupancy(Occupant::Pedestrian, &self.pedestrians.positions)?;
            self.grid.check_occupancy(Occupant::Debris, &self.debris.positions)?;
        }
        Ok(())
    }

    fn record_arrivals<Obs: SimObserver>(&mut self, now: Tick, observer: &mut Obs) {
        for (v, slot) in self.vehicles.iter().zip(self.arrivals.iter_mut()) {
            if slot.is_none() && v.pos() == self.final_target {
                *slot = Some(now);
                let arrival = Arrival {
                    run: self.run_id,
                    seed: self.config.seed,
                    vehicle: v.id(),
                    mode: v.mode(),
                    tick: now,
                    elapsed_secs: self.clock.secs_for_ticks(now.0),
                };
                tracing::info!(
                    run = self.run_id,
                    vehicle = %v.id(),
                    tick = %now,
                    secs = arrival.elapsed_secs,
                    "arrived"
                );
                observer.on_arrival(&arrival);
            }
        }
    }
}

fn log_report(vehicle: &Vehicle, now: Tick, report: &TickReport) {
    tracing::trace!(
        vehicle = %vehicle.id(),
        tick = %now,
        action = %report.decision.action,
        moved = report.outcome.moved(),
        pos = %vehicle.pos(),
        "vehicle tick"
    );
}
