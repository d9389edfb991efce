//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use av_core::Tick;
use av_sim::{Arrival, EpisodeSummary, SimObserver};
use av_vehicle::{Mode, Vehicle};

use crate::row::{ArrivalRow, EpisodeRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes episode summaries, arrivals and vehicle
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// Snapshot every n-th tick; 0 disables snapshots.
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer` that snapshots every tick.
    pub fn new(writer: W) -> Self {
        Self { writer, snapshot_interval: 1, last_error: None }
    }

    /// Snapshot vehicles every `ticks` ticks (0 turns snapshots off).
    pub fn snapshot_interval(mut self, ticks: u64) -> Self {
        self.snapshot_interval = ticks;
        self
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Evaluation batches have no `on_sim_end`, so call
    /// this after `Evaluator::run_observed`.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Hybrid => "hybrid",
        Mode::PathOnly => "path_only",
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, vehicles: &[Vehicle]) {
        if self.snapshot_interval == 0 || !tick.0.is_multiple_of(self.snapshot_interval) {
            return;
        }
        let rows: Vec<VehicleSnapshotRow> = vehicles
            .iter()
            .map(|v| VehicleSnapshotRow {
                tick:    tick.0,
                vehicle: v.id().0,
                row:     v.pos().row,
                col:     v.pos().col,
                state:   v.state().label(),
                blocked: v.blocked(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_arrival(&mut self, arrival: &Arrival) {
        let row = ArrivalRow {
            run:          arrival.run,
            seed:         arrival.seed,
            vehicle:      arrival.vehicle.0,
            mode:         mode_label(arrival.mode),
            tick:         arrival.tick.0,
            elapsed_secs: arrival.elapsed_secs,
        };
        let result = self.writer.write_arrival(&row);
        self.store_err(result);
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) {
        let row = EpisodeRow {
            episode:        summary.episode,
            scenario_seed:  summary.scenario_seed,
            steps:          summary.steps,
            total_reward:   summary.total_reward,
            reached_target: summary.reached_target,
            collision:      summary.collision,
            timed_out:      summary.timed_out,
        };
        let result = self.writer.write_episode(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
