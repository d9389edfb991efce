//! The `OutputWriter` trait implemented by backend writers.

use crate::{ArrivalRow, EpisodeRow, OutputResult, VehicleSnapshotRow};

/// Trait implemented by run-log writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    fn write_episode(&mut self, row: &EpisodeRow) -> OutputResult<()>;

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()>;

    /// Write a batch of per-tick vehicle positions.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Flush everything written so far.
    ///
    /// Safe to call more than once; writes may continue afterwards.
    fn finish(&mut self) -> OutputResult<()>;
}
