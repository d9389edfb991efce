//! CSV output backend.
//!
//! Appends to three files in the configured output directory:
//! - `episodes.csv`
//! - `arrivals.csv`
//! - `vehicle_snapshots.csv`
//!
//! Each file gets its header row only when it is created empty, so several
//! runs can share one directory.

use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{ArrivalRow, EpisodeRow, OutputResult, VehicleSnapshotRow};

/// Writes run logs to three CSV files.
pub struct CsvWriter {
    episodes:  Writer<File>,
    arrivals:  Writer<File>,
    snapshots: Writer<File>,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` for appending.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let episodes = open_log(&dir.join("episodes.csv"), &[
            "episode", "scenario_seed", "steps", "total_reward",
            "reached_target", "collision", "timed_out",
        ])?;
        let arrivals = open_log(&dir.join("arrivals.csv"), &[
            "run", "seed", "vehicle", "mode", "tick", "elapsed_secs",
        ])?;
        let snapshots = open_log(&dir.join("vehicle_snapshots.csv"), &[
            "tick", "vehicle", "row", "col", "state", "blocked",
        ])?;

        Ok(Self {
            episodes,
            arrivals,
            snapshots,
        })
    }
}

/// Open `path` in append mode, writing `header` if the file is empty.
fn open_log(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let fresh = file.metadata()?.len() == 0;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if fresh {
        writer.write_record(header)?;
    }
    Ok(writer)
}

impl OutputWriter for CsvWriter {
    fn write_episode(&mut self, row: &EpisodeRow) -> OutputResult<()> {
        self.episodes.write_record(&[
            row.episode.to_string(),
            row.scenario_seed.to_string(),
            row.steps.to_string(),
            format!("{:.3}", row.total_reward),
            (row.reached_target as u8).to_string(),
            (row.collision as u8).to_string(),
            (row.timed_out as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()> {
        self.arrivals.write_record(&[
            row.run.to_string(),
            row.seed.to_string(),
            row.vehicle.to_string(),
            row.mode.to_string(),
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.vehicle.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.state.to_string(),
                row.blocked.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.episodes.flush()?;
        self.arrivals.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
