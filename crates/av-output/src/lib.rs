//! `av-output`: run-log writers for the gridnav vehicle simulator.
//!
//! | Backend | Files created                                             |
//! |---------|-----------------------------------------------------------|
//! | CSV     | `episodes.csv`, `arrivals.csv`, `vehicle_snapshots.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `av_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use av_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ArrivalRow, EpisodeRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
