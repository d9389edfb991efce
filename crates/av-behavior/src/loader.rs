//! CSV policy-table loader.
//!
//! # CSV format
//!
//! One row per observation code, all eight codes present exactly once:
//!
//! ```csv
//! code,wait,forward,turn_right,turn_left
//! 0,0.0,4.2,-0.3,-0.3
//! 1,0.0,1.7,-1.2,0.4
//! ...
//! 7,0.9,-3.1,0.2,0.1
//! ```
//!
//! Row order does not matter.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{BehaviorError, BehaviorResult, ObservationCode, QTable};

#[derive(Deserialize)]
struct QRecord {
    code:       u8,
    wait:       f32,
    forward:    f32,
    turn_right: f32,
    turn_left:  f32,
}

/// Load a [`QTable`] from a CSV file.
pub fn load_qtable_csv(path: &Path) -> BehaviorResult<QTable> {
    let file = std::fs::File::open(path)?;
    load_qtable_reader(file)
}

/// Like [`load_qtable_csv`] but accepts any `Read` source.
pub fn load_qtable_reader<R: Read>(reader: R) -> BehaviorResult<QTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut values = [[0.0f32; 4]; ObservationCode::COUNT];
    let mut seen = [false; ObservationCode::COUNT];

    for result in csv_reader.deserialize::<QRecord>() {
        let row = result.map_err(|e| BehaviorError::Parse(e.to_string()))?;
        let code = ObservationCode::new(row.code)
            .ok_or_else(|| BehaviorError::Table(format!("code {} outside 0..8", row.code)))?;
        if seen[code.index()] {
            return Err(BehaviorError::Table(format!("code {code} listed twice")));
        }
        seen[code.index()] = true;
        values[code.index()] = [row.wait, row.forward, row.turn_right, row.turn_left];
    }

    if let Some(missing) = seen.iter().position(|s| !s) {
        return Err(BehaviorError::Table(format!("code {missing} missing")));
    }
    QTable::new(values)
}
