//! The `Policy` trait and its table-backed implementation.

use crate::{Action, BehaviorError, BehaviorResult, ObservationCode};

/// Read-only mapping from an observation code to an action.
///
/// # Thread safety
///
/// Evaluation batches share one policy across Rayon workers, so
/// implementations must be `Send + Sync`.
pub trait Policy: Send + Sync {
    fn lookup(&self, code: ObservationCode) -> Action;
}

// ── QTable ────────────────────────────────────────────────────────────────────

/// 8 × 4 action-value table.  `lookup` is the arg-max of the row, with the
/// lowest action index winning ties.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QTable {
    values: [[f32; 4]; ObservationCode::COUNT],
}

impl QTable {
    pub fn new(values: [[f32; 4]; ObservationCode::COUNT]) -> BehaviorResult<Self> {
        for (code, row) in values.iter().enumerate() {
            if row.iter().any(|v| v.is_nan()) {
                return Err(BehaviorError::Table(format!("row {code} contains NaN")));
            }
        }
        Ok(Self { values })
    }

    /// All-zero table; every code maps to `Wait`.
    pub fn zeros() -> Self {
        Self { values: [[0.0; 4]; ObservationCode::COUNT] }
    }

    /// Table whose arg-max for every code is `action`.
    pub fn uniform(action: Action) -> Self {
        let mut t = Self::zeros();
        for row in t.values.iter_mut() {
            row[action.index()] = 1.0;
        }
        t
    }

    #[inline]
    pub fn row(&self, code: ObservationCode) -> &[f32; 4] {
        &self.values[code.index()]
    }

    /// Overwrite one entry.
    pub fn set(&mut self, code: ObservationCode, action: Action, value: f32) {
        self.values[code.index()][action.index()] = value;
    }

    /// Make `action` the strict best choice for `code`.
    pub fn prefer(&mut self, code: ObservationCode, action: Action) {
        let best = self.row(code).iter().copied().fold(f32::NEG_INFINITY, f32::max);
        self.set(code, action, best + 1.0);
    }
}

impl Policy for QTable {
    fn lookup(&self, code: ObservationCode) -> Action {
        let row = self.row(code);
        let mut best = 0;
        for (i, &v) in row.iter().enumerate().skip(1) {
            if v > row[best] {
                best = i;
            }
        }
        Action::from_index(best).unwrap_or(Action::Wait)
    }
}

// ── ConstantPolicy ────────────────────────────────────────────────────────────

/// Always answers with the same action.
#[derive(Copy, Clone, Debug)]
pub struct ConstantPolicy(pub Action);

impl Policy for ConstantPolicy {
    fn lookup(&self, _code: ObservationCode) -> Action {
        self.0
    }
}
