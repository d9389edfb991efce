//! Bounded per-vehicle decision log.

use std::collections::VecDeque;
use std::fmt;

use av_behavior::{Action, Observation};
use av_core::{Cell, Side};

/// One logged controller event.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    HazardDetected { cell: Cell, confidence: f32 },
    Waited { ticks: u32 },
    PolicyDecision { observation: Observation, action: Action },
    Waiting,
    TryingForward,
    ForwardBlocked { cell: Cell },
    RightBlockedByBuilding,
    TryingLaneChange { side: Side },
    LaneChangeRejected { side: Side, cell: Cell },
    NewPath { len: usize },
    TargetChanged { target: Cell },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HazardDetected { cell, confidence } => {
                write!(f, "hazard detected at {cell} with confidence {confidence:.2}")
            }
            Diagnostic::Waited { ticks } => write!(f, "waited for {ticks} ticks"),
            Diagnostic::PolicyDecision { observation, action } => {
                write!(f, "policy chose {action} for state {observation}")
            }
            Diagnostic::Waiting => f.write_str("waiting"),
            Diagnostic::TryingForward => f.write_str("trying to go forward"),
            Diagnostic::ForwardBlocked { cell } => write!(f, "forward blocked at {cell}"),
            Diagnostic::RightBlockedByBuilding => {
                f.write_str("right blocked by building, trying left")
            }
            Diagnostic::TryingLaneChange { side } => write!(f, "trying to go {side}"),
            Diagnostic::LaneChangeRejected { side, cell } => {
                write!(f, "{side} lane change rejected at {cell}")
            }
            Diagnostic::NewPath { len } => write!(f, "new path calculated ({len} steps)"),
            Diagnostic::TargetChanged { target } => write!(f, "heading for {target}"),
        }
    }
}

/// Keeps the most recent `capacity` entries.
#[derive(Clone, Debug)]
pub struct DiagnosticLog {
    capacity: usize,
    entries: VecDeque<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, entry: Diagnostic) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Diagnostic> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Diagnostic> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new(25)
    }
}
