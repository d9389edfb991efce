//! Blocked-counter state machine.
//!
//! The counter lives inside the state, so "waiting" can never disagree with
//! the number of ticks waited.  Transitions are pure functions.

/// Where the controller stands between ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ControlState {
    #[default]
    FollowingPath,
    /// Blocked for this many consecutive ticks, below the threshold.
    Waiting(u32),
    /// A lane change was just performed; cleared by the next tick.
    LaneChanging,
}

/// What a hazard tick asks the controller to do.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Escalation {
    /// Keep waiting; carries the updated blocked count.
    Hold(u32),
    /// Threshold reached: consult the policy.  Carries the count that
    /// triggered it.
    Consult(u32),
}

impl ControlState {
    /// Consecutive blocked ticks so far.
    #[inline]
    pub fn blocked(self) -> u32 {
        match self {
            ControlState::Waiting(n) => n,
            _ => 0,
        }
    }

    /// Short name for logs and output rows.
    pub fn label(self) -> &'static str {
        match self {
            ControlState::FollowingPath => "following",
            ControlState::Waiting(_) => "waiting",
            ControlState::LaneChanging => "lane_changing",
        }
    }

    /// Transition on a hazard-positive tick.
    ///
    /// Reaching `threshold` resets the counter: the returned state is
    /// `FollowingPath` and the escalation is `Consult`.
    pub fn on_hazard(self, threshold: u32) -> (ControlState, Escalation) {
        let n = self.blocked() + 1;
        if n >= threshold {
            (ControlState::FollowingPath, Escalation::Consult(n))
        } else {
            (ControlState::Waiting(n), Escalation::Hold(n))
        }
    }

    /// Transition on a hazard-free tick.
    #[inline]
    pub fn on_clear(self) -> ControlState {
        ControlState::FollowingPath
    }

    /// Transition after a successful lane change.
    #[inline]
    pub fn on_lane_change(self) -> ControlState {
        ControlState::LaneChanging
    }
}
