//! Vehicle actions and the 3-cell hazard observation.

use std::fmt;

// ── Action ────────────────────────────────────────────────────────────────────

/// One vehicle decision.  Discriminants are the policy-table column indices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Action {
    Wait = 0,
    Forward = 1,
    TurnRight = 2,
    TurnLeft = 3,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Wait, Action::Forward, Action::TurnRight, Action::TurnLeft];

    /// Candidates for the anti-stall substitution.
    pub const MOVING: [Action; 3] = [Action::Forward, Action::TurnRight, Action::TurnLeft];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Action> {
        Action::ALL.get(i).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Wait      => "Wait",
            Action::Forward   => "Forward",
            Action::TurnRight => "Right",
            Action::TurnLeft  => "Left",
        })
    }
}

// ── Observation ───────────────────────────────────────────────────────────────

/// Hazard presence in the three cells ahead of the vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub front_left: bool,
    pub front: bool,
    pub front_right: bool,
}

impl Observation {
    pub const CLEAR: Observation = Observation { front_left: false, front: false, front_right: false };

    pub fn new(front_left: bool, front: bool, front_right: bool) -> Self {
        Self { front_left, front, front_right }
    }

    /// `front_left·4 + front·2 + front_right`.
    #[inline]
    pub fn code(self) -> ObservationCode {
        ObservationCode((self.front_left as u8) << 2 | (self.front as u8) << 1 | self.front_right as u8)
    }

    pub fn any(self) -> bool {
        self.front_left || self.front || self.front_right
    }

    /// `(front_left, front, front_right)` as 0/1 flags.
    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.front_left as u8, self.front as u8, self.front_right as u8)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, c, r) = self.as_tuple();
        write!(f, "({l}, {c}, {r})")
    }
}

// ── ObservationCode ───────────────────────────────────────────────────────────

/// A policy-table row index, always in `0..8`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationCode(u8);

impl ObservationCode {
    pub const COUNT: usize = 8;

    pub fn new(code: u8) -> Option<ObservationCode> {
        (code < Self::COUNT as u8).then_some(ObservationCode(code))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn observation(self) -> Observation {
        Observation::new(self.0 & 4 != 0, self.0 & 2 != 0, self.0 & 1 != 0)
    }

    pub fn all() -> impl Iterator<Item = ObservationCode> {
        (0..Self::COUNT as u8).map(ObservationCode)
    }
}

impl From<Observation> for ObservationCode {
    fn from(obs: Observation) -> Self {
        obs.code()
    }
}

impl fmt::Display for ObservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
