//! Plain data row types written by output backends.

/// One finished evaluation episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeRow {
    pub episode:        u32,
    pub scenario_seed:  u64,
    pub steps:          u32,
    pub total_reward:   f64,
    pub reached_target: bool,
    pub collision:      bool,
    pub timed_out:      bool,
}

/// A vehicle's first arrival at the final target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalRow {
    pub run:          u32,
    pub seed:         u64,
    pub vehicle:      u16,
    /// `"hybrid"` or `"path_only"`.
    pub mode:         &'static str,
    pub tick:         u64,
    pub elapsed_secs: f64,
}

/// Where one vehicle stands at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleSnapshotRow {
    pub tick:    u64,
    pub vehicle: u16,
    pub row:     i32,
    pub col:     i32,
    pub state:   &'static str,
    pub blocked: u32,
}
