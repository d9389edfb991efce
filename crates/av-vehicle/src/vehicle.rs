//! The vehicle: position, plan, target queue, and the per-tick controller.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use av_behavior::{Action, HazardOracle, Observation, Policy};
use av_core::{Cell, Direction, Side, VehicleId};
use av_grid::{Grid, Path, Pathfinder};

use crate::{ControlState, Diagnostic, DiagnosticLog, Escalation};

/// A replanned path is adopted only if it is longer than this.
pub const MIN_ADOPTED_PATH_LEN: usize = 1;

/// Controller capability level.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Wait, then escalate to the policy after the blocked threshold.
    #[default]
    Hybrid,
    /// Follow the path while clear, hold otherwise.
    PathOnly,
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of trying to advance one path step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Advance {
    Moved { from: Cell, to: Cell },
    /// The next step is out of bounds, a building, or holds a hazard.
    Blocked { cell: Cell },
    /// The path was exhausted and a fresh one was adopted.
    Replanned { len: usize },
    /// The path was exhausted and nothing worth adopting came back.
    Idle,
}

impl Advance {
    #[inline]
    pub fn moved(self) -> bool {
        matches!(self, Advance::Moved { .. })
    }
}

/// Result of a lane-change attempt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LaneChange {
    Moved { from: Cell, to: Cell, replanned: bool },
    Rejected { cell: Cell },
    /// No heading to turn from.
    NoHeading,
}

impl LaneChange {
    #[inline]
    pub fn moved(self) -> bool {
        matches!(self, LaneChange::Moved { .. })
    }
}

/// What applying an action did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ActionOutcome {
    Waited,
    Forward(Advance),
    LaneChange { side: Side, result: LaneChange },
}

impl ActionOutcome {
    /// `true` if the vehicle changed cell.
    pub fn moved(self) -> bool {
        match self {
            ActionOutcome::Waited => false,
            ActionOutcome::Forward(a) => a.moved(),
            ActionOutcome::LaneChange { result, .. } => result.moved(),
        }
    }
}

/// What the controller chose this tick, before acting on it.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Decision {
    pub action: Action,
    /// First hazard seen ahead, with the oracle's confidence.
    pub hazard: Option<(Cell, f32)>,
    /// Set when the policy was consulted.
    pub observation: Option<Observation>,
}

/// Full record of one controller tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TickReport {
    pub decision: Decision,
    pub outcome: ActionOutcome,
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One vehicle.  Owns its path and destination queue exclusively.
///
/// Construct with [`VehicleBuilder`](crate::VehicleBuilder).
#[derive(Clone)]
pub struct Vehicle {
    pub(crate) id: VehicleId,
    pub(crate) mode: Mode,
    pub(crate) pos: Cell,
    pub(crate) path: Path,
    pub(crate) cursor: usize,
    pub(crate) destinations: VecDeque<Cell>,
    pub(crate) current_target: Cell,
    pub(crate) last_heading: Option<Direction>,
    pub(crate) state: ControlState,
    pub(crate) wait_threshold: u32,
    pub(crate) diagnostics: DiagnosticLog,
    pub(crate) policy: Option<Arc<dyn Policy>>,
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("pos", &self.pos)
            .field("cursor", &self.cursor)
            .field("path_len", &self.path.len())
            .field("current_target", &self.current_target)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Vehicle {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn pos(&self) -> Cell {
        self.pos
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn current_target(&self) -> Cell {
        self.current_target
    }

    pub fn destinations(&self) -> impl Iterator<Item = Cell> + '_ {
        self.destinations.iter().copied()
    }

    #[inline]
    pub fn state(&self) -> ControlState {
        self.state
    }

    #[inline]
    pub fn blocked(&self) -> u32 {
        self.state.blocked()
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Queue another destination after the existing ones.
    pub fn push_destination(&mut self, cell: Cell) {
        self.destinations.push_back(cell);
    }

    /// Next cell on the path, if the path is not exhausted.
    #[inline]
    pub fn next_step(&self) -> Option<Cell> {
        self.path.get(self.cursor)
    }

    /// Direction of travel: towards the next path step, else the last move.
    pub fn heading(&self) -> Option<Direction> {
        self.next_step()
            .and_then(|next| self.pos.direction_to(next))
            .or(self.last_heading)
    }

    /// Rendering angle of the last move (0 before the first move).
    pub fn angle_deg(&self) -> i16 {
        self.last_heading.map_or(0, Direction::angle_deg)
    }

    // ── Perception ────────────────────────────────────────────────────────

    /// `[front_left, front, front_right]` relative to `heading`.
    pub fn front_cells(&self, heading: Direction) -> [Cell; 3] {
        let front = self.pos.step(heading);
        [
            front.step(heading.turn(Side::Left)),
            front,
            front.step(heading.turn(Side::Right)),
        ]
    }

    /// First hazard ahead, checked front, front-left, front-right.
    ///
    /// Only scans while a next path step exists.
    pub fn scan<O: HazardOracle + ?Sized>(&self, grid: &Grid, oracle: &O) -> Option<(Cell, f32)> {
        self.next_step()?;
        let heading = self.heading()?;
        let [fl, f, fr] = self.front_cells(heading);
        [f, fl, fr]
            .into_iter()
            .filter(|&c| grid.in_bounds(c))
            .find_map(|c| oracle.detect(c, grid).map(|conf| (c, conf)))
    }

    /// 3-bit hazard observation relative to the heading (north if none).
    pub fn observe<O: HazardOracle + ?Sized>(&self, grid: &Grid, oracle: &O) -> Observation {
        let heading = self.heading().unwrap_or_default();
        let [fl, f, fr] = self.front_cells(heading);
        let seen = |c: Cell| grid.in_bounds(c) && oracle.detect(c, grid).is_some();
        Observation::new(seen(fl), seen(f), seen(fr))
    }

    // ── Decision ──────────────────────────────────────────────────────────

    /// Choose this tick's action and advance the control state.
    ///
    /// Clear ahead yields `Forward`.  A hazard yields `Wait` until the blocked
    /// counter reaches the threshold, then the policy's answer.
    pub fn decide<O: HazardOracle + ?Sized>(&mut self, grid: &Grid, oracle: &O) -> Decision {
        let Some((cell, confidence)) = self.scan(grid, oracle) else {
            self.state = self.state.on_clear();
            return Decision { action: Action::Forward, hazard: None, observation: None };
        };
        let hazard = Some((cell, confidence));

        if self.mode == Mode::PathOnly {
            return Decision { action: Action::Wait, hazard, observation: None };
        }

        self.diagnostics.push(Diagnostic::HazardDetected { cell, confidence });
        let (next, escalation) = self.state.on_hazard(self.wait_threshold);
        self.state = next;

        match (escalation, self.policy.as_ref()) {
            (Escalation::Consult(waited), Some(policy)) => {
                let observation = self.observe(grid, oracle);
                let action = policy.lookup(observation.code());
                self.diagnostics.push(Diagnostic::PolicyDecision { observation, action });
                tracing::debug!(
                    vehicle = %self.id,
                    waited,
                    observation = %observation,
                    action = %action,
                    "policy consulted"
                );
                Decision { action, hazard, observation: Some(observation) }
            }
            (Escalation::Hold(n), _) | (Escalation::Consult(n), None) => {
                self.diagnostics.push(Diagnostic::Waited { ticks: n });
                tracing::debug!(vehicle = %self.id, blocked = n, %cell, "hazard ahead, holding");
                Decision { action: Action::Wait, hazard, observation: None }
            }
        }
    }

    /// One full controller tick: decide, then act.
    ///
    /// A hazard below the threshold is a pure wait, so the position is
    /// unchanged.
    pub fn tick<O, F>(&mut self, grid: &Grid, oracle: &O, pathfinder: &F) -> TickReport
    where
        O: HazardOracle + ?Sized,
        F: Pathfinder + ?Sized,
    {
        let decision = self.decide(grid, oracle);
        let outcome = match (decision.hazard, decision.observation) {
            // Held or path-only: nothing else happens this tick.
            (Some(_), None) => ActionOutcome::Waited,
            (None, _) => ActionOutcome::Forward(self.advance(grid, pathfinder)),
            (Some(_), Some(_)) => self.apply_action(decision.action, grid, pathfinder),
        };
        TickReport { decision, outcome }
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Carry out `action`.
    ///
    /// `TurnRight` falls back to a left lane change when the front-right
    /// diagonal is a building.
    pub fn apply_action<F: Pathfinder + ?Sized>(
        &mut self,
        action: Action,
        grid: &Grid,
        pathfinder: &F,
    ) -> ActionOutcome {
        match action {
            Action::Wait => {
                self.diagnostics.push(Diagnostic::Waiting);
                ActionOutcome::Waited
            }
            Action::Forward => {
                self.diagnostics.push(Diagnostic::TryingForward);
                ActionOutcome::Forward(self.advance(grid, pathfinder))
            }
            Action::TurnRight => {
                let side = if self.front_right_is_building(grid) {
                    self.diagnostics.push(Diagnostic::RightBlockedByBuilding);
                    Side::Left
                } else {
                    Side::Right
                };
                let result = self.change_lane(side, grid, pathfinder);
                ActionOutcome::LaneChange { side, result }
            }
            Action::TurnLeft => {
                let result = self.change_lane(Side::Left, grid, pathfinder);
                ActionOutcome::LaneChange { side: Side::Left, result }
            }
        }
    }

    fn front_right_is_building(&self, grid: &Grid) -> bool {
        if self.next_step().is_none() {
            return false;
        }
        self.heading()
            .is_some_and(|h| grid.is_static_obstacle(self.front_cells(h)[2]))
    }

    /// Advance one path step, or replan if the path is exhausted.
    ///
    /// Refuses to enter a cell that is out of bounds, a building, or holds a
    /// hazard.  On exhaustion the next queued destination (if any) becomes
    /// the current target and a path to it is planned.
    pub fn advance<F: Pathfinder + ?Sized>(&mut self, grid: &Grid, pathfinder: &F) -> Advance {
        if let Some(next) = self.next_step() {
            if !grid.is_free(next) {
                self.diagnostics.push(Diagnostic::ForwardBlocked { cell: next });
                return Advance::Blocked { cell: next };
            }
            let from = self.pos;
            if let Some(d) = from.direction_to(next) {
                self.last_heading = Some(d);
            }
            self.pos = next;
            self.cursor += 1;
            return Advance::Moved { from, to: next };
        }

        if let Some(target) = self.destinations.pop_front() {
            self.current_target = target;
            self.diagnostics.push(Diagnostic::TargetChanged { target });
            tracing::debug!(vehicle = %self.id, %target, "next destination");
        }
        match self.replan(grid, pathfinder) {
            Some(len) => Advance::Replanned { len },
            None => Advance::Idle,
        }
    }

    /// Move sideways into the neighbouring lane.
    ///
    /// After moving, a path to the current target is planned from the new
    /// cell.  If none is adopted the old path is dropped, so the next tick
    /// sees an exhausted path and retries.
    pub fn change_lane<F: Pathfinder + ?Sized>(
        &mut self,
        side: Side,
        grid: &Grid,
        pathfinder: &F,
    ) -> LaneChange {
        self.diagnostics.push(Diagnostic::TryingLaneChange { side });
        let Some(heading) = self.heading() else {
            return LaneChange::NoHeading;
        };
        let dest = self.pos.step(heading.turn(side));
        if !grid.is_free(dest) {
            self.diagnostics.push(Diagnostic::LaneChangeRejected { side, cell: dest });
            return LaneChange::Rejected { cell: dest };
        }

        let from = self.pos;
        self.pos = dest;
        self.last_heading = Some(heading);
        self.state = self.state.on_lane_change();

        let replanned = dest != self.current_target && self.replan(grid, pathfinder).is_some();
        if !replanned {
            self.path = Path::default();
            self.cursor = 0;
        }
        tracing::debug!(vehicle = %self.id, %from, to = %dest, %side, replanned, "lane change");
        LaneChange::Moved { from, to: dest, replanned }
    }

    /// Plan from the current cell to the current target and adopt the result
    /// if it is long enough.  Returns the adopted length.
    fn replan<F: Pathfinder + ?Sized>(&mut self, grid: &Grid, pathfinder: &F) -> Option<usize> {
        let path = pathfinder.find_path(grid, self.pos, self.current_target);
        if path.len() <= MIN_ADOPTED_PATH_LEN {
            return None;
        }
        let len = path.len();
        self.path = path;
        self.cursor = 0;
        self.diagnostics.push(Diagnostic::NewPath { len });
        Some(len)
    }
}
