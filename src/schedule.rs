//! Move-to step scheduling.
//!
//! Picks a step size and a step interval so that a move of `diff` tenths
//! lasts roughly the requested duration. Tighter deadlines get coarser steps,
//! which bounds how often the display has to be redrawn. All arithmetic is
//! truncating integer division; step counts and timings depend on it.

/// Step size and cadence for one move-to episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSchedule {
    /// Signed delta applied per step, in tenths. Never zero.
    pub step_increment: i16,
    /// Milliseconds between steps.
    pub step_interval_ms: u32,
}

impl MoveSchedule {
    /// Compute the schedule for moving from `from` to `to` (both tenths)
    /// over `duration_ms`.
    ///
    /// Returns `None` when `from == to`; there is nothing to animate.
    pub fn compute(from: u16, to: u16, duration_ms: u32) -> Option<Self> {
        let diff = i64::from(to) - i64::from(from);
        if diff == 0 {
            return None;
        }
        let direction: i64 = if diff < 0 { -1 } else { 1 };
        let duration = i64::from(duration_ms);

        // ms per tenth if stepping by one
        let rough = duration / diff * direction;

        let magnitude = if rough < 6 {
            9
        } else if rough < 10 {
            6
        } else if rough < 20 {
            4
        } else if rough % 1000 == 0 {
            1
        } else {
            2
        };
        let step_increment = magnitude * direction;

        // a move shorter than one step still takes one step
        let steps = (diff / step_increment).max(1);
        let step_interval_ms = duration / steps;

        Some(Self {
            step_increment: step_increment as i16,
            step_interval_ms: step_interval_ms as u32,
        })
    }

    /// Number of steps until `from` reaches `to`, including the final snap.
    pub fn steps_between(&self, from: u16, to: u16) -> u32 {
        let diff = (i32::from(to) - i32::from(from)).unsigned_abs();
        let step = u32::from(self.step_increment.unsigned_abs());
        diff.div_ceil(step)
    }
}
