use std::time::{Duration, Instant};

use super::metrics::total_investment;
use crate::data::filter::FilteredView;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Progress towards the investment target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// At most 100 %: the bar fills up to `percent`.
    InProgress,
    /// Past the target: a completion message replaces the bar.
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub percent: u32,
    pub target: f64,
    pub current: f64,
    pub state: ProgressState,
}

impl Progress {
    /// Progress of the view's investment sum against `target`.
    pub fn compute(view: &FilteredView<'_>, target: f64) -> Result<Self, PipelineError> {
        Self::from_sum(total_investment(view), target)
    }

    pub fn from_sum(current: f64, target: f64) -> Result<Self, PipelineError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(PipelineError::InvalidTarget(target));
        }
        let percent = (current / target * 100.0).round_ties_even().max(0.0) as u32;
        let state = if percent > 100 {
            ProgressState::Complete
        } else {
            ProgressState::InProgress
        };
        Ok(Progress {
            percent,
            target,
            current,
            state,
        })
    }
}

// ---------------------------------------------------------------------------
// Fill animation
// ---------------------------------------------------------------------------

/// One-shot fill from 0 % to a goal, one point per `step`.
///
/// Driven by the frame loop: [`tick`](Self::tick) is called every frame and
/// returns how long until the next point is due.
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    goal: u32,
    shown: u32,
    step: Duration,
    last_step: Instant,
}

impl ProgressAnimation {
    pub fn start(goal: u32, step: Duration, now: Instant) -> Self {
        Self {
            goal,
            shown: 0,
            step,
            last_step: now,
        }
    }

    /// Percentage currently drawn.
    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn is_finished(&self) -> bool {
        self.shown >= self.goal
    }

    /// Advance by every step that elapsed since the last one. Returns the
    /// delay until the next step, or `None` once the goal is reached.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if self.step.is_zero() {
            self.shown = self.goal;
        }
        while !self.is_finished() && now.duration_since(self.last_step) >= self.step {
            self.shown += 1;
            self.last_step += self.step;
        }
        if self.is_finished() {
            return None;
        }
        Some(self.step.saturating_sub(now.duration_since(self.last_step)))
    }
}
