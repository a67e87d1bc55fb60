//! The action gate between whoever proposes actions and the agent.
//!
//! An outside controller (a learning loop, a replay, a test) may propose an
//! action every decision.  The gate never applies it: it evaluates the
//! heuristic and returns that instead.  The proposal is still accepted and
//! compared so the override is observable in logs and output.

use tracing::trace;

use wob_core::{AgentId, DiscreteAction};

/// Per-agent decision timing and override bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionGate {
    last_eval_secs: f64,

    /// Decisions where a proposed action differed from the applied one.
    pub overrides: u64,
}

impl ActionGate {
    /// A gate whose first `dt` is measured from `start_secs`.
    pub fn new(start_secs: f64) -> Self {
        Self { last_eval_secs: start_secs, overrides: 0 }
    }

    /// Simulated time of the last heuristic evaluation.
    #[inline]
    pub fn last_eval_secs(&self) -> f64 {
        self.last_eval_secs
    }

    /// Seconds since the last evaluation, never negative.
    #[inline]
    pub fn elapsed(&self, now_secs: f64) -> f32 {
        (now_secs - self.last_eval_secs).max(0.0) as f32
    }

    /// Evaluate `heuristic` with the elapsed `dt` and return its action,
    /// whatever `external` proposed.
    pub fn apply<F>(
        &mut self,
        agent:     AgentId,
        external:  Option<DiscreteAction>,
        now_secs:  f64,
        heuristic: F,
    ) -> DiscreteAction
    where
        F: FnOnce(f32) -> DiscreteAction,
    {
        let dt = self.elapsed(now_secs);
        self.last_eval_secs = now_secs;
        let action = heuristic(dt);

        if let Some(proposed) = external {
            if proposed != action {
                self.overrides += 1;
                trace!(%agent, %proposed, %action, "external action overridden");
            }
        }
        action
    }

    /// Restart timing at `now_secs` and clear the override count.
    pub fn reset(&mut self, now_secs: f64) {
        *self = Self::new(now_secs);
    }
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new(0.0)
    }
}
