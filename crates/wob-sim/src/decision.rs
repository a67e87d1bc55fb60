//! `DecisionQueue`: sparse per-tick decision scheduling.
//!
//! With `decision_period > 1` most agents are between decisions on most
//! ticks.  Each agent registers the tick of its next decision; each tick the
//! sim drains only the agents due then.

use std::collections::BTreeMap;

use wob_core::{AgentId, Tick};

/// Maps simulation ticks to the agents that must decide at that tick.
#[derive(Default)]
pub struct DecisionQueue {
    inner: BTreeMap<Tick, Vec<AgentId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl DecisionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule agents `0..agent_count` to decide at `tick`.
    pub fn schedule_all(&mut self, agent_count: usize, tick: Tick) {
        for i in 0..agent_count as u32 {
            self.push(tick, AgentId(i));
        }
    }

    pub fn push(&mut self, tick: Tick, agent: AgentId) {
        self.inner.entry(tick).or_default().push(agent);
        self.total += 1;
    }

    /// Remove and return the agents due at exactly `tick`, ascending and
    /// without duplicates.
    ///
    /// Returns `None` if nobody is due.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<AgentId>> {
        let mut agents = self.inner.remove(&tick)?;
        self.total -= agents.len();
        agents.sort_unstable();
        agents.dedup();
        Some(agents)
    }

    /// The earliest tick with at least one queued agent.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
