//! The `TrackerStore`: one `PathTracker` per agent.

use wob_core::AgentId;

use crate::PathTracker;

/// Path trackers for every agent, indexed by `AgentId`.
pub struct TrackerStore {
    pub trackers: Vec<PathTracker>,
}

impl TrackerStore {
    /// One empty tracker per agent.
    pub fn new(agent_count: usize) -> Self {
        Self { trackers: vec![PathTracker::new(); agent_count] }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> &PathTracker {
        &self.trackers[agent.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut PathTracker {
        &mut self.trackers[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Forget every agent's goal and path.
    pub fn reset_all(&mut self) {
        self.trackers.iter_mut().for_each(PathTracker::reset);
    }
}
