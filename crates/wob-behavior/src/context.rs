//! Read-only simulation state passed to every behaviour callback.

use wob_agent::AgentStore;
use wob_core::Tick;
use wob_nav::NavMesh;

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// Built by `wob-sim` once per tick, after any pending mesh rebuild, so every
/// agent sees the same baked mesh.
pub struct SimContext<'a> {
    pub tick: Tick,

    /// Simulated seconds at the start of `tick`.
    pub now_secs: f64,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    pub mesh: &'a dyn NavMesh,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(tick: Tick, now_secs: f64, agents: &'a AgentStore, mesh: &'a dyn NavMesh) -> Self {
        Self { tick, now_secs, agents, mesh }
    }
}
