//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live in a separate struct so the sim can hand out `&AgentStore` to a
//! behaviour while also passing `&mut AgentRng` for the same agent.

use wob_core::{AgentId, AgentRng, Pose, Vec3};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to allow
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements and is indexed by
/// `AgentId`:
///
/// ```ignore
/// let p = store.position[agent.index()];
/// ```
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// World position of the agent's base.
    pub position: Vec<Vec3>,

    /// Horizontal unit heading.
    pub forward: Vec<Vec3>,

    /// Turn rate in degrees per second.
    pub angular_speed: Vec<f32>,

    /// Forward speed in metres per second.
    pub move_speed: Vec<f32>,

    /// Agent radius.  Doubles as the arrival tolerance for the current goal
    /// and as the snap distance for the on-mesh check.
    pub radius: Vec<f32>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// `true` if `agent` indexes a stored agent.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Current world transform of `agent`.
    #[inline]
    pub fn pose(&self, agent: AgentId) -> Pose {
        Pose {
            position: self.position[agent.index()],
            forward:  self.forward[agent.index()],
        }
    }

    /// Overwrite the transform of `agent`.
    #[inline]
    pub fn set_pose(&mut self, agent: AgentId, pose: Pose) {
        self.position[agent.index()] = pose.position;
        self.forward[agent.index()]  = pose.forward;
    }

    /// Package-private constructor used by `AgentStoreBuilder`.
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count:         0,
            position:      Vec::with_capacity(count),
            forward:       Vec::with_capacity(count),
            angular_speed: Vec::with_capacity(count),
            move_speed:    Vec::with_capacity(count),
            radius:        Vec::with_capacity(count),
        }
    }

    pub(crate) fn push(&mut self, pose: Pose, angular_speed: f32, move_speed: f32, radius: f32) {
        self.position.push(pose.position);
        self.forward.push(pose.forward);
        self.angular_speed.push(angular_speed);
        self.move_speed.push(move_speed);
        self.radius.push(radius);
        self.count += 1;
    }
}
