//! `NavMeshBehavior`: wander between sampled targets on the navigation mesh.

use wob_core::{AgentId, AgentRng, DiscreteAction};
use wob_mobility::{PathTracker, TrackerUpdate};
use wob_nav::SamplingConfig;

use crate::{BehaviorError, BehaviorModel, BehaviorResult, SimContext, compute_heuristic_action};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavAgentConfig {
    pub sampling: SamplingConfig,

    /// Probability in `[0, 1]` of replacing a decision with a random one.
    pub mistake_prob: f32,
}

impl Default for NavAgentConfig {
    fn default() -> Self {
        Self { sampling: SamplingConfig::default(), mistake_prob: 0.1 }
    }
}

impl NavAgentConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        self.sampling.validate()?;
        if !(0.0..=1.0).contains(&self.mistake_prob) {
            return Err(BehaviorError::Config(format!(
                "mistake_prob must be in [0, 1], got {}",
                self.mistake_prob
            )));
        }
        Ok(())
    }
}

/// Samples a target ahead of the agent, follows the mesh path to it, and
/// draws a new one on arrival.
pub struct NavMeshBehavior {
    pub config: NavAgentConfig,
}

impl NavMeshBehavior {
    pub const NAME: &'static str = "NavMeshBehaviour";

    pub fn new(config: NavAgentConfig) -> Self {
        Self { config }
    }
}

impl BehaviorModel for NavMeshBehavior {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn update(
        &self,
        agent:   AgentId,
        ctx:     &SimContext<'_>,
        tracker: &mut PathTracker,
        rng:     &mut AgentRng,
    ) -> Option<TrackerUpdate> {
        let pose = ctx.agents.pose(agent);
        let radius = ctx.agents.radius[agent.index()];
        Some(tracker.update(&pose, radius, &self.config.sampling, ctx.mesh, rng))
    }

    fn heuristic(
        &self,
        agent:   AgentId,
        ctx:     &SimContext<'_>,
        tracker: &PathTracker,
        dt:      f32,
        rng:     &mut AgentRng,
    ) -> DiscreteAction {
        compute_heuristic_action(
            &ctx.agents.pose(agent),
            tracker.path(),
            ctx.agents.angular_speed[agent.index()],
            dt,
            self.config.mistake_prob,
            rng,
        )
    }
}
