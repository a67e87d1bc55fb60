//! A no-op behaviour model: agents stand still.

use wob_core::{AgentId, AgentRng, DiscreteAction};
use wob_mobility::PathTracker;

use crate::{BehaviorModel, SimContext};

/// A [`BehaviorModel`] that always decides [`DiscreteAction::None`] and never
/// touches the path tracker.
///
/// Useful as a placeholder in tests or for parking agents while another
/// subsystem (teleport, clip watching) is exercised.
pub struct NoopBehavior;

impl NoopBehavior {
    pub const NAME: &'static str = "NoopBehaviour";
}

impl BehaviorModel for NoopBehavior {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn heuristic(
        &self,
        _agent:   AgentId,
        _ctx:     &SimContext<'_>,
        _tracker: &PathTracker,
        _dt:      f32,
        _rng:     &mut AgentRng,
    ) -> DiscreteAction {
        DiscreteAction::None
    }
}
