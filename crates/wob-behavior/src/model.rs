//! The `BehaviorModel` trait: the extension point for agent control.

use wob_core::{AgentId, AgentRng, DiscreteAction};
use wob_mobility::{PathTracker, TrackerUpdate};

use crate::SimContext;

/// Pluggable agent behaviour.
///
/// The sim calls [`update`][Self::update] for every agent every tick and
/// [`heuristic`][Self::heuristic] for each agent due a decision.  Per-agent
/// state lives in the agent's [`PathTracker`] and `AgentRng`, not in the
/// model, so one model instance serves the whole population.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysForward;
///
/// impl BehaviorModel for AlwaysForward {
///     fn name(&self) -> &'static str { "AlwaysForward" }
///
///     fn heuristic(&self, _: AgentId, _: &SimContext<'_>, _: &PathTracker, _: f32, _: &mut AgentRng) -> DiscreteAction {
///         DiscreteAction::Forward
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Name used on the config channel and in output.
    fn name(&self) -> &'static str;

    /// Per-tick path upkeep, before any decisions are taken.
    ///
    /// Default: leaves the tracker alone and reports nothing.
    fn update(
        &self,
        _agent:   AgentId,
        _ctx:     &SimContext<'_>,
        _tracker: &mut PathTracker,
        _rng:     &mut AgentRng,
    ) -> Option<TrackerUpdate> {
        None
    }

    /// The hand-coded decision, given `dt` seconds since this agent's
    /// previous one.
    fn heuristic(
        &self,
        agent:   AgentId,
        ctx:     &SimContext<'_>,
        tracker: &PathTracker,
        dt:      f32,
        rng:     &mut AgentRng,
    ) -> DiscreteAction;
}
