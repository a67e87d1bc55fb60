//! Fluent builder for constructing a [`Sim`].

use wob_agent::{AgentRngs, AgentStore};
use wob_behavior::{ActionGate, BehaviorModel, NavAgentConfig, NavMeshBehavior};
use wob_core::{DiscreteAction, SimConfig, Tick};
use wob_mobility::TrackerStore;
use wob_nav::NavMesh;

use crate::{BugRegistry, ClipWatcher, DecisionQueue, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration, decision period
/// - [`AgentStore`] + [`AgentRngs`] from [`wob_agent::AgentStoreBuilder`]
/// - `M: NavMesh`, usually a [`wob_nav::NavSurface`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.nav_config(c)`     | `NavAgentConfig::default()`              |
/// | `.behavior(b)`       | `NavMeshBehavior` over `nav_config`      |
/// | `.watcher(w)`        | inactive `ClipWatcher::default()`        |
/// | `.bugs(b)`           | no bugs enabled                          |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(seed).spawn_all(specs).build();
/// let mut sim = SimBuilder::new(config, store, rngs, NavSurface::new(mesh))
///     .nav_config(nav)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: NavMesh> {
    config:     SimConfig,
    agents:     AgentStore,
    rngs:       AgentRngs,
    mesh:       M,
    nav_config: NavAgentConfig,
    behavior:   Option<Box<dyn BehaviorModel>>,
    watcher:    Option<ClipWatcher>,
    bugs:       Option<BugRegistry>,
}

impl<M: NavMesh> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs, mesh: M) -> Self {
        Self {
            config,
            agents,
            rngs,
            mesh,
            nav_config: NavAgentConfig::default(),
            behavior:   None,
            watcher:    None,
            bugs:       None,
        }
    }

    /// Sampling radii and mistake probability for the navmesh behaviour,
    /// including one selected later over the config channel.
    pub fn nav_config(mut self, config: NavAgentConfig) -> Self {
        self.nav_config = config;
        self
    }

    pub fn behavior<B: BehaviorModel>(self, behavior: B) -> Self {
        self.behavior_boxed(Box::new(behavior))
    }

    pub fn behavior_boxed(mut self, behavior: Box<dyn BehaviorModel>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn watcher(mut self, watcher: ClipWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    pub fn bugs(mut self, bugs: BugRegistry) -> Self {
        self.bugs = Some(bugs);
        self
    }

    /// Validate inputs, schedule every agent's first decision at tick 0, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        let agent_count = self.agents.count;

        self.config.validate()?;
        self.nav_config.validate()?;
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent rngs",
            });
        }

        let behavior = self
            .behavior
            .unwrap_or_else(|| Box::new(NavMeshBehavior::new(self.nav_config.clone())));

        let mut watcher = self.watcher.unwrap_or_default();
        watcher.ensure_agents(agent_count);

        let mut decisions = DecisionQueue::new();
        decisions.schedule_all(agent_count, Tick(0));

        Ok(Sim {
            clock:           self.config.make_clock(),
            config:          self.config,
            agents:          self.agents,
            rngs:            self.rngs,
            trackers:        TrackerStore::new(agent_count),
            gates:           vec![ActionGate::new(0.0); agent_count],
            current_actions: vec![DiscreteAction::None; agent_count],
            behavior,
            nav_config:      self.nav_config,
            mesh:            self.mesh,
            decisions,
            bugs:            self.bugs.unwrap_or_default(),
            watcher,
            proposals:       vec![None; agent_count],
            pending:         Vec::new(),
        })
    }
}
