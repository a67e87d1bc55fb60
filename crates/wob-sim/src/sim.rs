//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use wob_agent::{AgentRngs, AgentStore};
use wob_behavior::{ActionGate, BehaviorModel, NavAgentConfig, SimContext, behavior_from_name};
use wob_core::{AgentId, Clock, DiscreteAction, Pose, SimClock, SimConfig, Tick, Vec3};
use wob_mobility::{TrackerOutcome, TrackerStore, TrackerUpdate, advance};
use wob_nav::NavMesh;

use crate::{
    BugRegistry, ClipWatcher, ConfigCommand, DecisionQueue, SimError, SimObserver, SimResult, StepRecord,
    TickSummary,
};

/// The main simulation runner.
///
/// Each tick runs these phases in order:
///
/// 1. **Commands**: apply config-channel commands queued since last tick.
/// 2. **Rebuild**: re-bake the mesh if its geometry changed.
/// 3. **Path upkeep**: `BehaviorModel::update` for every agent.
/// 4. **Decisions**: agents due this tick get a gated heuristic action;
///    everyone else keeps repeating their last one.
/// 5. **Kinematics**: every agent's current action is applied for one tick.
/// 6. **Clip watch**: near-plane probes against watched obstacles.
///
/// Agents are always visited in ascending `AgentId` order, so a run is fully
/// determined by its seed, its inputs, and the commands sent to it.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: NavMesh> {
    pub config: SimConfig,
    pub clock:  SimClock,

    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub trackers: TrackerStore,

    /// Per-agent action gates, indexed by `AgentId`.
    pub gates: Vec<ActionGate>,

    /// Action each agent is currently repeating.
    pub current_actions: Vec<DiscreteAction>,

    pub behavior: Box<dyn BehaviorModel>,

    /// Configuration handed to behaviours selected over the config channel.
    pub nav_config: NavAgentConfig,

    pub mesh: M,

    pub decisions: DecisionQueue,

    pub bugs: BugRegistry,

    pub watcher: ClipWatcher,

    /// Externally proposed actions awaiting each agent's next decision.
    pub(crate) proposals: Vec<Option<DiscreteAction>>,

    /// Commands received since the last tick started.
    pub(crate) pending: Vec<ConfigCommand>,
}

impl<M: NavMesh> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.count,
            ticks = self.config.total_ticks,
            behaviour = self.behavior.name(),
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(final_tick = %self.clock.current_tick, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Queue a config-channel message for the start of the next tick.
    ///
    /// The message is parsed and checked now; a bad message is rejected
    /// without disturbing the queue.
    pub fn send_config(&mut self, message: &str) -> SimResult<ConfigCommand> {
        let command = ConfigCommand::parse(message)?;
        self.queue_command(command.clone())?;
        Ok(command)
    }

    /// Queue an already-parsed command for the start of the next tick.
    pub fn queue_command(&mut self, command: ConfigCommand) -> SimResult<()> {
        if let ConfigCommand::SelectBehavior(name) = &command {
            behavior_from_name(name, &self.nav_config)?;
        }
        debug!(%command, "config command queued");
        self.pending.push(command);
        Ok(())
    }

    /// Propose an action for `agent`'s next decision.
    ///
    /// The proposal is recorded and compared, but the applied action always
    /// comes from the behaviour's heuristic.
    pub fn propose_action(&mut self, agent: AgentId, action: DiscreteAction) -> SimResult<()> {
        let slot = self.proposals.get_mut(agent.index()).ok_or(SimError::AgentNotFound(agent))?;
        *slot = Some(action);
        Ok(())
    }

    /// Move `agent` to `position` facing `forward` and drop its path.
    pub fn teleport(&mut self, agent: AgentId, position: Vec3, forward: Vec3) -> SimResult<()> {
        if !self.agents.contains(agent) {
            return Err(SimError::AgentNotFound(agent));
        }
        let pose = Pose::new(position, forward);
        self.agents.set_pose(agent, pose);
        self.trackers.get_mut(agent).clear_path();
        debug!(%agent, %pose, "teleported");
        Ok(())
    }

    /// Simulated seconds at the start of the current tick.
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now, observer)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0 && now.0 % self.config.output_interval_ticks == 0 {
            observer.on_snapshot(now, &self.agents, &self.trackers);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let now_secs = self.clock.secs_at(now);
        let mut summary = TickSummary { tick: now, ..Default::default() };

        // ── Phase 1: config commands ──────────────────────────────────────
        self.apply_pending(now)?;

        // ── Phase 2: mesh rebuild ─────────────────────────────────────────
        if self.mesh.needs_rebuild() {
            self.mesh.rebuild();
        }

        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents    = &self.agents;
        let behavior  = &self.behavior;
        let trackers  = &mut self.trackers;
        let rngs      = &mut self.rngs;
        let gates     = &mut self.gates;
        let proposals = &mut self.proposals;
        let actions   = &mut self.current_actions;
        let ctx = SimContext::new(now, now_secs, agents, &self.mesh);

        // ── Phase 3: path upkeep ──────────────────────────────────────────
        let updates: Vec<Option<TrackerUpdate>> = agents
            .agent_ids()
            .map(|agent| behavior.update(agent, &ctx, trackers.get_mut(agent), rngs.get_mut(agent)))
            .collect();
        for update in updates.iter().flatten() {
            match update.outcome {
                TrackerOutcome::Resampled      => summary.resamples += 1,
                TrackerOutcome::SamplingFailed => summary.sampling_failures += 1,
                TrackerOutcome::OffMesh        => summary.off_mesh += 1,
                TrackerOutcome::Following      => {}
            }
        }

        // ── Phase 4: gated decisions ──────────────────────────────────────
        let screen = self.bugs.screen_fill();
        let next_decision = now + self.config.decision_period as u64;
        for agent in self.decisions.drain_tick(now).unwrap_or_default() {
            if !agents.contains(agent) {
                continue;
            }
            let i = agent.index();
            let proposed = proposals[i].take();
            let tracker = trackers.get(agent);
            let rng = rngs.get_mut(agent);
            let action = gates[i].apply(agent, proposed, now_secs, |dt| {
                behavior.heuristic(agent, &ctx, tracker, dt, rng)
            });
            actions[i] = action;
            self.decisions.push(next_decision, agent);
            summary.decisions += 1;

            let pose = agents.pose(agent);
            observer.on_step(&StepRecord {
                tick: now,
                time_secs: now_secs,
                agent,
                position: pose.position,
                forward: pose.forward,
                proposed,
                action,
                path_corners: tracker.path().len(),
                goal: tracker.path().goal(),
                on_mesh: ctx.mesh.is_on_mesh(pose.position, agents.radius[i]),
                outcome: updates[i].map(|u| u.outcome),
                screen,
            });
        }

        // ── Phase 5: kinematics ───────────────────────────────────────────
        let dt = self.config.tick_duration_secs;
        for agent in self.agents.agent_ids().collect::<Vec<_>>() {
            advance(&mut self.agents, agent, self.current_actions[agent.index()], dt);
        }

        // ── Phase 6: clip watch ───────────────────────────────────────────
        if self.watcher.is_active() {
            let after_secs = self.clock.secs_at(now + 1);
            for agent in self.agents.agent_ids() {
                let pose = self.agents.pose(agent);
                for event in self.watcher.check(agent, &pose, now, after_secs) {
                    observer.on_clip(&event);
                }
            }
            summary.clipping = self.watcher.colliding.iter().filter(|&&c| c).count();
        }

        Ok(summary)
    }

    fn apply_pending(&mut self, now: Tick) -> SimResult<()> {
        for command in std::mem::take(&mut self.pending) {
            match command {
                ConfigCommand::SetBug { bug, enabled } => {
                    self.bugs.set(bug, enabled);
                }
                ConfigCommand::SelectBehavior(name) => {
                    self.behavior = behavior_from_name(&name, &self.nav_config)?;
                    self.reset_agents(now);
                    info!(behaviour = self.behavior.name(), "behaviour selected");
                }
            }
        }
        Ok(())
    }

    /// Forget every agent's goal, path, timing, and pending decision, and
    /// have everyone decide afresh at `now`.
    fn reset_agents(&mut self, now: Tick) {
        let now_secs = self.clock.secs_at(now);
        self.trackers.reset_all();
        self.gates.iter_mut().for_each(|g| g.reset(now_secs));
        self.current_actions.fill(DiscreteAction::None);
        self.proposals.fill(None);
        self.decisions.clear();
        self.decisions.schedule_all(self.agents.count, now);
    }
}
