//! Unit tests for wob-sim.

use wob_agent::{AgentRngs, AgentSpec, AgentStore, AgentStoreBuilder};
use wob_core::{Pose, SimConfig, Tick, Vec3};
use wob_mobility::TrackerStore;
use wob_nav::{NavMeshBuilder, NavSurface};

use crate::{ClipEvent, SimObserver, StepRecord, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 11 × 11 lattice, 2 m apart: walkable everywhere in `[-1, 21]²`.
fn arena() -> NavSurface {
    NavSurface::new(NavMeshBuilder::grid(11, 11, 2.0))
}

fn agents(seed: u64, n: usize) -> (AgentStore, AgentRngs) {
    let specs = (0..n).map(|i| AgentSpec::at(Pose::from_yaw(Vec3::new(10.0, 0.0, 10.0 - 2.0 * i as f32), 0.0)));
    AgentStoreBuilder::new(seed).spawn_all(specs).build()
}

fn config(total_ticks: u64) -> SimConfig {
    SimConfig { total_ticks, ..SimConfig::default() }
}

#[derive(Default)]
struct Recorder {
    steps:     Vec<StepRecord>,
    clips:     Vec<ClipEvent>,
    summaries: Vec<TickSummary>,
    snapshots: Vec<Tick>,
    ended:     Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_step(&mut self, step: &StepRecord) {
        self.steps.push(step.clone());
    }
    fn on_clip(&mut self, event: &ClipEvent) {
        self.clips.push(event.clone());
    }
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(summary.clone());
    }
    fn on_snapshot(&mut self, tick: Tick, _agents: &AgentStore, _trackers: &TrackerStore) {
        self.snapshots.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── DecisionQueue ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision {
    use wob_core::{AgentId, Tick};

    use crate::DecisionQueue;

    #[test]
    fn drain_is_sorted_and_deduplicated() {
        let mut q = DecisionQueue::new();
        q.push(Tick(3), AgentId(2));
        q.push(Tick(3), AgentId(0));
        q.push(Tick(3), AgentId(2));
        q.push(Tick(7), AgentId(1));
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_tick(), Some(Tick(3)));

        assert_eq!(q.drain_tick(Tick(3)), Some(vec![AgentId(0), AgentId(2)]));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(7)));
        assert_eq!(q.drain_tick(Tick(3)), None);
    }

    #[test]
    fn schedule_all_then_clear() {
        let mut q = DecisionQueue::new();
        q.schedule_all(3, Tick(0));
        assert_eq!(q.len(), 3);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
    }
}

// ── Config channel ────────────────────────────────────────────────────────────

#[cfg(test)]
mod channel {
    use crate::{BugKind, ChannelError, ConfigCommand};

    #[test]
    fn bug_toggle() {
        assert_eq!(
            ConfigCommand::parse("Bugs.BlackScreen.enabled:True"),
            Ok(ConfigCommand::SetBug { bug: BugKind::BlackScreen, enabled: true })
        );
        assert_eq!(
            "Bugs.blackscreen.enabled:false".parse(),
            Ok(ConfigCommand::SetBug { bug: BugKind::BlackScreen, enabled: false })
        );
    }

    #[test]
    fn behaviour_selection() {
        assert_eq!(
            ConfigCommand::parse("NavMeshBehaviour:True"),
            Ok(ConfigCommand::SelectBehavior("NavMeshBehaviour".into()))
        );
        assert_eq!(
            ConfigCommand::parse("NavMeshBehaviour:False"),
            Err(ChannelError::Deselect("NavMeshBehaviour".into()))
        );
    }

    #[test]
    fn rejects_bad_messages() {
        assert!(matches!(ConfigCommand::parse("nonsense"), Err(ChannelError::Malformed(_))));
        assert!(matches!(ConfigCommand::parse(":True"), Err(ChannelError::Malformed(_))));
        assert!(matches!(ConfigCommand::parse("Bugs.BlackScreen:True"), Err(ChannelError::Malformed(_))));
        assert_eq!(
            ConfigCommand::parse("Bugs.Fog.enabled:True"),
            Err(ChannelError::UnknownBug("Fog".into()))
        );
        assert_eq!(
            ConfigCommand::parse("Bugs.BlackScreen.enabled:yes"),
            Err(ChannelError::InvalidFlag("yes".into()))
        );
    }

    #[test]
    fn display_is_wire_format() {
        let cmd = ConfigCommand::SetBug { bug: BugKind::BlackScreen, enabled: false };
        assert_eq!(cmd.to_string(), "Bugs.BlackScreen.enabled:False");
        assert_eq!(ConfigCommand::parse(&cmd.to_string()), Ok(cmd));
    }
}

// ── Bugs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bugs {
    use crate::{BugKind, BugRegistry, Rgb};

    #[test]
    fn set_reports_changes() {
        let mut bugs = BugRegistry::new();
        assert!(bugs.enable(BugKind::BlackScreen));
        assert!(!bugs.enable(BugKind::BlackScreen));
        assert!(bugs.is_enabled(BugKind::BlackScreen));
        assert!(bugs.disable(BugKind::BlackScreen));
        assert!(!bugs.disable(BugKind::BlackScreen));
    }

    #[test]
    fn black_screen_fills_observation_and_mask() {
        let mut bugs = BugRegistry::new();
        assert_eq!(bugs.screen_fill(), None);
        bugs.enable(BugKind::BlackScreen);
        let fill = bugs.screen_fill().unwrap();
        assert_eq!(fill.observation, Rgb::BLACK);
        assert_eq!(fill.mask, Rgb(255, 0, 255));
        assert_eq!(fill.mask.to_string(), "#ff00ff");
    }

    #[test]
    fn screen_colour_is_configurable() {
        let mut bugs = BugRegistry::new().with_screen_color(Rgb(10, 20, 30));
        bugs.enable(BugKind::BlackScreen);
        assert_eq!(bugs.screen_fill().unwrap().observation, Rgb(10, 20, 30));
    }
}

// ── ClipWatcher ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod watch {
    use wob_core::{AgentId, Pose, Tick, Vec3};

    use crate::{ClipWatcher, ContactPhase};

    /// A watcher with one `Cube1` box spanning z ∈ [4, 6] in front of the
    /// origin, plus an unwatched wall.
    fn watcher() -> ClipWatcher {
        let mut w = ClipWatcher::new(0.3);
        w.add_obstacle("Cube1", Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 2.0, 6.0));
        w.add_obstacle("Wall", Vec3::new(-1.0, 0.0, -6.0), Vec3::new(1.0, 2.0, -4.0));
        w.ensure_agents(1);
        w.set_active(true);
        w
    }

    #[test]
    fn enter_stay_exit() {
        let mut w = watcher();
        let a = AgentId(0);
        let touching = Pose::from_yaw(Vec3::new(0.0, 1.0, 3.8), 0.0);

        let e = w.check(a, &touching, Tick(0), 0.0);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].phase, ContactPhase::Enter);
        assert_eq!(e[0].tag, "Cube1");
        assert_eq!(e[0].camera_direction, touching.forward);
        assert!(w.colliding[0]);

        let e = w.check(a, &touching, Tick(1), 0.02);
        assert_eq!(e[0].phase, ContactPhase::Stay);

        let clear = Pose::from_yaw(Vec3::new(0.0, 1.0, 0.0), 0.0);
        let e = w.check(a, &clear, Tick(2), 0.04);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].phase, ContactPhase::Exit);
        assert!(!w.colliding[0]);
    }

    #[test]
    fn unwatched_tags_are_ignored() {
        let mut w = watcher();
        let facing_wall = Pose::from_yaw(Vec3::new(0.0, 1.0, -3.8), 180.0);
        assert!(w.check(AgentId(0), &facing_wall, Tick(0), 0.0).is_empty());

        w.watch_tag("Wall");
        assert_eq!(w.check(AgentId(0), &facing_wall, Tick(1), 0.02).len(), 1);
    }

    #[test]
    fn inactive_watcher_is_silent_and_forgets() {
        let mut w = watcher();
        let touching = Pose::from_yaw(Vec3::new(0.0, 1.0, 3.8), 0.0);
        w.check(AgentId(0), &touching, Tick(0), 0.0);
        w.set_active(false);
        assert!(!w.colliding[0]);
        assert!(w.check(AgentId(0), &touching, Tick(1), 0.02).is_empty());

        w.set_active(true);
        let e = w.check(AgentId(0), &touching, Tick(2), 0.04);
        assert_eq!(e[0].phase, ContactPhase::Enter);
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim {
    use wob_agent::AgentStoreBuilder;
    use wob_behavior::{NavAgentConfig, NoopBehavior};
    use wob_core::{AgentId, DiscreteAction, NodeId, SimConfig, Tick, Vec3};

    use super::{Recorder, agents, arena, config};
    use crate::{BugKind, ClipWatcher, ContactPhase, NoopObserver, SimBuilder, SimError};

    #[test]
    fn run_stops_at_end_tick() {
        let (store, rngs) = agents(1, 2);
        let cfg = SimConfig { output_interval_ticks: 5, ..config(20) };
        let mut sim = SimBuilder::new(cfg, store, rngs, arena()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.clock.current_tick, Tick(20));
        assert_eq!(rec.ended, Some(Tick(20)));
        assert_eq!(rec.summaries.len(), 20);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(5), Tick(10), Tick(15)]);
        assert_eq!(rec.steps.len(), 40);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let (store, rngs) = agents(7, 3);
            let mut sim = SimBuilder::new(config(300), store, rngs, arena()).build().unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            (rec.steps, sim.agents.position.clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn navmesh_agents_walk() {
        let (store, rngs) = agents(3, 1);
        let start = store.position[0];
        let nav = NavAgentConfig { mistake_prob: 0.0, ..NavAgentConfig::default() };
        let mut sim = SimBuilder::new(config(300), store, rngs, arena()).nav_config(nav).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(sim.agents.position[0].distance(start) > 0.1);
        assert!(rec.steps.iter().any(|s| s.action == DiscreteAction::Forward));
        assert!(sim.trackers.get(AgentId(0)).resamples >= 1);
    }

    #[test]
    fn decision_period_repeats_last_action() {
        let (store, rngs) = agents(1, 2);
        let cfg = SimConfig { decision_period: 5, ..config(10) };
        let mut sim = SimBuilder::new(cfg, store, rngs, arena()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let ticks: Vec<_> = rec.steps.iter().map(|s| (s.tick, s.agent)).collect();
        assert_eq!(ticks, vec![
            (Tick(0), AgentId(0)),
            (Tick(0), AgentId(1)),
            (Tick(5), AgentId(0)),
            (Tick(5), AgentId(1)),
        ]);
        assert_eq!(rec.summaries[3].decisions, 0);
    }

    #[test]
    fn proposed_action_is_recorded_not_applied() {
        let (store, rngs) = agents(1, 1);
        let start = store.position[0];
        let mut sim = SimBuilder::new(config(10), store, rngs, arena()).behavior(NoopBehavior).build().unwrap();
        sim.propose_action(AgentId(0), DiscreteAction::Forward).unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();

        assert_eq!(rec.steps[0].proposed, Some(DiscreteAction::Forward));
        assert_eq!(rec.steps[0].action, DiscreteAction::None);
        assert_eq!(sim.gates[0].overrides, 1);
        assert_eq!(sim.agents.position[0], start);

        assert!(matches!(
            sim.propose_action(AgentId(5), DiscreteAction::Forward),
            Err(SimError::AgentNotFound(AgentId(5)))
        ));
    }

    #[test]
    fn bug_toggle_applies_next_tick() {
        let (store, rngs) = agents(1, 1);
        let mut sim = SimBuilder::new(config(10), store, rngs, arena()).build().unwrap();
        sim.send_config("Bugs.BlackScreen.enabled:True").unwrap();
        assert!(!sim.bugs.is_enabled(BugKind::BlackScreen));

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(sim.bugs.is_enabled(BugKind::BlackScreen));
        assert!(rec.steps[0].screen.is_some());
    }

    #[test]
    fn selecting_a_behaviour_resets_agents() {
        let (store, rngs) = agents(1, 1);
        let cfg = SimConfig { decision_period: 50, ..config(100) };
        let mut sim = SimBuilder::new(cfg, store, rngs, arena()).behavior(NoopBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(3, &mut rec).unwrap();
        assert_eq!(rec.steps.len(), 1);
        assert_eq!(sim.trackers.get(AgentId(0)).target(), None);

        sim.send_config("NavMeshBehaviour:True").unwrap();
        sim.run_ticks(1, &mut rec).unwrap();
        assert_eq!(sim.behavior.name(), "NavMeshBehaviour");
        // Everyone decides again on the switch tick.
        assert_eq!(rec.steps.len(), 2);
        assert_eq!(rec.steps[1].tick, Tick(3));
        assert!(sim.trackers.get(AgentId(0)).target().is_some());
    }

    #[test]
    fn unknown_behaviour_is_rejected_up_front() {
        let (store, rngs) = agents(1, 1);
        let mut sim = SimBuilder::new(config(10), store, rngs, arena()).build().unwrap();
        assert!(matches!(sim.send_config("FlyingBehaviour:True"), Err(SimError::Behavior(_))));
        assert!(matches!(sim.send_config("garbage"), Err(SimError::Channel(_))));
        assert!(sim.pending.is_empty());
    }

    #[test]
    fn teleport_drops_path() {
        let (store, rngs) = agents(1, 1);
        let mut sim = SimBuilder::new(config(10), store, rngs, arena()).build().unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.trackers.get(AgentId(0)).path().is_empty());

        let to = Vec3::new(2.0, 0.0, 2.0);
        sim.teleport(AgentId(0), to, Vec3::RIGHT).unwrap();
        assert_eq!(sim.agents.position[0], to);
        assert_eq!(sim.agents.forward[0], Vec3::RIGHT);
        assert!(sim.trackers.get(AgentId(0)).path().is_empty());

        assert!(matches!(
            sim.teleport(AgentId(9), to, Vec3::RIGHT),
            Err(SimError::AgentNotFound(AgentId(9)))
        ));
    }

    #[test]
    fn clip_events_reach_the_observer() {
        let (store, rngs) = agents(1, 1);
        // Agent 0 stands at (10, 0, 10) facing +z.
        let mut watcher = ClipWatcher::default();
        watcher.add_obstacle("Cube2", Vec3::new(9.0, -1.0, 10.2), Vec3::new(11.0, 1.0, 11.0));
        watcher.set_active(true);
        let mut sim = SimBuilder::new(config(10), store, rngs, arena())
            .behavior(NoopBehavior)
            .watcher(watcher)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(2, &mut rec).unwrap();

        let phases: Vec<_> = rec.clips.iter().map(|c| c.phase).collect();
        assert_eq!(phases, vec![ContactPhase::Enter, ContactPhase::Stay]);
        assert_eq!(rec.summaries[1].clipping, 1);
    }

    #[test]
    fn mesh_edits_rebuild_once_next_tick() {
        let (store, rngs) = agents(1, 1);
        let mut sim = SimBuilder::new(config(10), store, rngs, arena()).build().unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.mesh.bake_count(), 1);

        assert!(sim.mesh.set_link_blocked(NodeId(0), NodeId(1), true));
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.mesh.bake_count(), 2);
    }

    #[test]
    fn mismatched_rngs_are_rejected() {
        let (store, _) = agents(1, 2);
        let (_, rngs) = AgentStoreBuilder::new(1).build();
        let err = SimBuilder::new(config(10), store, rngs, arena()).build().err().unwrap();
        assert!(matches!(err, SimError::AgentCountMismatch { expected: 2, got: 0, .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (store, rngs) = agents(1, 1);
        let cfg = SimConfig { decision_period: 0, ..config(10) };
        let err = SimBuilder::new(cfg, store, rngs, arena()).build().err().unwrap();
        assert!(matches!(err, SimError::Core(_)));
    }
}
