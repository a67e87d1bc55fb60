//! Simulation observer trait for progress reporting and data collection.

use wob_agent::AgentStore;
use wob_core::{AgentId, DiscreteAction, Tick, Vec3};
use wob_mobility::{TrackerOutcome, TrackerStore};

use crate::{ClipEvent, ScreenFill};

/// One agent's decision, with the state it was taken in.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub tick:      Tick,
    pub time_secs: f64,
    pub agent:     AgentId,
    pub position:  Vec3,
    pub forward:   Vec3,

    /// Action proposed from outside, if any.  Never applied.
    pub proposed: Option<DiscreteAction>,
    /// Action the gate applied.
    pub action: DiscreteAction,

    /// Number of corners in the agent's current path.
    pub path_corners: usize,
    pub goal:         Option<Vec3>,
    pub on_mesh:      bool,

    /// This tick's path-tracker result, if the behaviour tracks paths.
    pub outcome: Option<TrackerOutcome>,

    /// Set while a fill bug covers the observation.
    pub screen: Option<ScreenFill>,
}

/// Per-tick counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:              Tick,
    /// Agents that took a decision this tick.
    pub decisions:         usize,
    pub resamples:         usize,
    pub sampling_failures: usize,
    pub off_mesh:          usize,
    /// Agents whose near plane is inside watched geometry after this tick.
    pub clipping:          usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} decisions", summary.tick, summary.decisions);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per decision, in ascending `AgentId` order.
    fn on_step(&mut self, _step: &StepRecord) {}

    /// Called for every clip transition while the clip watcher is active.
    fn on_clip(&mut self, _event: &ClipEvent) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to agent and tracker state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _trackers: &TrackerStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
