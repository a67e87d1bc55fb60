//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use wob_agent::AgentStore;
use wob_core::{SimConfig, Tick, Vec3};
use wob_mobility::TrackerStore;
use wob_sim::{ClipEvent, SimObserver, StepRecord, TickSummary};

use crate::row::{AgentSnapshotRow, ClipRow, StepRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records decisions, snapshots, tick summaries and
/// clip events to any [`OutputWriter`] backend.
///
/// Decisions are buffered per tick and written as one batch at the end of
/// the tick.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: f64,
    steps:              Vec<StepRow>,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for simulated
    /// time conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs as f64,
            steps:              Vec::new(),
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn secs(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_duration_secs
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step(&mut self, step: &StepRecord) {
        self.steps.push(StepRow {
            tick:          step.tick.0,
            time_secs:     step.time_secs,
            agent_id:      step.agent.0,
            position:      step.position.to_array(),
            yaw_deg:       Vec3::FORWARD.signed_angle_deg(step.forward, Vec3::UP),
            proposed:      step.proposed.map(|a| a.index()),
            action:        step.action.index(),
            path_corners:  step.path_corners as u32,
            goal:          step.goal.map(|g| g.to_array()),
            on_mesh:       step.on_mesh,
            outcome:       step.outcome.map(|o| o.as_str()),
            screen_filled: step.screen.is_some(),
        });
    }

    fn on_clip(&mut self, event: &ClipEvent) {
        let row = ClipRow {
            tick:             event.tick.0,
            time_secs:        event.time_secs,
            agent_id:         event.agent.0,
            phase:            event.phase.as_str(),
            obstacle_id:      event.obstacle.0,
            tag:              event.tag.clone(),
            position:         event.position.to_array(),
            camera_direction: event.camera_direction.to_array(),
        };
        let result = self.writer.write_clip(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if !self.steps.is_empty() {
            let steps = std::mem::take(&mut self.steps);
            let result = self.writer.write_steps(&steps);
            self.store_err(result);
        }

        let row = TickSummaryRow {
            tick:              summary.tick.0,
            time_secs:         self.secs(summary.tick),
            decisions:         summary.decisions as u64,
            resamples:         summary.resamples as u64,
            sampling_failures: summary.sampling_failures as u64,
            off_mesh:          summary.off_mesh as u64,
            clipping:          summary.clipping as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, trackers: &TrackerStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .map(|agent| {
                let pose = agents.pose(agent);
                let tracker = trackers.get(agent);
                AgentSnapshotRow {
                    agent_id:          agent.0,
                    tick:              tick.0,
                    position:          pose.position.to_array(),
                    yaw_deg:           pose.yaw_deg(),
                    path_corners:      tracker.path().len() as u32,
                    resamples:         tracker.resamples,
                    sampling_failures: tracker.sampling_failures,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
