//! The path tracker: one agent's current goal and path.

use tracing::{debug, trace};

use wob_core::{AgentRng, Pose, Vec3};
use wob_nav::{NavMesh, NavPath, SamplingConfig, sample_target};

use crate::{PathState, TrackerOutcome, TrackerUpdate};

/// Current goal and path for one agent.
///
/// The path is recomputed wholesale on every update and is never edited in
/// place.  A new goal is drawn only when the path is empty or the agent has
/// come within its radius of the path's final corner.
#[derive(Clone, Debug, Default)]
pub struct PathTracker {
    path:   NavPath,
    target: Option<Vec3>,

    /// Goals drawn so far.
    pub resamples: u32,
    /// Updates where a goal was needed but sampling was exhausted.
    pub sampling_failures: u32,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn path(&self) -> &NavPath {
        &self.path
    }

    /// The goal the path is computed towards, if one has been drawn.
    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    #[inline]
    pub fn state(&self) -> PathState {
        if self.path.is_actionable() { PathState::HasPath } else { PathState::NoGoal }
    }

    /// `true` if the path is empty or `position` is closer than `radius` to
    /// the path's final corner.
    pub fn needs_resample(&self, position: Vec3, radius: f32) -> bool {
        match self.path.goal() {
            None       => true,
            Some(goal) => position.distance(goal) < radius,
        }
    }

    /// Advance the tracker by one tick.
    ///
    /// `radius` is both the on-mesh tolerance for the agent's position and
    /// the arrival tolerance for the goal.
    pub fn update<M: NavMesh + ?Sized>(
        &mut self,
        pose:     &Pose,
        radius:   f32,
        sampling: &SamplingConfig,
        mesh:     &M,
        rng:      &mut AgentRng,
    ) -> TrackerUpdate {
        if !mesh.is_on_mesh(pose.position, radius) {
            trace!(position = %pose.position, "agent off mesh, path discarded");
            self.path = NavPath::empty();
            return TrackerUpdate { state: PathState::NoGoal, outcome: TrackerOutcome::OffMesh };
        }

        let mut outcome = TrackerOutcome::Following;
        if self.needs_resample(pose.position, radius) {
            match sample_target(pose, sampling, mesh, rng) {
                Ok(target) => {
                    debug!(%target, "new navigation target");
                    self.target = Some(target);
                    self.resamples += 1;
                    outcome = TrackerOutcome::Resampled;
                }
                Err(err) => {
                    debug!(%err, target = ?self.target, "no new target, keeping previous goal");
                    self.sampling_failures += 1;
                    outcome = TrackerOutcome::SamplingFailed;
                }
            }
        }

        self.path = match self.target {
            Some(target) => mesh.compute_path(pose.position, target),
            None         => NavPath::empty(),
        };

        TrackerUpdate { state: self.state(), outcome }
    }

    /// Drop the current path.  With no path left, the next update draws a
    /// fresh goal around wherever the agent is then.
    pub fn clear_path(&mut self) {
        self.path = NavPath::empty();
    }

    /// Forget both path and goal.
    pub fn reset(&mut self) {
        self.path = NavPath::empty();
        self.target = None;
    }
}
