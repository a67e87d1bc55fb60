//! Per-tick tracker results.

use std::fmt;

/// Whether the tracker currently holds a followable path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathState {
    /// No path with a next waypoint (no goal yet, off mesh, or no route).
    NoGoal,
    /// The path has at least two corners.
    HasPath,
}

/// What happened during one `PathTracker::update`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackerOutcome {
    /// The agent was off the mesh; the path was discarded.
    OffMesh,
    /// A new goal was drawn and a path computed to it.
    Resampled,
    /// A new goal was needed but sampling was exhausted; the previous goal
    /// (if any) was kept.
    SamplingFailed,
    /// The existing goal was kept and the path recomputed.
    Following,
}

impl TrackerOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackerOutcome::OffMesh        => "off_mesh",
            TrackerOutcome::Resampled      => "resampled",
            TrackerOutcome::SamplingFailed => "sampling_failed",
            TrackerOutcome::Following      => "following",
        }
    }
}

impl fmt::Display for TrackerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackerUpdate {
    pub state:   PathState,
    pub outcome: TrackerOutcome,
}
