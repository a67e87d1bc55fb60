//! Plain data row types written by output backends.

/// One agent decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRow {
    pub tick:          u64,
    pub time_secs:     f64,
    pub agent_id:      u32,
    pub position:      [f32; 3],
    pub yaw_deg:       f32,
    /// Action code of the externally proposed action, if one was sent.
    pub proposed:      Option<u8>,
    /// Action code actually applied.
    pub action:        u8,
    pub path_corners:  u32,
    pub goal:          Option<[f32; 3]>,
    pub on_mesh:       bool,
    /// Path tracker outcome (`resampled`, `following`, …), if any.
    pub outcome:       Option<&'static str>,
    pub screen_filled: bool,
}

/// A snapshot of one agent's pose and path state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:          u32,
    pub tick:              u64,
    pub position:          [f32; 3],
    pub yaw_deg:           f32,
    pub path_corners:      u32,
    pub resamples:         u32,
    pub sampling_failures: u32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub time_secs:         f64,
    pub decisions:         u64,
    pub resamples:         u64,
    pub sampling_failures: u64,
    pub off_mesh:          u64,
    pub clipping:          u64,
}

/// One clip transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRow {
    pub tick:             u64,
    pub time_secs:        f64,
    pub agent_id:         u32,
    pub phase:            &'static str,
    pub obstacle_id:      u32,
    pub tag:              String,
    pub position:         [f32; 3],
    pub camera_direction: [f32; 3],
}
