//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `steps.csv`
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `clips.csv`
//!
//! Optional values are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::error::ensure_dir;
use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ClipRow, OutputResult, StepRow, TickSummaryRow};

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    steps:     Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    clips:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the CSV files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        ensure_dir(dir)?;
        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record([
            "tick", "time_secs", "agent_id", "x", "y", "z", "yaw_deg", "proposed", "action",
            "path_corners", "goal_x", "goal_y", "goal_z", "on_mesh", "outcome", "screen_filled",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "agent_id", "tick", "x", "y", "z", "yaw_deg", "path_corners", "resamples", "sampling_failures",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "time_secs", "decisions", "resamples", "sampling_failures", "off_mesh", "clipping",
        ])?;

        let mut clips = Writer::from_path(dir.join("clips.csv"))?;
        clips.write_record([
            "tick", "time_secs", "agent_id", "phase", "obstacle_id", "tag", "x", "y", "z", "camera_x",
            "camera_y", "camera_z",
        ])?;

        Ok(Self {
            steps,
            snapshots,
            summaries,
            clips,
            finished: false,
        })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            let goal = row.goal.map(|g| g.map(|c| c.to_string()));
            let [gx, gy, gz] = goal.unwrap_or_default();
            self.steps.write_record(&[
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.agent_id.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                row.yaw_deg.to_string(),
                opt(row.proposed),
                row.action.to_string(),
                row.path_corners.to_string(),
                gx,
                gy,
                gz,
                (row.on_mesh as u8).to_string(),
                opt(row.outcome),
                (row.screen_filled as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                row.yaw_deg.to_string(),
                row.path_corners.to_string(),
                row.resamples.to_string(),
                row.sampling_failures.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.decisions.to_string(),
            row.resamples.to_string(),
            row.sampling_failures.to_string(),
            row.off_mesh.to_string(),
            row.clipping.to_string(),
        ])?;
        Ok(())
    }

    fn write_clip(&mut self, row: &ClipRow) -> OutputResult<()> {
        let [x, y, z] = row.position;
        let [cx, cy, cz] = row.camera_direction;
        self.clips.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.agent_id.to_string(),
            row.phase.to_owned(),
            row.obstacle_id.to_string(),
            row.tag.clone(),
            x.to_string(),
            y.to_string(),
            z.to_string(),
            cx.to_string(),
            cy.to_string(),
            cz.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.clips.flush()?;
        Ok(())
    }
}
