//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `steps`, `agent_snapshots`, `tick_summaries` and `clips`.
//! Optional values are stored as `NULL`.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::error::ensure_dir;
use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ClipRow, OutputResult, StepRow, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        ensure_dir(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS steps (
                 tick          INTEGER NOT NULL,
                 time_secs     REAL    NOT NULL,
                 agent_id      INTEGER NOT NULL,
                 x             REAL    NOT NULL,
                 y             REAL    NOT NULL,
                 z             REAL    NOT NULL,
                 yaw_deg       REAL    NOT NULL,
                 proposed      INTEGER,
                 action        INTEGER NOT NULL,
                 path_corners  INTEGER NOT NULL,
                 goal_x        REAL,
                 goal_y        REAL,
                 goal_z        REAL,
                 on_mesh       INTEGER NOT NULL,
                 outcome       TEXT,
                 screen_filled INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id          INTEGER NOT NULL,
                 tick              INTEGER NOT NULL,
                 x                 REAL    NOT NULL,
                 y                 REAL    NOT NULL,
                 z                 REAL    NOT NULL,
                 yaw_deg           REAL    NOT NULL,
                 path_corners      INTEGER NOT NULL,
                 resamples         INTEGER NOT NULL,
                 sampling_failures INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick              INTEGER PRIMARY KEY,
                 time_secs         REAL    NOT NULL,
                 decisions         INTEGER NOT NULL,
                 resamples         INTEGER NOT NULL,
                 sampling_failures INTEGER NOT NULL,
                 off_mesh          INTEGER NOT NULL,
                 clipping          INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS clips (
                 tick        INTEGER NOT NULL,
                 time_secs   REAL    NOT NULL,
                 agent_id    INTEGER NOT NULL,
                 phase       TEXT    NOT NULL,
                 obstacle_id INTEGER NOT NULL,
                 tag         TEXT    NOT NULL,
                 x           REAL    NOT NULL,
                 y           REAL    NOT NULL,
                 z           REAL    NOT NULL,
                 camera_x    REAL    NOT NULL,
                 camera_y    REAL    NOT NULL,
                 camera_z    REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO steps \
                 (tick, time_secs, agent_id, x, y, z, yaw_deg, proposed, action, path_corners, \
                  goal_x, goal_y, goal_z, on_mesh, outcome, screen_filled) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )?;
            for row in rows {
                let [x, y, z] = row.position;
                let goal = |i: usize| row.goal.map(|g| g[i] as f64);
                stmt.execute(params![
                    row.tick as i64,
                    row.time_secs,
                    row.agent_id,
                    x as f64,
                    y as f64,
                    z as f64,
                    row.yaw_deg as f64,
                    row.proposed,
                    row.action,
                    row.path_corners,
                    goal(0),
                    goal(1),
                    goal(2),
                    row.on_mesh as i64,
                    row.outcome,
                    row.screen_filled as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, tick, x, y, z, yaw_deg, path_corners, resamples, sampling_failures) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                let [x, y, z] = row.position;
                stmt.execute(params![
                    row.agent_id,
                    row.tick as i64,
                    x as f64,
                    y as f64,
                    z as f64,
                    row.yaw_deg as f64,
                    row.path_corners,
                    row.resamples,
                    row.sampling_failures,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, time_secs, decisions, resamples, sampling_failures, off_mesh, clipping) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.tick as i64,
                row.time_secs,
                row.decisions as i64,
                row.resamples as i64,
                row.sampling_failures as i64,
                row.off_mesh as i64,
                row.clipping as i64,
            ],
        )?;
        Ok(())
    }

    fn write_clip(&mut self, row: &ClipRow) -> OutputResult<()> {
        let [x, y, z] = row.position;
        let [cx, cy, cz] = row.camera_direction;
        self.conn.execute(
            "INSERT INTO clips \
             (tick, time_secs, agent_id, phase, obstacle_id, tag, x, y, z, camera_x, camera_y, camera_z) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                row.tick as i64,
                row.time_secs,
                row.agent_id,
                row.phase,
                row.obstacle_id,
                row.tag,
                x as f64,
                y as f64,
                z as f64,
                cx as f64,
                cy as f64,
                cz as f64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
