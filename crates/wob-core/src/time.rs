//! Fixed-step time.
//!
//! A run advances one [`Tick`] per simulated frame.  Seconds are derived, never
//! accumulated: `secs = tick * tick_duration_secs`, so long runs do not drift.
//! Anything that needs "now" in seconds asks a [`Clock`].

use std::fmt;
use std::ops::{Add, Sub};

use crate::{WobError, WobResult};

/// Frame counter since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Add<u64> for Tick {
    type Output = Tick;

    #[inline]
    fn add(self, frames: u64) -> Tick {
        Tick(self.0.saturating_add(frames))
    }
}

/// Frames from `rhs` to `self`; zero if `rhs` is later.
impl Sub for Tick {
    type Output = u64;

    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

pub trait Clock {
    /// Simulated seconds since tick 0.
    fn now_secs(&self) -> f64;
}

#[derive(Clone, Debug)]
pub struct SimClock {
    pub tick_duration_secs: f32,
    pub current_tick:       Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::default() }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * f64::from(self.tick_duration_secs)
    }

    /// Smallest tick count covering `secs` of simulated time.
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if self.tick_duration_secs <= 0.0 || secs <= 0.0 {
            return 0;
        }
        (f64::from(secs) / f64::from(self.tick_duration_secs)).ceil() as u64
    }
}

impl Clock for SimClock {
    #[inline]
    fn now_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }
}

// ── Run configuration ────────────────────────────────────────────────────────

/// Run-wide settings shared by every agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Frame delta.  Default 0.02 s (50 Hz).
    pub tick_duration_secs: f32,

    pub total_ticks: u64,

    /// Same seed, same inputs, same run.
    pub seed: u64,

    /// Ticks between heuristic decisions.  Agents repeat their last action
    /// in between.
    pub decision_period: u32,

    /// Agent snapshot cadence in ticks; 0 turns snapshots off.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// First tick that is not simulated.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    pub fn validate(&self) -> WobResult<()> {
        if !(self.tick_duration_secs.is_finite() && self.tick_duration_secs > 0.0) {
            return Err(WobError::Config(format!(
                "tick_duration_secs must be a positive number, got {}",
                self.tick_duration_secs
            )));
        }
        if self.decision_period == 0 {
            return Err(WobError::Config("decision_period must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    0.02,
            total_ticks:           3_000,
            seed:                  0,
            decision_period:       1,
            output_interval_ticks: 50,
        }
    }
}
