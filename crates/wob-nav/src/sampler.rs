//! Target sampling: rejection sampling over a widening sector ahead of the
//! agent.
//!
//! Attempt `i` draws a distance in `[0, walk_radius]` and an angle in
//! `[-w_i, w_i]` where `w_i = min(sample_angle + i * sample_angle_increment,
//! 180)`.  The candidate is placed in the agent's local XZ plane and moved to
//! world space through the agent's pose.  The first candidate with a walkable
//! point within `rejection_radius` wins, and that walkable point is returned.

use tracing::{trace, warn};

use wob_core::{AgentRng, Pose, Vec3};

use crate::query::NavMesh;
use crate::{NavError, NavResult};

/// Hard cap on rejection-sampling attempts per target.
pub const MAX_REJECTION_SAMPLE_ATTEMPTS: u32 = 100;

/// Widest possible half-angle of the sampling sector, in degrees.
const MAX_HALF_ANGLE: f32 = 180.0;

// ── SamplingConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Maximum distance of a candidate from the agent.
    pub walk_radius: f32,

    /// How far from a candidate the walkable point may lie.
    pub rejection_radius: f32,

    /// Half-angle of the sector on the first attempt, in degrees.
    pub sample_angle: f32,

    /// Widening per failed attempt, in degrees.
    pub sample_angle_increment: f32,

    pub max_attempts: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            walk_radius:            5.0,
            rejection_radius:       1.0,
            sample_angle:           30.0,
            sample_angle_increment: 10.0,
            max_attempts:           MAX_REJECTION_SAMPLE_ATTEMPTS,
        }
    }
}

impl SamplingConfig {
    /// Sector half-angle used on attempt `attempt` (0-based).
    #[inline]
    pub fn half_angle(&self, attempt: u32) -> f32 {
        (self.sample_angle + attempt as f32 * self.sample_angle_increment).min(MAX_HALF_ANGLE)
    }

    pub fn validate(&self) -> NavResult<()> {
        let invalid = |msg: &str| Err(NavError::InvalidSampling(msg.to_owned()));
        let usable = |v: f32| v.is_finite() && v >= 0.0;
        if !usable(self.walk_radius) {
            return invalid("walk_radius must be finite and non-negative");
        }
        if !usable(self.rejection_radius) {
            return invalid("rejection_radius must be finite and non-negative");
        }
        if !usable(self.sample_angle) || !usable(self.sample_angle_increment) {
            return invalid("sample angles must be finite and non-negative");
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1");
        }
        Ok(())
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

/// Point at `distance` along a heading `angle_deg` off local +z, in the local
/// XZ plane.
#[inline]
pub fn segment_point(distance: f32, angle_deg: f32) -> Vec3 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec3::new(sin, 0.0, cos) * distance
}

/// A successful sample together with the candidate that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSample {
    /// Walkable point returned to the caller.
    pub point: Vec3,
    /// Raw world-space candidate the point was snapped from.
    pub candidate: Vec3,
    /// Number of attempts used, including the successful one.
    pub attempts: u32,
}

/// Draw a walkable target near `pose`.
///
/// Returns [`NavError::SamplingExhausted`] after `config.max_attempts`
/// rejected candidates.
pub fn sample_target<M: NavMesh + ?Sized>(
    pose: &Pose,
    config: &SamplingConfig,
    mesh: &M,
    rng: &mut AgentRng,
) -> NavResult<Vec3> {
    sample_target_detailed(pose, config, mesh, rng).map(|s| s.point)
}

/// Like [`sample_target`] but also reports the winning candidate and the
/// attempt count.
pub fn sample_target_detailed<M: NavMesh + ?Sized>(
    pose: &Pose,
    config: &SamplingConfig,
    mesh: &M,
    rng: &mut AgentRng,
) -> NavResult<TargetSample> {
    for attempt in 0..config.max_attempts {
        let half = config.half_angle(attempt);
        let distance: f32 = rng.gen_range(0.0..=config.walk_radius);
        let angle: f32 = rng.gen_range(-half..=half);

        let candidate = pose.transform_point(segment_point(distance, angle));
        if let Some(point) = mesh.sample_position(candidate, config.rejection_radius) {
            trace!(attempts = attempt + 1, %point, "target sampled");
            return Ok(TargetSample { point, candidate, attempts: attempt + 1 });
        }
    }

    warn!(attempts = config.max_attempts, %pose, "target sampling exhausted");
    Err(NavError::SamplingExhausted { attempts: config.max_attempts })
}
