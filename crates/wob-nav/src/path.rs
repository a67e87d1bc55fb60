//! Computed navigation paths.

use wob_core::Vec3;

/// An ordered list of corners from the agent's position (index 0) to the
/// goal (last index).
///
/// Paths are replaced wholesale on every recomputation and never patched in
/// place, so the type exposes read-only accessors only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavPath {
    corners: Vec<Vec3>,
}

impl NavPath {
    /// A path with no corners ("no route" / "no path yet").
    pub fn empty() -> Self {
        Self { corners: Vec::new() }
    }

    pub fn new(corners: Vec<Vec3>) -> Self {
        Self { corners }
    }

    #[inline]
    pub fn corners(&self) -> &[Vec3] {
        &self.corners
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// `true` if there is a next waypoint to steer towards (≥ 2 corners).
    #[inline]
    pub fn is_actionable(&self) -> bool {
        self.corners.len() >= 2
    }

    /// The immediate next waypoint (corner index 1).
    #[inline]
    pub fn next_corner(&self) -> Option<Vec3> {
        self.corners.get(1).copied()
    }

    /// The final corner.
    #[inline]
    pub fn goal(&self) -> Option<Vec3> {
        self.corners.last().copied()
    }

    /// Total polyline length through all corners.
    pub fn length(&self) -> f32 {
        self.corners
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
