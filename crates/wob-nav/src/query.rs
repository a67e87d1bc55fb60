//! The navigation-mesh query adapter.
//!
//! Everything above this crate (target sampling, path tracking, the sim)
//! talks to the walkable surface only through [`NavMesh`], so an engine
//! binding or a test double can replace [`WaypointMesh`][crate::WaypointMesh]
//! without touching the navigation logic.

use wob_core::Vec3;

use crate::NavPath;

/// Walkability and pathfinding queries against a baked navigation mesh.
pub trait NavMesh {
    /// Nearest walkable point within `max_distance` of `point`, or `None`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// `true` if some walkable point lies within `radius` of `point`.
    fn is_on_mesh(&self, point: Vec3, radius: f32) -> bool {
        self.sample_position(point, radius).is_some()
    }

    /// Corners of the shortest walkable route from `start` to `goal`.
    ///
    /// A path with fewer than two corners means "no route".
    fn compute_path(&self, start: Vec3, goal: Vec3) -> NavPath;

    /// `true` if source geometry changed since the last bake.
    ///
    /// Static meshes never need rebuilding.
    fn needs_rebuild(&self) -> bool {
        false
    }

    /// Re-bake the mesh from its current source geometry.
    fn rebuild(&mut self) {}
}
