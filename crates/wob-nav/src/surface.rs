//! Editable navigation surface with dirty-flag rebuilds.
//!
//! Geometry edits only touch the source [`NavMeshBuilder`] and raise a dirty
//! flag.  Queries keep answering from the last baked [`WaypointMesh`] until
//! the host calls [`NavMesh::rebuild`], which it does once per tick at most
//! and only while [`NavMesh::needs_rebuild`] reports `true`.

use tracing::debug;

use wob_core::{NodeId, Vec3};

use crate::query::NavMesh;
use crate::{NavMeshBuilder, NavPath, NavResult, WaypointMesh};

pub struct NavSurface {
    source: NavMeshBuilder,
    baked:  WaypointMesh,
    dirty:  bool,
    bakes:  u64,
}

impl NavSurface {
    /// Bake `source` once and start clean.
    pub fn new(source: NavMeshBuilder) -> Self {
        let baked = source.bake();
        Self { source, baked, dirty: false, bakes: 1 }
    }

    pub fn source(&self) -> &NavMeshBuilder {
        &self.source
    }

    /// The mesh queries are currently answered from.
    pub fn baked(&self) -> &WaypointMesh {
        &self.baked
    }

    /// Number of bakes performed, including the initial one.
    pub fn bake_count(&self) -> u64 {
        self.bakes
    }

    pub fn add_node(&mut self, pos: Vec3) -> NodeId {
        self.dirty = true;
        self.source.add_node(pos)
    }

    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        self.dirty = true;
        self.source.add_link(a, b);
    }

    pub fn move_node(&mut self, id: NodeId, pos: Vec3) -> NavResult<()> {
        self.source.move_node(id, pos)?;
        self.dirty = true;
        Ok(())
    }

    /// Block or unblock the corridor between `a` and `b`.  Marks the surface
    /// dirty only if something changed.
    pub fn set_link_blocked(&mut self, a: NodeId, b: NodeId, blocked: bool) -> bool {
        let changed = self.source.set_link_blocked(a, b, blocked);
        self.dirty |= changed;
        changed
    }
}

impl NavMesh for NavSurface {
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        self.baked.sample_position(point, max_distance)
    }

    fn compute_path(&self, start: Vec3, goal: Vec3) -> NavPath {
        self.baked.compute_path(start, goal)
    }

    fn needs_rebuild(&self) -> bool {
        self.dirty
    }

    fn rebuild(&mut self) {
        self.baked = self.source.bake();
        self.dirty = false;
        self.bakes += 1;
        debug!(bakes = self.bakes, "navigation surface rebuilt");
    }
}
