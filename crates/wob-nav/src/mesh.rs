//! Corridor navigation mesh and its builder.
//!
//! # Data layout
//!
//! The walkable surface is a set of **corridors**: straight links between
//! waypoint nodes, each walkable out to `half_width` on either side
//! (measured horizontally).  Connectivity uses **Compressed Sparse Row
//! (CSR)** format.  Given a `NodeId n`, its outgoing links occupy:
//!
//! ```text
//! link_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every corridor is stored as two directed links.  Link costs are integer
//! millimetres so Dijkstra comparisons stay exact and deterministic.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds one entry per undirected corridor segment.
//! Isolated nodes get a zero-length segment so they still count as walkable
//! discs of radius `half_width`.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use tracing::debug;

use wob_core::{LinkId, NodeId, Vec3};

use crate::query::NavMesh;
use crate::{NavError, NavPath, NavResult, router};

/// Consecutive corners closer than this are merged.
const CORNER_EPSILON: f32 = 1e-4;

// ── R-tree segment entry ──────────────────────────────────────────────────────

#[derive(Clone)]
struct SegmentEntry {
    a:    [f32; 3],
    b:    [f32; 3],
    from: NodeId,
    to:   NodeId,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a, self.b)
    }
}

impl PointDistance for SegmentEntry {
    /// Squared Euclidean distance from `point` to the closest point on the
    /// segment.
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let p = Vec3::from_array(*point);
        let c = closest_point_on_segment(p, Vec3::from_array(self.a), Vec3::from_array(self.b));
        let d = p - c;
        d.dot(d)
    }
}

/// Closest point to `p` on the segment `a..b`.
pub(crate) fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// A point projected onto the walkable surface, with the corridor it lies in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Snap {
    pub point: Vec3,
    pub from:  NodeId,
    pub to:    NodeId,
}

impl Snap {
    /// The corridor's end nodes (one entry for an isolated node).
    pub fn endpoints(&self) -> impl Iterator<Item = NodeId> {
        let second = (self.to != self.from).then_some(self.to);
        std::iter::once(self.from).chain(second)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    fn same_corridor(&self, other: &Snap) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

// ── WaypointMesh ──────────────────────────────────────────────────────────────

/// Baked corridor mesh in CSR format plus a segment R-tree.
///
/// All graph fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`NavMeshBuilder`].
pub struct WaypointMesh {
    // ── Node data ─────────────────────────────────────────────────────────
    /// World position of each waypoint.  Indexed by `NodeId`.
    pub node_pos: Vec<Vec3>,

    // ── CSR link adjacency ────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    pub link_from: Vec<NodeId>,
    pub link_to:   Vec<NodeId>,

    /// Link length in millimetres.  Used as Dijkstra cost.
    pub link_cost_mm: Vec<u32>,

    // ── Surface shape ─────────────────────────────────────────────────────
    /// Horizontal half-width of every corridor.
    pub half_width: f32,

    /// How far `compute_path` will look to project its endpoints onto the
    /// surface.
    pub snap_distance: f32,

    spatial_idx: RTree<SegmentEntry>,
}

impl WaypointMesh {
    /// A mesh with no walkable surface.  Every query against it fails.
    pub fn empty() -> Self {
        NavMeshBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Iterator over the `LinkId`s of all outgoing links from `node`.
    #[inline]
    pub fn out_links(&self, node: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| LinkId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Project `p` onto the nearest walkable point if it lies within
    /// `max_distance`.
    ///
    /// Inside a corridor's half-width the point keeps its horizontal position
    /// and takes the corridor's height.  Outside, it is pulled in to the
    /// corridor edge.  Corridors are visited in centreline order; a snapped
    /// point is never more than `half_width` closer than its centreline, so
    /// the scan stops once centrelines are that much farther than the best
    /// snap so far.
    pub(crate) fn snap(&self, p: Vec3, max_distance: f32) -> Option<Snap> {
        let mut best: Option<(f32, Snap)> = None;
        for (entry, d2) in self.spatial_idx.nearest_neighbor_iter_with_distance_2(&p.to_array()) {
            let bound = best.map_or(max_distance, |(d, _)| d.min(max_distance));
            if d2.sqrt() - self.half_width > bound {
                break;
            }
            let point = self.project(p, entry);
            let d = point.distance(p);
            if d <= max_distance && best.is_none_or(|(b, _)| d < b) {
                best = Some((d, Snap { point, from: entry.from, to: entry.to }));
            }
        }
        best.map(|(_, snap)| snap)
    }

    fn project(&self, p: Vec3, entry: &SegmentEntry) -> Vec3 {
        let c = closest_point_on_segment(p, Vec3::from_array(entry.a), Vec3::from_array(entry.b));
        let lateral = (p - c).horizontal();
        if lateral.length() <= self.half_width {
            p.with_y(c.y)
        } else {
            c + lateral.normalized() * self.half_width
        }
    }
}

impl NavMesh for WaypointMesh {
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        self.snap(point, max_distance).map(|s| s.point)
    }

    fn compute_path(&self, start: Vec3, goal: Vec3) -> NavPath {
        let (Some(s), Some(g)) = (self.snap(start, self.snap_distance), self.snap(goal, self.snap_distance)) else {
            return NavPath::empty();
        };

        let mut corners = vec![s.point];
        if !s.same_corridor(&g) {
            let Some(nodes) = router::shortest_path(self, &s, &g) else {
                return NavPath::empty();
            };
            corners.extend(nodes.into_iter().map(|n| self.node_pos[n.index()]));
        }
        corners.push(g.point);
        corners.dedup_by(|b, a| a.distance(*b) < CORNER_EPSILON);
        NavPath::new(corners)
    }
}

// ── NavMeshBuilder ────────────────────────────────────────────────────────────

/// Construct a [`WaypointMesh`] incrementally, then call [`build`](Self::build)
/// or [`bake`](Self::bake).
///
/// # Example
///
/// ```
/// use wob_core::Vec3;
/// use wob_nav::NavMeshBuilder;
///
/// let mut b = NavMeshBuilder::new().half_width(1.0);
/// let a = b.add_node(Vec3::new(0.0, 0.0, 0.0));
/// let c = b.add_node(Vec3::new(0.0, 0.0, 10.0));
/// b.add_link(a, c);
/// let mesh = b.build();
/// assert_eq!(mesh.node_count(), 2);
/// assert_eq!(mesh.link_count(), 2); // both directions
/// ```
#[derive(Clone, Debug)]
pub struct NavMeshBuilder {
    nodes:         Vec<Vec3>,
    links:         Vec<RawLink>,
    half_width:    f32,
    snap_distance: f32,
}

#[derive(Clone, Debug)]
struct RawLink {
    a:       NodeId,
    b:       NodeId,
    blocked: bool,
}

impl NavMeshBuilder {
    pub const DEFAULT_HALF_WIDTH:    f32 = 1.0;
    pub const DEFAULT_SNAP_DISTANCE: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            nodes:         Vec::new(),
            links:         Vec::new(),
            half_width:    Self::DEFAULT_HALF_WIDTH,
            snap_distance: Self::DEFAULT_SNAP_DISTANCE,
        }
    }

    /// A `cols × rows` lattice of nodes `spacing` apart on the y = 0 plane,
    /// starting at the origin and growing along +x and +z, with links between
    /// 4-neighbours.
    pub fn grid(cols: u32, rows: u32, spacing: f32) -> Self {
        let mut b = Self::new();
        for r in 0..rows {
            for c in 0..cols {
                b.add_node(Vec3::new(c as f32 * spacing, 0.0, r as f32 * spacing));
            }
        }
        for r in 0..rows {
            for c in 0..cols {
                let id = NodeId(r * cols + c);
                if c + 1 < cols {
                    b.add_link(id, NodeId(id.0 + 1));
                }
                if r + 1 < rows {
                    b.add_link(id, NodeId(id.0 + cols));
                }
            }
        }
        b
    }

    /// Horizontal half-width of every corridor.
    pub fn half_width(mut self, half_width: f32) -> Self {
        self.half_width = half_width.max(0.0);
        self
    }

    /// Projection tolerance used by `compute_path` for its endpoints.
    pub fn snap_distance(mut self, snap_distance: f32) -> Self {
        self.snap_distance = snap_distance.max(0.0);
        self
    }

    /// Add a waypoint and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Vec3) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a two-way corridor between `a` and `b`.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        self.links.push(RawLink { a, b, blocked: false });
    }

    /// Block or unblock every corridor joining `a` and `b`.
    ///
    /// Returns `true` if at least one corridor changed state.
    pub fn set_link_blocked(&mut self, a: NodeId, b: NodeId, blocked: bool) -> bool {
        let mut changed = false;
        for link in &mut self.links {
            let joins = (link.a == a && link.b == b) || (link.a == b && link.b == a);
            if joins && link.blocked != blocked {
                link.blocked = blocked;
                changed = true;
            }
        }
        changed
    }

    /// Move an existing waypoint.
    pub fn move_node(&mut self, id: NodeId, pos: Vec3) -> NavResult<()> {
        let slot = self.nodes.get_mut(id.index()).ok_or(NavError::NodeNotFound(id))?;
        *slot = pos;
        Ok(())
    }

    pub fn node_pos(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Produce a [`WaypointMesh`] from the current geometry, leaving the
    /// builder intact for further edits.
    ///
    /// Blocked corridors and links referencing unknown nodes are left out.
    pub fn bake(&self) -> WaypointMesh {
        let node_count = self.nodes.len();
        let valid = |id: NodeId| id.index() < node_count;

        let open: Vec<&RawLink> = self
            .links
            .iter()
            .filter(|l| !l.blocked && valid(l.a) && valid(l.b) && l.a != l.b)
            .collect();

        // Two directed links per corridor, sorted by source for CSR.
        let mut directed: Vec<(NodeId, NodeId)> = open
            .iter()
            .flat_map(|l| [(l.a, l.b), (l.b, l.a)])
            .collect();
        directed.sort_unstable_by_key(|&(from, to)| (from.0, to.0));

        let link_from: Vec<NodeId> = directed.iter().map(|&(f, _)| f).collect();
        let link_to:   Vec<NodeId> = directed.iter().map(|&(_, t)| t).collect();
        let link_cost_mm: Vec<u32> = directed
            .iter()
            .map(|&(f, t)| length_mm(self.nodes[f.index()].distance(self.nodes[t.index()])))
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _) in &directed {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, link_to.len());

        // One R-tree entry per corridor, plus a point entry per isolated node.
        let mut entries: Vec<SegmentEntry> = open
            .iter()
            .map(|l| SegmentEntry {
                a:    self.nodes[l.a.index()].to_array(),
                b:    self.nodes[l.b.index()].to_array(),
                from: l.a,
                to:   l.b,
            })
            .collect();
        for (i, &pos) in self.nodes.iter().enumerate() {
            let id = NodeId(i as u32);
            if node_out_start[i] == node_out_start[i + 1] {
                entries.push(SegmentEntry { a: pos.to_array(), b: pos.to_array(), from: id, to: id });
            }
        }
        let spatial_idx = RTree::bulk_load(entries);

        debug!(nodes = node_count, links = link_to.len(), "baked navigation mesh");

        WaypointMesh {
            node_pos: self.nodes.clone(),
            node_out_start,
            link_from,
            link_to,
            link_cost_mm,
            half_width: self.half_width,
            snap_distance: self.snap_distance,
            spatial_idx,
        }
    }

    /// Consume the builder and produce a [`WaypointMesh`].
    pub fn build(self) -> WaypointMesh {
        self.bake()
    }
}

impl Default for NavMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Length in whole millimetres, at least 1 so every hop costs something.
#[inline]
pub(crate) fn length_mm(metres: f32) -> u32 {
    ((metres * 1000.0).round() as u32).max(1)
}
