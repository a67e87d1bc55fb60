//! Dijkstra over the corridor graph.
//!
//! # Cost units
//!
//! All costs are integer **millimetres** (u32).  Endpoints usually lie part
//! way along a corridor, so the search is seeded from both ends of the start
//! corridor (each at its distance from the start point) and finishes at a
//! virtual goal node reachable from both ends of the goal corridor.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wob_core::NodeId;

use crate::mesh::{Snap, WaypointMesh, length_mm};

/// Waypoints to visit, in order, between `start` and `goal`.
///
/// Returns `None` if the two corridors are not connected.
pub(crate) fn shortest_path(mesh: &WaypointMesh, start: &Snap, goal: &Snap) -> Option<Vec<NodeId>> {
    let n = mesh.node_count();
    // Index `n` is the virtual goal node.
    let goal_node = NodeId(n as u32);

    let mut dist = vec![u32::MAX; n + 1];
    let mut prev = vec![NodeId::NONE; n + 1];

    // Min-heap: (cost, node).  Secondary key NodeId gives deterministic ties.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();

    for node in start.endpoints() {
        let cost = length_mm(start.point.distance(mesh.node_pos[node.index()]));
        if cost < dist[node.index()] {
            dist[node.index()] = cost;
            heap.push(Reverse((cost, node)));
        }
    }

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == goal_node {
            return Some(reconstruct(&prev, goal_node));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        if goal.touches(node) {
            let leg = length_mm(mesh.node_pos[node.index()].distance(goal.point));
            let new_cost = cost.saturating_add(leg);
            if new_cost < dist[n] {
                dist[n] = new_cost;
                prev[n] = node;
                heap.push(Reverse((new_cost, goal_node)));
            }
        }

        for link in mesh.out_links(node) {
            let neighbor = mesh.link_to[link.index()];
            let new_cost = cost.saturating_add(mesh.link_cost_mm[link.index()]);
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    None
}

fn reconstruct(prev: &[NodeId], goal_node: NodeId) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut cur = prev[goal_node.index()];
    while cur.is_some() {
        nodes.push(cur);
        cur = prev[cur.index()];
    }
    nodes.reverse();
    nodes
}
