//! Unit tests for wob-nav.

#[cfg(test)]
mod helpers {
    use wob_core::{NodeId, Vec3};

    use crate::NavMeshBuilder;

    /// A(0,0,0) - B(0,0,10) - C(10,0,10), an L-shaped corridor.
    pub fn l_corridor() -> NavMeshBuilder {
        let mut b = NavMeshBuilder::new().half_width(1.0);
        let a = b.add_node(Vec3::new(0.0, 0.0, 0.0));
        let m = b.add_node(Vec3::new(0.0, 0.0, 10.0));
        let c = b.add_node(Vec3::new(10.0, 0.0, 10.0));
        b.add_link(a, m);
        b.add_link(m, c);
        b
    }

    pub const A: NodeId = NodeId(0);
    pub const B: NodeId = NodeId(1);
    pub const C: NodeId = NodeId(2);

    pub fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }
}

#[cfg(test)]
mod mesh {
    use wob_core::{NodeId, Vec3};

    use super::helpers::{A, B, C, approx, l_corridor};
    use crate::{NavMesh, NavMeshBuilder, WaypointMesh};

    #[test]
    fn links_are_stored_both_ways() {
        let mesh = l_corridor().build();
        assert_eq!(mesh.node_count(), 3);
        assert_eq!(mesh.link_count(), 4);
        assert_eq!(mesh.out_degree(A), 1);
        assert_eq!(mesh.out_degree(B), 2);
        assert_eq!(mesh.out_degree(C), 1);
        for link in mesh.out_links(B) {
            assert_eq!(mesh.link_from[link.index()], B);
        }
    }

    #[test]
    fn link_cost_is_millimetres() {
        let mesh = l_corridor().build();
        let link = mesh.out_links(A).next().unwrap();
        assert_eq!(mesh.link_to[link.index()], B);
        assert_eq!(mesh.link_cost_mm[link.index()], 10_000);
    }

    #[test]
    fn grid_shape() {
        let mesh = NavMeshBuilder::grid(3, 3, 10.0).build();
        assert_eq!(mesh.node_count(), 9);
        // 12 corridors, two directed links each.
        assert_eq!(mesh.link_count(), 24);
        assert_eq!(mesh.out_degree(NodeId(4)), 4);
        assert_eq!(mesh.node_pos[5], Vec3::new(20.0, 0.0, 10.0));
    }

    #[test]
    fn snap_prefers_nearest_walkable_point_over_nearest_centreline() {
        // Deck overhead at 2.5 m; ground corridor edge 2.0 m to the side.
        let mut b = NavMeshBuilder::new().half_width(1.0);
        let d0 = b.add_node(Vec3::new(0.0, 2.5, -5.0));
        let d1 = b.add_node(Vec3::new(0.0, 2.5, 5.0));
        b.add_link(d0, d1);
        let g0 = b.add_node(Vec3::new(3.0, 0.0, -5.0));
        let g1 = b.add_node(Vec3::new(3.0, 0.0, 5.0));
        b.add_link(g0, g1);
        let mesh = b.build();

        let hit = mesh.sample_position(Vec3::ZERO, 2.2).unwrap();
        assert!(approx(hit, Vec3::new(2.0, 0.0, 0.0)), "{hit}");
        assert!(mesh.is_on_mesh(Vec3::ZERO, 2.2));
        assert_eq!(mesh.sample_position(Vec3::ZERO, 1.9), None);

        // With room for both, the closer surface still wins.
        let hit = mesh.sample_position(Vec3::new(0.0, 2.0, 0.0), 5.0).unwrap();
        assert!(approx(hit, Vec3::new(0.0, 2.5, 0.0)), "{hit}");
    }

    #[test]
    fn empty_mesh_has_no_surface() {
        let mesh = WaypointMesh::empty();
        assert!(mesh.is_empty());
        assert_eq!(mesh.sample_position(Vec3::ZERO, 100.0), None);
        assert!(!mesh.is_on_mesh(Vec3::ZERO, 100.0));
        assert!(mesh.compute_path(Vec3::ZERO, Vec3::FORWARD).is_empty());
    }

    #[test]
    fn point_inside_corridor_keeps_horizontal_position() {
        let mesh = l_corridor().build();
        let p = Vec3::new(0.4, 0.0, 3.0);
        assert_eq!(mesh.sample_position(p, 0.01), Some(p));
        assert!(mesh.is_on_mesh(p, 0.01));
    }

    #[test]
    fn point_outside_corridor_is_pulled_to_edge() {
        let mesh = l_corridor().build();
        let snapped = mesh.sample_position(Vec3::new(3.0, 0.0, 5.0), 5.0).unwrap();
        assert!(approx(snapped, Vec3::new(1.0, 0.0, 5.0)));
        assert_eq!(mesh.sample_position(Vec3::new(3.0, 0.0, 5.0), 1.5), None);
    }

    #[test]
    fn snapped_point_takes_surface_height() {
        let mut b = NavMeshBuilder::new().half_width(1.0);
        let a = b.add_node(Vec3::new(0.0, 1.0, 0.0));
        let c = b.add_node(Vec3::new(0.0, 1.0, 10.0));
        b.add_link(a, c);
        let mesh = b.build();

        let snapped = mesh.sample_position(Vec3::new(0.3, 0.0, 5.0), 2.0).unwrap();
        assert!(approx(snapped, Vec3::new(0.3, 1.0, 5.0)));
        assert_eq!(mesh.sample_position(Vec3::new(0.3, 0.0, 5.0), 0.5), None);
    }

    #[test]
    fn isolated_node_is_a_disc() {
        let mut b = NavMeshBuilder::new().half_width(2.0);
        b.add_node(Vec3::new(5.0, 0.0, 5.0));
        let mesh = b.build();
        assert!(mesh.is_on_mesh(Vec3::new(6.0, 0.0, 5.0), 0.01));
        assert!(!mesh.is_on_mesh(Vec3::new(8.0, 0.0, 5.0), 0.5));
    }

    #[test]
    fn blocked_links_are_not_baked() {
        let mut b = l_corridor();
        assert!(b.set_link_blocked(C, B, true));
        assert!(!b.set_link_blocked(C, B, true));
        let mesh = b.bake();
        assert_eq!(mesh.link_count(), 2);
        assert_eq!(mesh.out_degree(C), 0);
    }

    #[test]
    fn move_unknown_node_fails() {
        let mut b = l_corridor();
        assert!(b.move_node(NodeId(7), Vec3::ZERO).is_err());
        assert!(b.move_node(A, Vec3::new(0.0, 0.0, -5.0)).is_ok());
        assert_eq!(b.node_pos(A), Some(Vec3::new(0.0, 0.0, -5.0)));
    }
}

#[cfg(test)]
mod path {
    use wob_core::Vec3;

    use super::helpers::{approx, l_corridor};
    use crate::{NavMesh, NavMeshBuilder, NavPath};

    #[test]
    fn path_accessors() {
        let path = NavPath::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0), Vec3::new(4.0, 0.0, 3.0)]);
        assert!(path.is_actionable());
        assert_eq!(path.next_corner(), Some(Vec3::new(0.0, 0.0, 3.0)));
        assert_eq!(path.goal(), Some(Vec3::new(4.0, 0.0, 3.0)));
        assert!((path.length() - 7.0).abs() < 1e-5);

        let single = NavPath::new(vec![Vec3::ZERO]);
        assert!(!single.is_actionable());
        assert_eq!(single.next_corner(), None);
        assert!(NavPath::empty().goal().is_none());
    }

    #[test]
    fn same_corridor_is_a_straight_line() {
        let mesh = l_corridor().build();
        let start = Vec3::new(0.0, 0.0, 2.0);
        let goal = Vec3::new(0.5, 0.0, 7.0);
        let path = mesh.compute_path(start, goal);
        assert_eq!(path.corners(), &[start, goal]);
    }

    #[test]
    fn route_turns_at_shared_waypoint() {
        let mesh = l_corridor().build();
        let path = mesh.compute_path(Vec3::new(0.0, 0.0, 2.0), Vec3::new(8.0, 0.0, 10.0));
        assert_eq!(path.len(), 3);
        assert!(approx(path.corners()[0], Vec3::new(0.0, 0.0, 2.0)));
        assert!(approx(path.corners()[1], Vec3::new(0.0, 0.0, 10.0)));
        assert!(approx(path.corners()[2], Vec3::new(8.0, 0.0, 10.0)));
    }

    #[test]
    fn first_corner_is_start_position() {
        let mesh = NavMeshBuilder::grid(4, 4, 5.0).build();
        let start = Vec3::new(0.2, 0.0, 1.0);
        let path = mesh.compute_path(start, Vec3::new(15.0, 0.0, 15.0));
        assert!(path.is_actionable());
        assert!(approx(path.corners()[0], start));
        assert!(approx(path.goal().unwrap(), Vec3::new(15.0, 0.0, 15.0)));
    }

    #[test]
    fn shortest_route_is_chosen() {
        // 3×3 grid; the straight route along z = 0 is shorter than any detour.
        let mesh = NavMeshBuilder::grid(3, 3, 10.0).build();
        let path = mesh.compute_path(Vec3::new(1.0, 0.0, 0.0), Vec3::new(19.0, 0.0, 0.0));
        assert!((path.length() - 18.0).abs() < 1e-3);
        for c in path.corners() {
            assert!(c.z.abs() < 1e-4);
        }
    }

    #[test]
    fn blocked_corridor_forces_detour() {
        let mut b = NavMeshBuilder::grid(3, 2, 10.0);
        // Block the middle of the bottom row (1 to 2).
        b.set_link_blocked(wob_core::NodeId(1), wob_core::NodeId(2), true);
        let mesh = b.build();
        let path = mesh.compute_path(Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0));
        assert!(path.is_actionable());
        // Up to the top row and back down.
        assert!(path.corners().iter().any(|c| (c.z - 10.0).abs() < 1e-4));
        assert!((path.length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn disconnected_islands_have_no_route() {
        let mut b = NavMeshBuilder::new().half_width(1.0);
        let a = b.add_node(Vec3::new(0.0, 0.0, 0.0));
        let c = b.add_node(Vec3::new(0.0, 0.0, 5.0));
        let d = b.add_node(Vec3::new(20.0, 0.0, 0.0));
        let e = b.add_node(Vec3::new(20.0, 0.0, 5.0));
        b.add_link(a, c);
        b.add_link(d, e);
        let mesh = b.build();
        assert!(mesh.compute_path(Vec3::new(0.0, 0.0, 1.0), Vec3::new(20.0, 0.0, 4.0)).is_empty());
    }

    #[test]
    fn off_mesh_goal_has_no_route() {
        let mesh = l_corridor().build();
        assert!(mesh.compute_path(Vec3::new(0.0, 0.0, 1.0), Vec3::new(30.0, 0.0, 30.0)).is_empty());
    }
}

#[cfg(test)]
mod surface {
    use wob_core::Vec3;

    use super::helpers::{A, B, C, l_corridor};
    use crate::{NavMesh, NavSurface};

    #[test]
    fn starts_clean() {
        let surface = NavSurface::new(l_corridor());
        assert!(!surface.needs_rebuild());
        assert_eq!(surface.bake_count(), 1);
    }

    #[test]
    fn edits_apply_only_after_rebuild() {
        let mut surface = NavSurface::new(l_corridor());
        let far = Vec3::new(30.0, 0.0, 0.0);
        let d = surface.add_node(far);
        surface.add_link(A, d);
        assert!(surface.needs_rebuild());
        assert!(!surface.is_on_mesh(far, 0.01));

        surface.rebuild();
        assert!(!surface.needs_rebuild());
        assert!(surface.is_on_mesh(far, 0.01));
        assert_eq!(surface.bake_count(), 2);
    }

    #[test]
    fn unchanged_block_does_not_dirty() {
        let mut surface = NavSurface::new(l_corridor());
        assert!(!surface.set_link_blocked(A, C, true));
        assert!(!surface.needs_rebuild());
        assert!(surface.set_link_blocked(A, B, true));
        assert!(surface.needs_rebuild());
    }

    #[test]
    fn blocking_cuts_the_route() {
        let mut surface = NavSurface::new(l_corridor());
        let start = Vec3::new(0.0, 0.0, 2.0);
        let goal = Vec3::new(8.0, 0.0, 10.0);
        assert!(surface.compute_path(start, goal).is_actionable());

        surface.set_link_blocked(B, C, true);
        surface.rebuild();
        assert!(surface.compute_path(start, goal).is_empty());
    }
}

#[cfg(test)]
mod sampler {
    use wob_core::{AgentId, AgentRng, Pose, Vec3};

    use crate::{
        MAX_REJECTION_SAMPLE_ATTEMPTS, NavError, NavMesh, NavMeshBuilder, SamplingConfig, WaypointMesh,
        sample_target, sample_target_detailed,
    };
    use crate::sampler::segment_point;

    fn open_field() -> WaypointMesh {
        // Corridors of half-width 1 at spacing 2 cover [-1, 9] × [-1, 9].
        NavMeshBuilder::grid(5, 5, 2.0).half_width(1.0).build()
    }

    fn rng(seed: u64) -> AgentRng {
        AgentRng::new(seed, AgentId(0))
    }

    #[test]
    fn defaults() {
        let cfg = SamplingConfig::default();
        assert_eq!(cfg.walk_radius, 5.0);
        assert_eq!(cfg.rejection_radius, 1.0);
        assert_eq!(cfg.max_attempts, MAX_REJECTION_SAMPLE_ATTEMPTS);
        assert_eq!(MAX_REJECTION_SAMPLE_ATTEMPTS, 100);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = SamplingConfig { walk_radius: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = SamplingConfig { max_attempts: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = SamplingConfig { sample_angle: f32::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = SamplingConfig { walk_radius: f32::INFINITY, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = SamplingConfig { rejection_radius: f32::INFINITY, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = SamplingConfig { sample_angle_increment: f32::INFINITY, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn half_angle_widens_monotonically_and_caps() {
        let cfg = SamplingConfig { sample_angle: 30.0, sample_angle_increment: 10.0, ..Default::default() };
        assert_eq!(cfg.half_angle(0), 30.0);
        assert_eq!(cfg.half_angle(1), 40.0);
        assert_eq!(cfg.half_angle(15), 180.0);
        assert_eq!(cfg.half_angle(99), 180.0);
        for i in 1..cfg.max_attempts {
            assert!(cfg.half_angle(i) >= cfg.half_angle(i - 1));
            assert!(cfg.half_angle(i) <= 180.0);
        }
    }

    #[test]
    fn segment_point_local_axes() {
        assert!(segment_point(2.0, 0.0).distance(Vec3::new(0.0, 0.0, 2.0)) < 1e-5);
        assert!(segment_point(2.0, 90.0).distance(Vec3::new(2.0, 0.0, 0.0)) < 1e-5);
        assert!(segment_point(2.0, -90.0).distance(Vec3::new(-2.0, 0.0, 0.0)) < 1e-5);
    }

    #[test]
    fn sample_in_open_field_succeeds_first_try() {
        let mesh = open_field();
        let pose = Pose::from_yaw(Vec3::new(4.0, 0.0, 4.0), 0.0);
        let cfg = SamplingConfig::default();
        let mut rng = rng(3);
        for _ in 0..50 {
            let s = sample_target_detailed(&pose, &cfg, &mesh, &mut rng).unwrap();
            assert_eq!(s.attempts, 1);
            assert!(s.point.distance(s.candidate) <= cfg.rejection_radius + 1e-5);
            assert!(mesh.is_on_mesh(s.point, 1e-3));
            assert!(s.candidate.distance(pose.position) <= cfg.walk_radius + 1e-4);
        }
    }

    #[test]
    fn first_attempt_stays_inside_base_sector() {
        let mesh = open_field();
        let pose = Pose::from_yaw(Vec3::new(4.0, 0.0, 4.0), 90.0);
        let cfg = SamplingConfig::default();
        let mut rng = rng(11);
        for _ in 0..50 {
            let s = sample_target_detailed(&pose, &cfg, &mesh, &mut rng).unwrap();
            let local = s.candidate - pose.position;
            if local.length() > 1e-3 {
                let off = pose.forward.angle_deg(local);
                assert!(off <= cfg.sample_angle + 1e-2, "candidate {off}° off heading");
            }
        }
    }

    #[test]
    fn widening_reaches_area_behind_agent() {
        // Walkable only behind the agent (z ≤ -1); first nine sectors are ≤ 90°.
        let mut b = NavMeshBuilder::new().half_width(1.0);
        for r in 0..5 {
            for c in 0..5 {
                b.add_node(Vec3::new(-4.0 + c as f32 * 2.0, 0.0, -10.0 + r as f32 * 2.0));
            }
        }
        for r in 0..5u32 {
            for c in 0..5u32 {
                let id = wob_core::NodeId(r * 5 + c);
                if c + 1 < 5 {
                    b.add_link(id, wob_core::NodeId(id.0 + 1));
                }
                if r + 1 < 5 {
                    b.add_link(id, wob_core::NodeId(id.0 + 5));
                }
            }
        }
        let mesh = b.build();
        let cfg = SamplingConfig { sample_angle: 0.0, sample_angle_increment: 10.0, ..Default::default() };
        let pose = Pose::default();

        let s = sample_target_detailed(&pose, &cfg, &mesh, &mut rng(5)).unwrap();
        assert!(s.attempts > 10);
        assert!(s.point.z <= -1.0 + 1e-4);
        assert!(mesh.is_on_mesh(s.point, 1e-3));
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mesh = WaypointMesh::empty();
        let err = sample_target(&Pose::default(), &SamplingConfig::default(), &mesh, &mut rng(0)).unwrap_err();
        assert!(matches!(err, NavError::SamplingExhausted { attempts: 100 }));

        let cfg = SamplingConfig { max_attempts: 3, ..Default::default() };
        let err = sample_target(&Pose::default(), &cfg, &mesh, &mut rng(0)).unwrap_err();
        assert!(matches!(err, NavError::SamplingExhausted { attempts: 3 }));
    }

    #[test]
    fn same_seed_same_target() {
        let mesh = open_field();
        let pose = Pose::from_yaw(Vec3::new(4.0, 0.0, 4.0), 45.0);
        let cfg = SamplingConfig::default();
        let a = sample_target(&pose, &cfg, &mesh, &mut rng(99)).unwrap();
        let b = sample_target(&pose, &cfg, &mesh, &mut rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn works_through_trait_object() {
        let mesh = open_field();
        let dyn_mesh: &dyn NavMesh = &mesh;
        let p = sample_target(&Pose::from_yaw(Vec3::new(4.0, 0.0, 4.0), 0.0), &SamplingConfig::default(), dyn_mesh, &mut rng(1));
        assert!(p.is_ok());
    }
}
