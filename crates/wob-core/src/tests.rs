//! Unit tests for wob-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, LinkId, NodeId};

    #[test]
    fn from_index_checks_range() {
        assert_eq!(AgentId::from_index(42), Some(AgentId(42)));
        assert_eq!(AgentId(42).index(), 42);
        assert_eq!(NodeId::from_index(u32::MAX as usize), None);
    }

    #[test]
    fn none_sentinel() {
        assert!(!LinkId::NONE.is_some());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(NodeId::NONE.to_string(), "node#none");
    }
}

#[cfg(test)]
mod geom {
    use crate::{Pose, Vec3};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn approx_v(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn signed_angle_right_is_positive() {
        let a = Vec3::FORWARD.signed_angle_deg(Vec3::RIGHT, Vec3::UP);
        assert!(approx(a, 90.0), "got {a}");
        let b = Vec3::FORWARD.signed_angle_deg(-Vec3::RIGHT, Vec3::UP);
        assert!(approx(b, -90.0), "got {b}");
    }

    #[test]
    fn signed_angle_opposite_is_plus_180() {
        let a = Vec3::FORWARD.signed_angle_deg(-Vec3::FORWARD, Vec3::UP);
        assert!(approx(a, 180.0), "got {a}");
    }

    #[test]
    fn zero_vector_angle_is_zero() {
        assert_eq!(Vec3::FORWARD.signed_angle_deg(Vec3::ZERO, Vec3::UP), 0.0);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn rotate_yaw_clockwise() {
        assert!(approx_v(Vec3::FORWARD.rotate_yaw(90.0), Vec3::RIGHT));
        assert!(approx_v(Vec3::FORWARD.rotate_yaw(-90.0), -Vec3::RIGHT));
    }

    #[test]
    fn pose_transform_point() {
        // Facing +x: local forward (0,0,2) lands at +x, local right at -z.
        let pose = Pose::from_yaw(Vec3::new(1.0, 0.0, 1.0), 90.0);
        assert!(approx_v(pose.transform_point(Vec3::new(0.0, 0.0, 2.0)), Vec3::new(3.0, 0.0, 1.0)));
        assert!(approx_v(pose.transform_point(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn pose_new_flattens_heading() {
        let pose = Pose::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 2.0));
        assert!(approx_v(pose.forward, Vec3::FORWARD));
        let degenerate = Pose::new(Vec3::ZERO, Vec3::UP);
        assert_eq!(degenerate.forward, Vec3::FORWARD);
    }

    #[test]
    fn yaw_roundtrip() {
        let pose = Pose::from_yaw(Vec3::ZERO, -45.0);
        assert!(approx(pose.yaw_deg(), -45.0));
    }

    #[test]
    fn parse_vec3() {
        let v: Vec3 = " 1.5, -2 ,3".parse().unwrap();
        assert_eq!(v, Vec3::new(1.5, -2.0, 3.0));
        assert!("1,2".parse::<Vec3>().is_err());
        assert!("1,b,3".parse::<Vec3>().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3) - Tick(5), 0);
        assert_eq!(Tick(u64::MAX) + 1, Tick(u64::MAX));
    }

    #[test]
    fn clock_now_secs() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now_secs(), 1.0);
        assert_eq!(clock.ticks_for_secs(1.2), 3);
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        let zero_period = SimConfig { decision_period: 0, ..SimConfig::default() };
        assert!(zero_period.validate().is_err());
        let bad_dt = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(bad_dt.validate().is_err());
        assert_eq!(SimConfig { total_ticks: 9, ..SimConfig::default() }.end_tick(), Tick(9));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn chance_extremes() {
        let mut rng = AgentRng::new(3, AgentId(2));
        assert!((0..200).all(|_| rng.chance(1.0)));
        assert!((0..200).all(|_| !rng.chance(0.0)));
    }

    #[test]
    fn pick_from_slice() {
        let mut rng = AgentRng::new(3, AgentId(2));
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        for _ in 0..50 {
            assert!([1, 2, 3].contains(rng.pick(&[1, 2, 3]).unwrap()));
        }
    }

    #[test]
    fn inclusive_range_with_equal_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(rng.gen_range(0.0f32..=0.0), 0.0);
    }
}

#[cfg(test)]
mod action {
    use crate::DiscreteAction;

    #[test]
    fn buffer_indices() {
        for (i, a) in DiscreteAction::ALL.iter().enumerate() {
            assert_eq!(a.index() as usize, i);
            assert_eq!(DiscreteAction::try_from(i as i32).unwrap(), *a);
        }
        assert!(DiscreteAction::try_from(4).is_err());
    }

    #[test]
    fn mistake_set_excludes_rotate_right() {
        assert!(!DiscreteAction::MISTAKE_SET.contains(&DiscreteAction::RotateRight));
        assert_eq!(DiscreteAction::MISTAKE_SET.len(), 3);
    }

    #[test]
    fn labels() {
        assert_eq!(DiscreteAction::RotateLeft.to_string(), "rotate_left");
        assert!(!DiscreteAction::None.is_motion());
    }
}
