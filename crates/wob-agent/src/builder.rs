//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use wob_agent::{AgentSpec, AgentStoreBuilder};
//! use wob_core::{Pose, Vec3};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .spawn(AgentSpec::at(Pose::default()))
//!     .spawn(AgentSpec::at(Pose::from_yaw(Vec3::new(2.0, 0.0, 0.0), 90.0)).radius(0.5))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use wob_core::Pose;

use crate::{AgentRngs, AgentStore};

/// Physical parameters for one spawned agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub pose:          Pose,
    /// Degrees per second.
    pub angular_speed: f32,
    /// Metres per second.
    pub move_speed:    f32,
    pub radius:        f32,
}

impl AgentSpec {
    pub const DEFAULT_ANGULAR_SPEED: f32 = 120.0;
    pub const DEFAULT_MOVE_SPEED:    f32 = 3.0;
    pub const DEFAULT_RADIUS:        f32 = 0.5;

    /// Spec with default speeds and radius at `pose`.
    pub fn at(pose: Pose) -> Self {
        Self {
            pose,
            angular_speed: Self::DEFAULT_ANGULAR_SPEED,
            move_speed:    Self::DEFAULT_MOVE_SPEED,
            radius:        Self::DEFAULT_RADIUS,
        }
    }

    pub fn angular_speed(mut self, deg_per_sec: f32) -> Self {
        self.angular_speed = deg_per_sec;
        self
    }

    pub fn move_speed(mut self, metres_per_sec: f32) -> Self {
        self.move_speed = metres_per_sec;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Agents receive sequential `AgentId`s in spawn order.
pub struct AgentStoreBuilder {
    seed:  u64,
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, specs: Vec::new() }
    }

    /// Add one agent.
    pub fn spawn(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add every agent in `specs`.
    pub fn spawn_all(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::with_capacity(self.specs.len());
        for spec in &self.specs {
            // Route through Pose::new so headings are always horizontal unit vectors.
            let pose = Pose::new(spec.pose.position, spec.pose.forward);
            store.push(pose, spec.angular_speed, spec.move_speed, spec.radius);
        }
        let rngs = AgentRngs::new(store.count, self.seed);
        (store, rngs)
    }
}
