//! `wob-mobility`: per-agent path tracking and movement.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`state`]      | `PathState`, `TrackerOutcome`, `TrackerUpdate`              |
//! | [`tracker`]    | `PathTracker`: current goal + path, resample-on-arrival    |
//! | [`store`]      | `TrackerStore`: `Vec<PathTracker>` indexed by `AgentId`    |
//! | [`kinematics`] | `apply_action`: turn a `DiscreteAction` into pose change   |
//!
//! # Per-tick loop (driven by `wob-sim`)
//!
//! 1. `PathTracker::update` checks the agent is on the mesh, draws a new goal
//!    through the target sampler when the old one is reached, and recomputes
//!    the path from the agent's current position.
//! 2. The behaviour reads `PathTracker::path` to choose an action.
//! 3. `kinematics::advance` moves the agent for one step.

pub mod kinematics;
pub mod state;
pub mod store;
pub mod tracker;


pub use kinematics::{advance, apply_action};
pub use state::{PathState, TrackerOutcome, TrackerUpdate};
pub use store::TrackerStore;
pub use tracker::PathTracker;
