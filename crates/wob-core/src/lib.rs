//! `wob-core`: foundational types for the `wob` navigation core.
//!
//! This crate is a dependency of every other `wob-*` crate.  It has no
//! `wob-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `LinkId`, `ObstacleId`           |
//! | [`geom`]        | `Vec3`, `Pose`, signed angles, yaw rotation           |
//! | [`time`]        | `Tick`, `Clock`, `SimClock`, `SimConfig`              |
//! | [`rng`]         | `AgentRng`, one independent stream per agent          |
//! | [`action`]      | `DiscreteAction` enum                                 |
//! | [`error`]       | `WobError`, `WobResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to value and config types.  |

pub mod action;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::DiscreteAction;
pub use error::{WobError, WobResult};
pub use geom::{Pose, Vec3};
pub use ids::{AgentId, LinkId, NodeId, ObstacleId};
pub use rng::AgentRng;
pub use time::{Clock, SimClock, SimConfig, Tick};
