//! `wob-behavior`: how agents choose discrete actions.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`policy`]   | `compute_heuristic_action`: path geometry → `DiscreteAction`   |
//! | [`gate`]     | `ActionGate`: discards external actions, tracks decision `dt`  |
//! | [`context`]  | `SimContext<'a>`: read-only tick snapshot shared by all agents |
//! | [`model`]    | `BehaviorModel` trait                                           |
//! | [`navmesh`]  | `NavMeshBehavior`, `NavAgentConfig`                             |
//! | [`noop`]     | `NoopBehavior`: never moves                                    |
//! | [`registry`] | `behavior_from_name`: select a behaviour by its wire name      |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Decision flow
//!
//! Each tick `wob-sim` calls `BehaviorModel::update` for every agent (path
//! upkeep), then, for agents due a decision, routes the externally proposed
//! action through `ActionGate::apply`.  The gate always answers with
//! `BehaviorModel::heuristic`; whatever the caller proposed is only logged.

pub mod context;
pub mod error;
pub mod gate;
pub mod model;
pub mod navmesh;
pub mod noop;
pub mod policy;
pub mod registry;


pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use gate::ActionGate;
pub use model::BehaviorModel;
pub use navmesh::{NavAgentConfig, NavMeshBehavior};
pub use noop::NoopBehavior;
pub use policy::compute_heuristic_action;
pub use registry::{BEHAVIOR_NAMES, behavior_from_name};
