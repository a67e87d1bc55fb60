//! `wob-sim`: tick loop orchestrator for the wob navigation core.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Commands:  apply config-channel messages received since last tick
//!                  (bug toggles, behaviour selection + environment reset).
//!   ② Rebuild:   re-bake the nav mesh if its geometry changed.
//!   ③ Upkeep:    BehaviorModel::update: off-mesh check, target resample,
//!                  path recompute, for every agent.
//!   ④ Decide:    agents due in the DecisionQueue pass through their
//!                  ActionGate; the heuristic action always wins.
//!   ⑤ Move:      every agent applies its current action for one tick.
//!   ⑥ Watch:     near-plane probes raise clip Enter/Stay/Exit events.
//! ```
//!
//! # Modules
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`bugs`]     | `BugKind`, `BugRegistry`, screen fill colours          |
//! | [`channel`]  | `ConfigCommand` wire-format parsing                    |
//! | [`decision`] | `DecisionQueue`: sparse per-tick decision schedule     |
//! | [`watch`]    | `ClipWatcher`: near-plane contact events               |
//! | [`observer`] | `SimObserver`, `StepRecord`, `TickSummary`             |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash for the clip watcher's tag set.                  |
//! | `serde`   | `Serialize`/`Deserialize` on bug and config types.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wob_agent::{AgentSpec, AgentStoreBuilder};
//! use wob_core::{Pose, SimConfig, Vec3};
//! use wob_nav::{NavMeshBuilder, NavSurface};
//! use wob_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = AgentStoreBuilder::new(42)
//!     .spawn(AgentSpec::at(Pose::from_yaw(Vec3::ZERO, 0.0)))
//!     .build();
//! let mesh = NavSurface::new(NavMeshBuilder::grid(5, 5, 2.0));
//! let mut sim = SimBuilder::new(SimConfig::default(), store, rngs, mesh).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod bugs;
pub mod builder;
pub mod channel;
pub mod decision;
pub mod error;
pub mod observer;
pub mod sim;
pub mod watch;

#[cfg(test)]
mod tests;

pub use bugs::{BugKind, BugRegistry, Rgb, ScreenFill};
pub use builder::SimBuilder;
pub use channel::{ChannelError, ConfigCommand};
pub use decision::DecisionQueue;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, StepRecord, TickSummary};
pub use sim::Sim;
pub use watch::{ClipEvent, ClipWatcher, ContactPhase, DEFAULT_NEAR_CLIP, DEFAULT_WATCHED_TAGS, Obstacle};
