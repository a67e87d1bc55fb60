//! `wob-agent`: Structure-of-Arrays agent storage for the `wob` core.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]     | `AgentStoreBuilder`, `AgentSpec` (fluent construction)    |
//!
//! The host simulation owns all agent state.  Behaviours and the path tracker
//! read it through `&AgentStore`; only the sim's apply step writes poses.

pub mod builder;
pub mod store;


pub use builder::{AgentSpec, AgentStoreBuilder};
pub use store::{AgentRngs, AgentStore};
