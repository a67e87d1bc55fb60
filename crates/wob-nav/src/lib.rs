//! `wob-nav`: navigation mesh, routing, and target sampling.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`query`]   | `NavMesh` trait: the query adapter every consumer codes against |
//! | [`path`]    | `NavPath`: ordered corners from agent to goal                  |
//! | [`mesh`]    | `WaypointMesh` (CSR + R-tree corridors), `NavMeshBuilder`       |
//! | [`router`]  | Dijkstra over the corridor graph                                |
//! | [`surface`] | `NavSurface`: editable geometry with dirty-flag rebuilds       |
//! | [`sampler`] | `SamplingConfig`, `sample_target` (rejection sampling)          |
//! | [`error`]   | `NavError`, `NavResult<T>`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `SamplingConfig`.        |

pub mod error;
pub mod mesh;
pub mod path;
pub mod query;
pub mod router;
pub mod sampler;
pub mod surface;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use mesh::{NavMeshBuilder, WaypointMesh};
pub use path::NavPath;
pub use query::NavMesh;
pub use sampler::{MAX_REJECTION_SAMPLE_ATTEMPTS, SamplingConfig, TargetSample, sample_target, sample_target_detailed};
pub use surface::NavSurface;
