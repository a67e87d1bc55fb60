//! Navigation-subsystem error type.

use thiserror::Error;

use wob_core::NodeId;

/// Errors produced by `wob-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    /// Rejection sampling found no walkable point within the attempt cap.
    #[error("maximum rejection sampling attempts reached ({attempts}); the walk radius may be too large")]
    SamplingExhausted { attempts: u32 },

    #[error("invalid sampling configuration: {0}")]
    InvalidSampling(String),

    #[error("node {0} not found in mesh geometry")]
    NodeNotFound(NodeId),
}

pub type NavResult<T> = Result<T, NavError>;
