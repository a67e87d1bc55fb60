use thiserror::Error;

use wob_behavior::BehaviorError;
use wob_core::{AgentId, WobError};

use crate::ChannelError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Core(#[from] WobError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("config channel: {0}")]
    Channel(#[from] ChannelError),
}

pub type SimResult<T> = Result<T, SimError>;
