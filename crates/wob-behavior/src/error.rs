use thiserror::Error;

use wob_nav::NavError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("unknown behaviour {0:?}")]
    UnknownBehavior(String),

    #[error(transparent)]
    Nav(#[from] NavError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
