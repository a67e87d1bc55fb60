//! Errors raised by the core value types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WobError {
    /// A `SimConfig` (or similar) value is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// Text or wire input that does not describe a valid value.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type WobResult<T> = Result<T, WobError>;
