//! Errors raised while parsing shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("unknown verification status: {0}")]
    UnknownStatus(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
