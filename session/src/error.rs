use mailscribe_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("session serialization error: {0}")]
    Serialization(String),
}
