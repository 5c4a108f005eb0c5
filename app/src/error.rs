use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] mailscribe_store_lmdb::LmdbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
