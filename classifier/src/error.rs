use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier returned {returned} results for {requested} emails")]
    ResultCountMismatch { requested: usize, returned: usize },
}
