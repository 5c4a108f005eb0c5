use mailscribe_classifier::ClassifierError;
use mailscribe_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("not authenticated: please log in to verify emails")]
    NotAuthenticated,

    #[error("insufficient credits: you need {required} credits but only have {available}")]
    InsufficientCredits { required: u64, available: u64 },

    #[error("no email addresses to verify")]
    EmptyInput,

    #[error("no valid emails found in {0}")]
    NoEmailsFound(String),

    #[error("wrong file type: {0} is not a CSV file")]
    InvalidFileType(String),

    #[error("failed to read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("not an email address: {0}")]
    MalformedAddress(String),

    #[error("verification failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
