//! MailScribe application layer.
//!
//! Loads configuration, initialises logging and wires the LMDB-backed session
//! store and the pattern classifier into a [`VerificationWorkflow`].

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{App, AppWorkflow};
pub use config::AppConfig;
pub use error::AppError;
pub use logging::{init_logging, LogFormat};

pub use mailscribe_verification::VerificationWorkflow;
