//! Fundamental types for MailScribe.
//!
//! This crate defines the records shared across every other crate in the workspace:
//! users and their credit ledger, per-email verification results, verification
//! batches, and timestamps.

pub mod batch;
pub mod error;
pub mod result;
pub mod status;
pub mod time;
pub mod user;

pub use batch::{BatchCounts, BatchId, VerificationBatch};
pub use error::TypesError;
pub use result::EmailVerificationResult;
pub use status::EmailStatus;
pub use time::Timestamp;
pub use user::{User, UserCredits, ADMIN_EMAIL, ADMIN_USER_ID};
