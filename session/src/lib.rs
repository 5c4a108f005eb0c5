//! Session store for MailScribe.
//!
//! Owns the signed-in [`User`](mailscribe_types::User) and its credit ledger:
//! - Demo authentication (fixed credential pairs, simulated latency)
//! - Signup with a starter credit allotment
//! - Persistence of the current user as one JSON record in a key-value store
//! - Session restore on startup, tolerant of corrupt records
//! - Credit debits, bypassed for privileged accounts

pub mod accounts;
pub mod error;
pub mod store;

pub use accounts::{ADMIN_LOGIN, DEMO_LOGIN};
pub use error::SessionError;
pub use store::{SessionConfig, SessionStore, SESSION_KEY};
