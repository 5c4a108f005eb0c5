//! Abstract storage traits for MailScribe.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The session layer depends only on the traits.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KeyValueStore;
