//! LMDB storage backend for MailScribe.
//!
//! Implements the storage traits from `mailscribe-store` using the `heed` LMDB
//! bindings. Each logical store maps to one named database within a single
//! environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod kv;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use kv::LmdbKeyValueStore;
