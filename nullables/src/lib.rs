//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (storage, randomness, the classifier backend)
//! are abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod classifier;
pub mod random;
pub mod store;

pub use classifier::NullClassifier;
pub use random::NullRandom;
pub use store::NullStore;
