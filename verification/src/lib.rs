//! Email verification workflow.
//!
//! One run goes `Idle -> Validating -> Classifying -> Aggregating -> Idle`
//! (or `Validating -> Idle` when rejected):
//! 1. **Validating**: a user must be signed in and, unless privileged, hold
//!    at least one credit per email.
//! 2. **Classifying**: the injected [`Classifier`](mailscribe_classifier::Classifier)
//!    produces one result per email, in order.
//! 3. **Aggregating**: results become a [`VerificationBatch`](mailscribe_types::VerificationBatch)
//!    at the front of history, replace the current results, and credits are debited.
//!
//! Failures at any step leave history, current results and credits untouched
//! and are reported both as a typed error and as a user-facing [`Notice`].

pub mod error;
pub mod export;
pub mod extract;
pub mod notice;
pub mod seed;
pub mod state;
pub mod workflow;

pub use error::VerificationError;
pub use notice::{Notice, NoticeLevel};
pub use state::RunPhase;
pub use workflow::{QuickCheck, VerificationWorkflow, WorkflowConfig};
