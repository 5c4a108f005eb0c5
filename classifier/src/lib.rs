//! Email classification.
//!
//! A [`Classifier`] turns a list of email strings into one
//! [`EmailVerificationResult`] per input, in input order. The workflow depends
//! only on the trait, so a real syntax / MX / SMTP prober can replace the
//! [`PatternClassifier`] without touching anything upstream.

pub mod error;
pub mod pattern;
pub mod random;
pub mod rules;

use std::future::Future;

use mailscribe_types::EmailVerificationResult;

pub use error::ClassifierError;
pub use pattern::PatternClassifier;
pub use random::{RandomSource, ThreadRandom};

/// Trait for batch email classification.
pub trait Classifier {
    /// Classify every email, resolving once with all results.
    ///
    /// Implementations must return exactly one result per input, preserving
    /// order. Duplicates and malformed entries are classified like any other.
    fn classify_batch(
        &self,
        emails: &[String],
    ) -> impl Future<Output = Result<Vec<EmailVerificationResult>, ClassifierError>>;

    /// Human-readable name of this classifier.
    fn name(&self) -> &str;
}
