//! Nullable classifier: scripted verdicts with no delay.

use mailscribe_classifier::{Classifier, ClassifierError};
use mailscribe_types::{EmailStatus, EmailVerificationResult, Timestamp};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A deterministic classifier for testing.
///
/// Emails with a scripted status get it; everything else gets the default
/// status. Can be told to fail or to drop results.
pub struct NullClassifier {
    scripted: HashMap<String, EmailStatus>,
    default_status: EmailStatus,
    failing: AtomicBool,
    truncate: AtomicBool,
    calls: AtomicUsize,
}

impl NullClassifier {
    pub fn new(default_status: EmailStatus) -> Self {
        Self {
            scripted: HashMap::new(),
            default_status,
            failing: AtomicBool::new(false),
            truncate: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script the status for one email.
    pub fn with_status(mut self, email: &str, status: EmailStatus) -> Self {
        self.scripted.insert(email.to_string(), status);
        self
    }

    /// Make every subsequent batch fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Return one result fewer than requested (a misbehaving backend).
    pub fn set_truncating(&self, truncate: bool) {
        self.truncate.store(truncate, Ordering::SeqCst);
    }

    /// Number of batch calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullClassifier {
    fn default() -> Self {
        Self::new(EmailStatus::Valid)
    }
}

impl Classifier for NullClassifier {
    async fn classify_batch(
        &self,
        emails: &[String],
    ) -> Result<Vec<EmailVerificationResult>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClassifierError::Unavailable(
                "null classifier set to fail".to_string(),
            ));
        }
        let now = Timestamp::now();
        let mut results: Vec<_> = emails
            .iter()
            .map(|email| {
                let status = self
                    .scripted
                    .get(email)
                    .copied()
                    .unwrap_or(self.default_status);
                EmailVerificationResult::new(email.as_str(), status, now).with_kind("scripted")
            })
            .collect();
        if self.truncate.load(Ordering::SeqCst) {
            results.pop();
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        "null"
    }
}
