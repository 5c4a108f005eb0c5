//! Per-email verification result.

use serde::{Deserialize, Serialize};

use crate::{EmailStatus, Timestamp};

/// What a classifier concluded about one email address.
///
/// Results are immutable once produced; batches hold them in input order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailVerificationResult {
    pub email: String,
    pub status: EmailStatus,
    /// Classifier sub-reason, e.g. `personal`, `catch-all`, `typo`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Corrected address when a typo was detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub timestamp: Timestamp,
}

impl EmailVerificationResult {
    pub fn new(email: impl Into<String>, status: EmailStatus, timestamp: Timestamp) -> Self {
        Self {
            email: email.into(),
            status,
            kind: None,
            suggestion: None,
            score: None,
            timestamp,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Set the confidence score, clamped into [0, 1].
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score.clamp(0.0, 1.0));
        self
    }
}
