//! Verification batches: one completed run plus its aggregate statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EmailStatus, EmailVerificationResult, Timestamp};

/// Unique batch identifier (UUID v4, hyphenated).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-status tallies of a result set.
///
/// Invariant: `total == valid + invalid + risky + disposable + unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCounts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub risky: usize,
    pub disposable: usize,
    pub unknown: usize,
}

impl BatchCounts {
    /// Count the results in each status.
    pub fn tally(results: &[EmailVerificationResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.record(result.status);
        }
        counts
    }

    fn record(&mut self, status: EmailStatus) {
        self.total += 1;
        match status {
            EmailStatus::Valid => self.valid += 1,
            EmailStatus::Invalid => self.invalid += 1,
            EmailStatus::Risky => self.risky += 1,
            EmailStatus::Disposable => self.disposable += 1,
            EmailStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, status: EmailStatus) -> usize {
        match status {
            EmailStatus::Valid => self.valid,
            EmailStatus::Invalid => self.invalid,
            EmailStatus::Risky => self.risky,
            EmailStatus::Disposable => self.disposable,
            EmailStatus::Unknown => self.unknown,
        }
    }

    /// Share of `status` in the whole set, rounded to a whole percent.
    /// Zero for an empty set.
    pub fn percent(&self, status: EmailStatus) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count(status) as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.valid + self.invalid + self.risky + self.disposable + self.unknown
    }
}

/// One completed verification run.
///
/// Batches are immutable after assembly; the workflow prepends them to a
/// most-recent-first history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationBatch {
    id: BatchId,
    name: String,
    #[serde(flatten)]
    counts: BatchCounts,
    timestamp: Timestamp,
    results: Vec<EmailVerificationResult>,
}

impl VerificationBatch {
    /// Assemble a batch with a fresh id, stamped now.
    pub fn new(name: impl Into<String>, results: Vec<EmailVerificationResult>) -> Self {
        Self::assemble(BatchId::generate(), name, Timestamp::now(), results)
    }

    /// Assemble a batch from explicit parts. Counts are always derived from
    /// `results`.
    pub fn assemble(
        id: BatchId,
        name: impl Into<String>,
        timestamp: Timestamp,
        results: Vec<EmailVerificationResult>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            counts: BatchCounts::tally(&results),
            timestamp,
            results,
        }
    }

    pub fn id(&self) -> &BatchId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts(&self) -> &BatchCounts {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.total
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn results(&self) -> &[EmailVerificationResult] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(email: &str, status: EmailStatus) -> EmailVerificationResult {
        EmailVerificationResult::new(email, status, Timestamp::now())
    }

    #[test]
    fn counts_follow_results() {
        let batch = VerificationBatch::new(
            "run",
            vec![
                result("a@x.com", EmailStatus::Valid),
                result("b@x.com", EmailStatus::Valid),
                result("c@x.com", EmailStatus::Disposable),
                result("d@x.com", EmailStatus::Unknown),
            ],
        );
        let counts = batch.counts();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.valid, 2);
        assert_eq!(counts.disposable, 1);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.invalid, 0);
        assert!(counts.is_consistent());
    }

    #[test]
    fn percent_rounds_and_handles_empty() {
        let counts = BatchCounts::tally(&[
            result("a@x.com", EmailStatus::Valid),
            result("b@x.com", EmailStatus::Valid),
            result("c@x.com", EmailStatus::Invalid),
        ]);
        assert_eq!(counts.percent(EmailStatus::Valid), 67);
        assert_eq!(counts.percent(EmailStatus::Invalid), 33);
        assert_eq!(BatchCounts::default().percent(EmailStatus::Valid), 0);
    }

    #[test]
    fn json_shape_is_flat() {
        let batch = VerificationBatch::assemble(
            BatchId::new("b-1"),
            "Newsletter",
            "2023-06-10T08:15:00Z".parse().unwrap(),
            vec![result("a@x.com", EmailStatus::Risky)],
        );
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["id"], "b-1");
        assert_eq!(json["total"], 1);
        assert_eq!(json["risky"], 1);
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(BatchId::generate(), BatchId::generate());
    }
}
