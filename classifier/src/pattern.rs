//! Pattern-matching demo classifier.

use std::time::Duration;

use mailscribe_types::{EmailVerificationResult, Timestamp};

use crate::rules::classify_email;
use crate::{Classifier, ClassifierError, RandomSource, ThreadRandom};

/// Simulated round-trip before a batch resolves.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Classifies by substring rules with a weighted random fallback, after a
/// fixed simulated delay. Stands in for a real verification backend.
pub struct PatternClassifier<R = ThreadRandom> {
    random: R,
    delay: Duration,
}

impl PatternClassifier<ThreadRandom> {
    pub fn new() -> Self {
        Self::with_random(ThreadRandom)
    }
}

impl Default for PatternClassifier<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> PatternClassifier<R> {
    pub fn with_random(random: R) -> Self {
        Self {
            random,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Classify a single email immediately, without the simulated delay.
    pub fn classify(&self, email: &str) -> EmailVerificationResult {
        classify_email(email, &self.random, Timestamp::now())
    }
}

impl<R: RandomSource> Classifier for PatternClassifier<R> {
    async fn classify_batch(
        &self,
        emails: &[String],
    ) -> Result<Vec<EmailVerificationResult>, ClassifierError> {
        tokio::time::sleep(self.delay).await;
        let results: Vec<_> = emails.iter().map(|email| self.classify(email)).collect();
        tracing::debug!(count = results.len(), "pattern classifier resolved batch");
        Ok(results)
    }

    fn name(&self) -> &str {
        "pattern"
    }
}
