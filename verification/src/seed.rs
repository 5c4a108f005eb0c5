//! Demo history shown to a fresh session.

use mailscribe_types::{
    BatchId, EmailStatus, EmailVerificationResult, Timestamp, VerificationBatch,
};

/// The five sample results the demo batches are built from.
pub fn sample_results(at: Timestamp) -> Vec<EmailVerificationResult> {
    vec![
        EmailVerificationResult::new("valid@gmail.com", EmailStatus::Valid, at)
            .with_kind("personal")
            .with_score(0.98),
        EmailVerificationResult::new("disposable@tempmail.com", EmailStatus::Disposable, at)
            .with_kind("temporary")
            .with_score(0.99),
        EmailVerificationResult::new("risky@example.com", EmailStatus::Risky, at)
            .with_kind("catch-all")
            .with_score(0.7),
        EmailVerificationResult::new(
            "invalid@nonexistentdomain123456.com",
            EmailStatus::Invalid,
            at,
        )
        .with_kind("domain-error")
        .with_score(0.05),
        EmailVerificationResult::new("typo@gmal.com", EmailStatus::Invalid, at)
            .with_suggestion("typo@gmail.com")
            .with_score(0.3),
    ]
}

/// Two past batches, most recent first. Counts are derived from the results.
pub fn demo_batches() -> Vec<VerificationBatch> {
    let now = Timestamp::now();
    let results = sample_results(now);
    vec![
        VerificationBatch::assemble(
            BatchId::generate(),
            "Marketing Campaign Q2",
            Timestamp::from_millis(1_686_825_000_000),
            results.clone(),
        ),
        VerificationBatch::assemble(
            BatchId::generate(),
            "Newsletter Subscribers",
            Timestamp::from_millis(1_686_384_900_000),
            results.into_iter().take(3).collect(),
        ),
    ]
}
