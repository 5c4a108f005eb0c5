//! Plain-text rendering of users, batches and results.

use mailscribe_types::{EmailStatus, EmailVerificationResult, User, VerificationBatch};
use mailscribe_verification::Notice;

pub fn user_line(user: &User) -> String {
    let credits = if user.is_privileged() {
        "unlimited credits (admin)".to_string()
    } else {
        format!(
            "{} credits available, {} used of {}",
            user.credits.available, user.credits.used, user.credits.plan_limit
        )
    };
    format!("{} <{}>: {credits}", user.name, user.email)
}

/// One-line summary with per-status counts and percentages.
pub fn batch_summary(batch: &VerificationBatch) -> String {
    let counts = batch.counts();
    let breakdown: Vec<String> = EmailStatus::ALL
        .iter()
        .map(|&status| {
            format!(
                "{status} {} ({}%)",
                counts.count(status),
                counts.percent(status)
            )
        })
        .collect();
    format!(
        "{}  {}  [{}]  total {}: {}",
        batch.id(),
        batch.timestamp().date_label(),
        batch.name(),
        batch.total(),
        breakdown.join(", ")
    )
}

pub fn result_line(result: &EmailVerificationResult) -> String {
    let mut line = format!("{:<40} {:<10}", result.email, result.status.as_str());
    if let Some(kind) = &result.kind {
        line.push_str(&format!(" {kind}"));
    }
    if let Some(score) = result.score {
        line.push_str(&format!(" score={score:.2}"));
    }
    if let Some(suggestion) = &result.suggestion {
        line.push_str(&format!(" did you mean {suggestion}?"));
    }
    line
}

pub fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        println!("{notice}");
    }
}
