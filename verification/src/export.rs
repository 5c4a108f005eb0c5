//! CSV export of verification results.
//!
//! Rows are joined with plain commas and no quoting; absent optional fields
//! are written as empty strings.

use mailscribe_types::{EmailVerificationResult, Timestamp, VerificationBatch};

pub const CSV_HEADER: &str = "Email,Status,Type,Suggestion,Score,Timestamp";

/// Template offered to users before their first upload.
pub const SAMPLE_CSV: &str = "email\njohn@example.com\nsarah@example.com\ncontact@business.com";

pub const SAMPLE_CSV_FILE_NAME: &str = "sample-emails.csv";

/// Render results as CSV text: header line, then one line per result.
pub fn results_to_csv(results: &[EmailVerificationResult]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(results.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_row(result: &EmailVerificationResult) -> String {
    [
        result.email.clone(),
        result.status.to_string(),
        result.kind.clone().unwrap_or_default(),
        result.suggestion.clone().unwrap_or_default(),
        result.score.map(|s| s.to_string()).unwrap_or_default(),
        result.timestamp.to_iso_string(),
    ]
    .join(",")
}

/// Download name for a history batch: every non-alphanumeric character of
/// the batch name becomes `-`.
pub fn batch_file_name(batch: &VerificationBatch) -> String {
    let stem: String = batch
        .name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{stem}.csv")
}

/// Download name for the current results, stamped with `at`'s date.
pub fn results_file_name(at: Timestamp) -> String {
    format!("email-verification-{}.csv", at.date_stamp())
}
