//! Pulling email candidates out of free text and uploaded CSV files.
//!
//! Neither function is an RFC 5322 parser. CSV extraction keeps any
//! comma-separated token containing both `@` and `.`, from any column, so a
//! non-email column that happens to match is picked up too.

/// Number of lines scanned by [`preview_emails`].
pub const PREVIEW_LINES: usize = 5;

/// Normalise manual input: split every entry on newlines and commas, trim,
/// drop blanks. Order, duplicates and malformed entries are kept.
pub fn parse_email_input<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.as_ref().split(['\n', ',']))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract candidate emails from CSV text.
pub fn extract_csv_emails(content: &str) -> Vec<String> {
    extract_from_lines(content.lines())
}

/// Candidate emails from the first [`PREVIEW_LINES`] lines only.
pub fn preview_emails(content: &str) -> Vec<String> {
    extract_from_lines(content.lines().take(PREVIEW_LINES))
}

fn extract_from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|token| looks_like_email(token))
        .map(str::to_string)
        .collect()
}

/// The upload heuristic: contains both `@` and `.`.
pub fn looks_like_email(token: &str) -> bool {
    token.contains('@') && token.contains('.')
}

/// Whether an upload name is accepted. Case-sensitive, like the suffix check
/// users see in the file picker.
pub fn is_csv_name(file_name: &str) -> bool {
    file_name.ends_with(".csv")
}

/// Default batch name for an upload: the file name without `.csv`.
pub fn batch_name_from_file(file_name: &str) -> String {
    file_name
        .strip_suffix(".csv")
        .unwrap_or(file_name)
        .to_string()
}
