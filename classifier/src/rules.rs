//! Substring rules and the weighted random fallback used by the demo classifier.
//!
//! Rules are evaluated in order on the raw, untrimmed string; the first match
//! wins. Note that "invalid" contains "valid", so the first rule claims it.

use mailscribe_types::{EmailStatus, EmailVerificationResult, Timestamp};

use crate::RandomSource;

/// A classification before it is stamped onto a specific email.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub status: EmailStatus,
    pub kind: &'static str,
    pub suggestion: Option<String>,
    pub score: f64,
}

impl Verdict {
    fn new(status: EmailStatus, kind: &'static str, score: f64) -> Self {
        Self {
            status,
            kind,
            suggestion: None,
            score,
        }
    }

    pub fn into_result(self, email: &str, timestamp: Timestamp) -> EmailVerificationResult {
        let result = EmailVerificationResult::new(email, self.status, timestamp)
            .with_kind(self.kind)
            .with_score(self.score);
        match self.suggestion {
            Some(suggestion) => result.with_suggestion(suggestion),
            None => result,
        }
    }
}

/// Apply the fixed substring rules. `None` means no rule fired.
pub fn match_pattern(email: &str) -> Option<Verdict> {
    let has = |needle: &str| email.contains(needle);

    if has("valid") || has("real") {
        Some(Verdict::new(EmailStatus::Valid, "personal", 0.95))
    } else if has("disposable") || has("temp") {
        Some(Verdict::new(EmailStatus::Disposable, "temporary", 0.98))
    } else if has("risky") || has("catch") {
        Some(Verdict::new(EmailStatus::Risky, "catch-all", 0.7))
    } else if has("invalid") || !has("@") {
        Some(Verdict::new(EmailStatus::Invalid, "syntax-error", 0.1))
    } else if has("typo") || has("gmal") {
        Some(Verdict {
            suggestion: Some(email.replacen("gmal", "gmail", 1)),
            ..Verdict::new(EmailStatus::Invalid, "typo", 0.4)
        })
    } else {
        None
    }
}

/// Weighted draw for emails no rule recognises:
/// 70% valid, 10% invalid, 10% disposable, 10% risky.
pub fn random_verdict<R: RandomSource + ?Sized>(rng: &R) -> Verdict {
    let roll = rng.next_f64();
    if roll < 0.7 {
        let kind = if rng.next_f64() > 0.5 {
            "personal"
        } else {
            "business"
        };
        Verdict::new(EmailStatus::Valid, kind, 0.8 + rng.next_f64() * 0.2)
    } else if roll < 0.8 {
        Verdict::new(EmailStatus::Invalid, "domain-error", rng.next_f64() * 0.3)
    } else if roll < 0.9 {
        Verdict::new(EmailStatus::Disposable, "temporary", 0.9)
    } else {
        Verdict::new(EmailStatus::Risky, "role-based", 0.5 + rng.next_f64() * 0.2)
    }
}

/// Classify one email: rules first, random fallback otherwise.
pub fn classify_email<R: RandomSource + ?Sized>(
    email: &str,
    rng: &R,
    timestamp: Timestamp,
) -> EmailVerificationResult {
    match_pattern(email)
        .unwrap_or_else(|| random_verdict(rng))
        .into_result(email, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a fixed sequence of draws.
    struct Draws(Mutex<Vec<f64>>);

    impl Draws {
        fn new(mut values: Vec<f64>) -> Self {
            values.reverse();
            Self(Mutex::new(values))
        }
    }

    impl RandomSource for Draws {
        fn next_f64(&self) -> f64 {
            self.0.lock().unwrap().pop().unwrap_or(0.0)
        }
    }

    #[test]
    fn valid_and_real_are_valid() {
        for email in ["anything-valid@x.com", "real.person@x.com"] {
            let v = match_pattern(email).unwrap();
            assert_eq!(v.status, EmailStatus::Valid);
            assert_eq!(v.kind, "personal");
            assert_eq!(v.score, 0.95);
        }
    }

    #[test]
    fn invalid_is_claimed_by_valid_rule() {
        let v = match_pattern("invalid@nonexistentdomain123456.com").unwrap();
        assert_eq!(v.status, EmailStatus::Valid);
    }

    #[test]
    fn disposable_and_temp() {
        let v = match_pattern("someone@tempmail.com").unwrap();
        assert_eq!(v.status, EmailStatus::Disposable);
        assert_eq!(v.kind, "temporary");
        assert_eq!(v.score, 0.98);
    }

    #[test]
    fn risky_and_catch() {
        let v = match_pattern("catchall@corp.com").unwrap();
        assert_eq!(v.status, EmailStatus::Risky);
        assert_eq!(v.kind, "catch-all");
    }

    #[test]
    fn missing_at_sign_is_syntax_error() {
        let v = match_pattern("not-an-address.com").unwrap();
        assert_eq!(v.status, EmailStatus::Invalid);
        assert_eq!(v.kind, "syntax-error");
        assert_eq!(v.score, 0.1);
    }

    #[test]
    fn gmal_gets_suggestion() {
        let v = match_pattern("user@gmal.com").unwrap();
        assert_eq!(v.status, EmailStatus::Invalid);
        assert_eq!(v.kind, "typo");
        assert_eq!(v.suggestion.as_deref(), Some("user@gmail.com"));
        assert_eq!(v.score, 0.4);
    }

    #[test]
    fn typo_without_gmal_suggests_input_unchanged() {
        let v = match_pattern("typo@example.com").unwrap();
        assert_eq!(v.suggestion.as_deref(), Some("typo@example.com"));
    }

    #[test]
    fn plain_address_falls_through() {
        assert!(match_pattern("john@example.com").is_none());
    }

    #[test]
    fn random_bands() {
        let v = random_verdict(&Draws::new(vec![0.1, 0.9, 0.5]));
        assert_eq!(v.status, EmailStatus::Valid);
        assert_eq!(v.kind, "personal");
        assert!((v.score - 0.9).abs() < 1e-9);

        let v = random_verdict(&Draws::new(vec![0.1, 0.2, 0.0]));
        assert_eq!(v.kind, "business");
        assert!((v.score - 0.8).abs() < 1e-9);

        let v = random_verdict(&Draws::new(vec![0.75, 0.5]));
        assert_eq!(v.status, EmailStatus::Invalid);
        assert_eq!(v.kind, "domain-error");
        assert!((v.score - 0.15).abs() < 1e-9);

        let v = random_verdict(&Draws::new(vec![0.85]));
        assert_eq!(v.status, EmailStatus::Disposable);
        assert_eq!(v.score, 0.9);

        let v = random_verdict(&Draws::new(vec![0.95, 1.0]));
        assert_eq!(v.status, EmailStatus::Risky);
        assert_eq!(v.kind, "role-based");
        assert!((v.score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn classify_email_stamps_result() {
        let ts = Timestamp::now();
        let result = classify_email("user@gmal.com", &Draws::new(vec![]), ts);
        assert_eq!(result.email, "user@gmal.com");
        assert_eq!(result.kind.as_deref(), Some("typo"));
        assert_eq!(result.suggestion.as_deref(), Some("user@gmail.com"));
        assert_eq!(result.timestamp, ts);
    }
}
