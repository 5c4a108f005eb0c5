//! Verification status of a single email address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Outcome class assigned to an email by a classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    /// Deliverable mailbox.
    Valid,
    /// Syntax, domain or typo failure.
    Invalid,
    /// Accepts mail but delivery is uncertain (catch-all, role accounts).
    Risky,
    /// Throwaway / temporary mailbox provider.
    Disposable,
    /// Classifier could not decide.
    Unknown,
}

impl EmailStatus {
    pub const ALL: [EmailStatus; 5] = [
        Self::Valid,
        Self::Invalid,
        Self::Risky,
        Self::Disposable,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Risky => "risky",
            Self::Disposable => "disposable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypesError::UnknownStatus(s.to_string()))
    }
}
