//! Per-run phase tracking.

use std::fmt;

/// Where the workflow is within a verification run.
///
/// Rejection is not a resting phase: a rejected run returns straight to
/// [`RunPhase::Idle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunPhase {
    /// No run in progress.
    #[default]
    Idle,
    /// Checking input, authentication and credits (and reading uploads).
    Validating,
    /// Waiting on the classifier.
    Classifying,
    /// Building the batch, debiting credits, updating history.
    Aggregating,
}

impl RunPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Classifying => "classifying",
            Self::Aggregating => "aggregating",
        };
        f.write_str(name)
    }
}
