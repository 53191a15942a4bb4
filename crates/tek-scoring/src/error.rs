//! Scoring error types.

use std::fmt;

use thiserror::Error;

/// Which evaluator produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Admin,
    Ai,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Ai => "AI",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// Score outside `0..=max` or not a finite number.
    #[error("{kind} score must be between 0 and {max}, got {score}")]
    ScoreRange { kind: ScoreKind, score: f64, max: f64 },

    #[error("project {0} not found")]
    ProjectNotFound(i64),
}
