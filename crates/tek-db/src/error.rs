//! Database error types for tek-db.

use tek_core::errors::CoreError;
use tek_roster::RosterError;
use tek_scoring::ScoringError;
use thiserror::Error;

/// Errors from local store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The operation conflicts with stored state (duplicate team name,
    /// second submission for a team).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The acting admin is missing or lacks the required role.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Entity lookups and field validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Roster and grouping rule violations.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Score range violations and unknown projects.
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: &str, id: i64) -> Self {
        Self::Core(CoreError::not_found(entity_type, id))
    }

    /// Whether this error means a looked-up record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoResult
                | Self::Core(CoreError::NotFound { .. })
                | Self::Scoring(ScoringError::ProjectNotFound(_))
        )
    }
}
