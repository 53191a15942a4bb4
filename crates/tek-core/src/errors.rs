//! Cross-cutting error types for the Teknofest toolkit.
//!
//! Domain-specific errors (`RosterError`, `ScoringError`, `DatabaseError`,
//! `ClientError`) live in their respective crates. A unified error is
//! deferred to `tek-cli` where all crate errors converge through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Teknofest crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A field failed a format or length constraint.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on a numeric id.
    #[must_use]
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Render 1-based member positions as `"1, 3"` for error messages.
#[must_use]
pub fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
