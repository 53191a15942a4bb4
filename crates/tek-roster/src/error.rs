//! Roster error types.

use tek_core::enums::Gender;
use tek_core::errors::join_positions;
use thiserror::Error;

use crate::fields::FieldErrors;

/// Domain-rule violations raised while assembling or validating a roster.
///
/// Member positions are 1-based, in current roster order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// The roster has fewer than 3 or more than 6 members.
    #[error("team must have between {min} and {max} members, got {count}")]
    RosterSize {
        count: usize,
        min: usize,
        max: usize,
    },

    /// Verified members whose resolved gender differs from the team gender.
    #[error("{} team gender '{team_gender}'", mismatch_phrase(.members))]
    GenderMismatch {
        team_gender: Gender,
        members: Vec<usize>,
    },

    /// Members whose entered membership number has not verified as valid.
    #[error("membership number not verified for {}", member_label(.members))]
    IncompleteVerification { members: Vec<usize> },

    /// The roster does not have exactly one leader.
    #[error("team must have exactly one leader, got {count}")]
    Leader { count: usize },

    /// A field sourced from the membership service was edited locally.
    #[error("member {position}: '{field}' comes from the membership record and is read-only")]
    VerifiedFieldLocked {
        position: usize,
        field: &'static str,
    },

    /// No slot with this member id exists in the session.
    #[error("unknown roster member {0}")]
    UnknownMember(u64),

    /// Individuals that are already part of a team.
    #[error("individuals already assigned to a team: {}", join_ids(.ids))]
    AlreadyAssigned { ids: Vec<i64> },

    /// The same individual was listed more than once.
    #[error("individual {0} listed more than once")]
    DuplicateIndividual(i64),

    #[error("no individuals selected")]
    EmptySelection,

    /// The target team cannot absorb this many individuals.
    #[error("team has {available} free slots, {requested} requested")]
    NoCapacity { available: usize, requested: usize },

    /// Field-level constraint failures.
    #[error("{0}")]
    Fields(FieldErrors),
}

/// `member 2` or `members 1, 3`.
fn member_label(positions: &[usize]) -> String {
    if positions.len() == 1 {
        format!("member {}", join_positions(positions))
    } else {
        format!("members {}", join_positions(positions))
    }
}

fn mismatch_phrase(positions: &[usize]) -> String {
    let verb = if positions.len() == 1 { "does" } else { "do" };
    format!("{} {verb} not match", member_label(positions))
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
