//! Domain limits shared by validation, scoring, and storage.

/// Minimum number of members on a team roster.
pub const MIN_TEAM_MEMBERS: usize = 3;

/// Maximum number of members on a team roster.
pub const MAX_TEAM_MEMBERS: usize = 6;

/// Exact length of a membership number, in characters.
pub const MEMBERSHIP_NUMBER_LEN: usize = 7;

/// Inclusive upper bound of an admin evaluation score.
pub const ADMIN_SCORE_MAX: f64 = 75.0;

/// Inclusive upper bound of an AI evaluation score.
pub const AI_SCORE_MAX: f64 = 25.0;

/// Inclusive upper bound of an admin's evaluation weight.
pub const ADMIN_WEIGHT_MAX: u8 = 100;

/// Weight applied to an evaluation whose admin is no longer known.
pub const DEFAULT_ADMIN_WEIGHT: u8 = 10;

/// Minimum character count of a project's technical description.
pub const MIN_TECHNICAL_DESCRIPTION_CHARS: usize = 1000;

/// Minimum character count of a project's problem statement.
pub const MIN_PROBLEM_STATEMENT_CHARS: usize = 50;

/// Remaining roster slots for a team of `member_count` members.
#[must_use]
pub const fn available_slots(member_count: usize) -> usize {
    MAX_TEAM_MEMBERS.saturating_sub(member_count)
}
