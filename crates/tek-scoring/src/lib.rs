//! # tek-scoring
//!
//! Evaluation aggregation for Teknofest projects.
//!
//! - [`aggregate`]: score range checks, the weighted admin component, and
//!   per-project totals with partial-score status
//! - [`rank`]: the top-teams leaderboard
//! - [`details`]: per-admin breakdown of one project
//! - [`stats`]: evaluation coverage and averages
//!
//! Everything here is pure: callers load evaluations and admin weights and
//! pass them in.

pub mod aggregate;
pub mod details;
pub mod rank;
pub mod stats;

mod error;

pub use aggregate::{WeightTable, round2, score_project, validate_admin_score, validate_ai_score};
pub use error::{ScoreKind, ScoringError};
pub use rank::{RankOptions, RankedProject, rank_top_teams};
