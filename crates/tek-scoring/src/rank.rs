//! The top-teams leaderboard.

use std::cmp::Ordering;

use tek_core::enums::{ProjectField, ScoreStatus};
use tek_core::responses::{ProjectScore, TopTeam};

use crate::aggregate::round2;

/// Leaderboard description length, in characters.
pub const DESCRIPTION_CHARS: usize = 200;

/// A project with its team and aggregated score, ready to rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProject {
    pub project_id: i64,
    pub project_title: String,
    pub problem_statement: String,
    pub field: ProjectField,
    pub team_name: String,
    pub team_members: Vec<String>,
    pub is_featured: bool,
    pub score: ProjectScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    pub limit: Option<usize>,
    /// List partially scored projects after all complete ones.
    pub include_partial: bool,
    pub featured_only: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: Some(5),
            include_partial: false,
            featured_only: false,
        }
    }
}

/// Truncate to [`DESCRIPTION_CHARS`] characters, appending `...` when cut.
#[must_use]
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_CHARS {
        let mut cut: String = text.chars().take(DESCRIPTION_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

fn by_total_desc(a: &RankedProject, b: &RankedProject) -> Ordering {
    match (a.score.total_score, b.score.total_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        _ => Ordering::Equal,
    }
}

/// Rank projects by total score, highest first.
///
/// Ties keep listing order (project id ascending). Projects without a
/// complete total are excluded unless `include_partial` is set, in which
/// case they follow the complete ones in listing order.
#[must_use]
pub fn rank_top_teams(mut projects: Vec<RankedProject>, options: &RankOptions) -> Vec<TopTeam> {
    if options.featured_only {
        projects.retain(|p| p.is_featured);
    }
    projects.sort_by_key(|p| p.project_id);

    let (mut complete, partial): (Vec<_>, Vec<_>) = projects
        .into_iter()
        .partition(|p| p.score.status == ScoreStatus::Complete);
    complete.sort_by(by_total_desc);
    if options.include_partial {
        complete.extend(partial);
    }

    let limit = options.limit.unwrap_or(usize::MAX);
    complete
        .into_iter()
        .take(limit)
        .zip(1_u32..)
        .map(|(p, rank)| TopTeam {
            rank,
            project_id: Some(p.project_id),
            project_title: p.project_title,
            project_description: truncate_description(&p.problem_statement),
            field: p.field,
            team_name: p.team_name,
            team_members: p.team_members,
            total_score: p.score.total_score.map(round2),
            admin_score: p.score.admin_component.map(round2),
            ai_score: p.score.ai_score.map(round2),
            status: p.score.status,
            is_featured: p.is_featured,
        })
        .collect()
}
