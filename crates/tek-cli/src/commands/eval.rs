use anyhow::Context;
use tek_core::entities::Evaluation;
use tek_core::responses::TopTeam;
use tek_scoring::{RankOptions, validate_admin_score};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EvalCommands;
use crate::cli::subcommands::eval::{EvalAdminArgs, EvalAiArgs, EvalTopTeamsArgs};
use crate::commands::shared::limit::effective_limit;
use crate::context::{AppContext, Backend};
use crate::output::output;
use crate::progress::Progress;

/// Handle `tkf eval <subcommand>`.
pub async fn handle(
    action: &EvalCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EvalCommands::Admin(args) => output(&admin(args, ctx).await?, flags.format),
        EvalCommands::Ai(args) => ai(args, ctx, flags).await,
        EvalCommands::TopTeams(args) => top_teams(args, ctx, flags).await,
        EvalCommands::Details(args) => {
            let details = match &ctx.backend {
                Backend::Remote(client) => client.project_details(args.project_id).await?,
                Backend::Local(service) => service.project_details(args.project_id).await?,
            };
            output(&details, flags.format)
        }
        EvalCommands::Stats => {
            let stats = match &ctx.backend {
                Backend::Remote(client) => client.evaluation_stats().await?,
                Backend::Local(service) => service.evaluation_stats().await?,
            };
            output(&stats, flags.format)
        }
    }
}

/// Rows scanned for featured entries when the API cannot filter them.
const FEATURED_SCAN_LIMIT: u32 = 100;

async fn admin(args: &EvalAdminArgs, ctx: &AppContext) -> anyhow::Result<Evaluation> {
    validate_admin_score(args.score)?;
    let evaluation = match &ctx.backend {
        Backend::Remote(client) => {
            client
                .submit_admin_evaluation(args.project, args.score, args.notes.clone())
                .await?
        }
        Backend::Local(service) => {
            service
                .submit_admin_evaluation(args.project, args.score, args.notes.as_deref())
                .await?
        }
    };
    Ok(evaluation)
}

async fn ai(args: &EvalAiArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let evaluation = match &ctx.backend {
        Backend::Remote(client) => {
            if args.score.is_some() || args.notes.is_some() {
                tracing::warn!("the API scores projects itself; --score and --notes are ignored");
            }
            let progress = Progress::spinner("waiting for the AI evaluator");
            let evaluation = client.request_ai_evaluation(args.project).await?;
            progress.finish_clear();
            evaluation
        }
        Backend::Local(service) => {
            let score = args
                .score
                .context("--score is required with --local (there is no AI evaluator offline)")?;
            service
                .record_ai_evaluation(args.project, score, args.notes.as_deref())
                .await?
        }
    };
    output(&evaluation, flags.format)
}

async fn top_teams(
    args: &EvalTopTeamsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let rows = match &ctx.backend {
        Backend::Remote(client) => {
            if args.include_partial {
                tracing::warn!("the API only lists complete totals; --include-partial is ignored");
            }
            if args.featured {
                let rows = client.top_teams(limit.max(FEATURED_SCAN_LIMIT)).await?;
                featured_only(rows, limit)
            } else {
                client.top_teams(limit).await?
            }
        }
        Backend::Local(service) => {
            let options = RankOptions {
                limit: Some(usize::try_from(limit).unwrap_or(usize::MAX)),
                include_partial: args.include_partial,
                featured_only: args.featured,
            };
            service.top_teams(&options).await?
        }
    };
    output(&rows, flags.format)
}

/// Keep at most `limit` featured rows and renumber them from 1.
fn featured_only(rows: Vec<TopTeam>, limit: u32) -> Vec<TopTeam> {
    rows.into_iter()
        .filter(|r| r.is_featured)
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .zip(1_u32..)
        .map(|(row, rank)| TopTeam { rank, ..row })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tek_core::enums::{ProjectField, ScoreStatus};
    use tek_scoring::{ScoreKind, ScoringError};

    use super::*;

    fn row(rank: u32, featured: bool) -> TopTeam {
        TopTeam {
            rank,
            project_id: Some(i64::from(rank)),
            project_title: format!("Project {rank}"),
            project_description: String::new(),
            field: ProjectField::Fintech,
            team_name: format!("Team {rank}"),
            team_members: Vec::new(),
            total_score: Some(50.0),
            admin_score: Some(40.0),
            ai_score: Some(10.0),
            status: ScoreStatus::Complete,
            is_featured: featured,
        }
    }

    #[test]
    fn featured_rows_are_renumbered() {
        let rows = featured_only(vec![row(1, false), row(2, true), row(3, true)], 5);
        let ranks: Vec<(u32, Option<i64>)> = rows.iter().map(|r| (r.rank, r.project_id)).collect();
        assert_eq!(ranks, vec![(1, Some(2)), (2, Some(3))]);
    }

    #[test]
    fn featured_rows_fill_the_limit_from_deeper_ranks() {
        let rows: Vec<TopTeam> = (1..=20).map(|rank| row(rank, rank % 4 == 0)).collect();
        let rows = featured_only(rows, 3);
        let ids: Vec<Option<i64>> = rows.iter().map(|r| r.project_id).collect();
        assert_eq!(ids, vec![Some(4), Some(8), Some(12)]);
        assert_eq!(rows.last().map(|r| r.rank), Some(3));
    }

    #[rstest]
    #[case(80.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[tokio::test]
    async fn out_of_range_admin_score_is_rejected_before_sending(#[case] score: f64) {
        let ctx = AppContext::offline();
        let args = EvalAdminArgs {
            project: 1,
            score,
            notes: None,
        };
        let err = admin(&args, &ctx).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScoringError>(),
            Some(ScoringError::ScoreRange {
                kind: ScoreKind::Admin,
                ..
            })
        ));
    }
}
