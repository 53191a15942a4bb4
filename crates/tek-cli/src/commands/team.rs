use anyhow::Context;
use tek_core::entities::{NewTeam, Team};
use tek_roster::fields::validate_new_team_fields;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TeamCommands;
use crate::cli::subcommands::team::TeamRegisterArgs;
use crate::commands::roster::verify_draft;
use crate::commands::shared::parse::read_json;
use crate::context::{AppContext, Backend};
use crate::output::output;
use crate::progress::Progress;

/// Handle `tkf team <subcommand>`.
pub async fn handle(
    action: &TeamCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TeamCommands::Register(args) => register(args, ctx, flags).await,
        TeamCommands::List => {
            let mut teams = active_teams(ctx).await?;
            if let Some(limit) = flags.limit {
                teams.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            output(&teams, flags.format)
        }
        TeamCommands::Show(args) => {
            let team = match &ctx.backend {
                Backend::Remote(client) => client.team(args.team_id).await?,
                Backend::Local(service) => service.get_team(args.team_id).await?,
            };
            output(&team, flags.format)
        }
        TeamCommands::ListWithSpace => {
            let teams = match &ctx.backend {
                Backend::Remote(client) => client.teams_with_space().await?,
                Backend::Local(service) => service.teams_with_space().await?,
            };
            output(&teams, flags.format)
        }
    }
}

/// Active teams in registration order.
async fn active_teams(ctx: &AppContext) -> anyhow::Result<Vec<Team>> {
    let teams = match &ctx.backend {
        Backend::Remote(client) => client.teams().await?,
        Backend::Local(service) => service.list_teams().await?,
    };
    Ok(teams.into_iter().filter(|t| t.is_active).collect())
}

async fn register(
    args: &TeamRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft: NewTeam = read_json(&args.draft)?;
    let (session, _) = verify_draft(ctx, draft).await?;
    session
        .validate()
        .context("roster is not ready; run `tkf roster check` for details")?;
    let payload = session.to_new_team();
    validate_new_team_fields(&payload).context("team registration rejected")?;

    let progress = Progress::spinner("registering team");
    let team = match &ctx.backend {
        Backend::Remote(client) => client.register_team(&payload).await?,
        Backend::Local(service) => service.register_team(&payload).await?,
    };
    progress.finish_ok("team registered");
    tracing::info!(team_id = team.id, team_name = %team.team_name, "team registered");
    output(&team, flags.format)
}
