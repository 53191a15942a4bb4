use anyhow::Context;
use tek_core::entities::{Individual, NewIndividual};
use tek_roster::fields::validate_new_individual;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IndividualCommands;
use crate::commands::shared::parse::read_json;
use crate::context::{AppContext, Backend};
use crate::output::output;

async fn register(individual: &NewIndividual, ctx: &AppContext) -> anyhow::Result<Individual> {
    validate_new_individual(individual).context("individual registration rejected")?;
    let created = match &ctx.backend {
        Backend::Remote(client) => client.register_individual(individual).await?,
        Backend::Local(service) => service.register_individual(individual).await?,
    };
    Ok(created)
}

/// Handle `tkf individual <subcommand>`.
pub async fn handle(
    action: &IndividualCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IndividualCommands::Register(args) => {
            let individual: NewIndividual = read_json(&args.file)?;
            output(&register(&individual, ctx).await?, flags.format)
        }
        IndividualCommands::List(args) => {
            let mut individuals = match &ctx.backend {
                Backend::Remote(client) => client.individuals(args.unassigned).await?,
                Backend::Local(service) => service.list_individuals(args.unassigned).await?,
            };
            if let Some(limit) = flags.limit {
                individuals.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            output(&individuals, flags.format)
        }
        IndividualCommands::Assign(args) => {
            let result = match &ctx.backend {
                Backend::Remote(client) => {
                    client
                        .assign_individuals(&args.ids, &args.name, args.field)
                        .await?
                }
                Backend::Local(service) => {
                    service
                        .assign_individuals(&args.ids, &args.name, args.field)
                        .await?
                }
            };
            output(&result, flags.format)
        }
        IndividualCommands::AddToTeam(args) => {
            let result = match &ctx.backend {
                Backend::Remote(client) => client.add_to_team(args.team_id, &args.ids).await?,
                Backend::Local(service) => service.add_to_team(args.team_id, &args.ids).await?,
            };
            output(&result, flags.format)
        }
    }
}
