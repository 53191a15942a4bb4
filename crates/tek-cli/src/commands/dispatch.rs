use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Roster { action } => commands::roster::handle(&action, ctx, flags).await,
        Commands::Member { action } => commands::member::handle(&action, ctx, flags).await,
        Commands::Team { action } => commands::team::handle(&action, ctx, flags).await,
        Commands::Individual { action } => commands::individual::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Eval { action } => commands::eval::handle(&action, ctx, flags).await,
        Commands::Admin { action } => commands::admin::handle(&action, ctx, flags).await,
    }
}
