use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Team registration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TeamCommands {
    /// Verify and register a team draft.
    Register(TeamRegisterArgs),
    /// List active teams with their rosters.
    List,
    /// Show one team and its roster.
    Show(TeamShowArgs),
    /// Active teams that can still take members.
    #[command(name = "list-with-space")]
    ListWithSpace,
}

#[derive(Clone, Debug, Args)]
pub struct TeamShowArgs {
    pub team_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct TeamRegisterArgs {
    /// Team draft JSON.
    pub draft: PathBuf,
}
