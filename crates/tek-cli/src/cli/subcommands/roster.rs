use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Roster draft commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RosterCommands {
    /// Verify membership numbers in a team draft and validate it.
    Check(RosterCheckArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RosterCheckArgs {
    /// Team draft JSON (same shape as `team register`).
    pub draft: PathBuf,
}
