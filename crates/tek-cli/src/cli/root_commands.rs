use clap::Subcommand;

use crate::cli::subcommands::{
    AdminCommands, EvalCommands, IndividualCommands, MemberCommands, ProjectCommands,
    RosterCommands, TeamCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check a team draft before registering it.
    Roster {
        #[command(subcommand)]
        action: RosterCommands,
    },
    /// Membership number lookups.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Team registration.
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Individual registration and triage into teams.
    Individual {
        #[command(subcommand)]
        action: IndividualCommands,
    },
    /// Project submission and featuring.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Evaluation, leaderboard, and statistics.
    Eval {
        #[command(subcommand)]
        action: EvalCommands,
    },
    /// Admin accounts, sessions, and weights.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
}
