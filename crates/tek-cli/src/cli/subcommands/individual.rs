use std::path::PathBuf;

use clap::{Args, Subcommand};
use tek_core::enums::ProjectField;

/// Individual registration and triage commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IndividualCommands {
    /// Register an individual from a JSON file.
    Register(IndividualRegisterArgs),
    /// List registered individuals.
    List(IndividualListArgs),
    /// Group individuals into a new team (admin).
    Assign(IndividualAssignArgs),
    /// Add individuals to an existing team (admin).
    #[command(name = "add-to-team")]
    AddToTeam(IndividualAddToTeamArgs),
}

#[derive(Clone, Debug, Args)]
pub struct IndividualRegisterArgs {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct IndividualListArgs {
    /// Only individuals not yet placed in a team.
    #[arg(long)]
    pub unassigned: bool,
}

#[derive(Clone, Debug, Args)]
pub struct IndividualAssignArgs {
    /// Individual ids; the first becomes leader.
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<i64>,
    /// Name of the new team.
    #[arg(long)]
    pub name: String,
    /// Competition field key or label.
    #[arg(long)]
    pub field: ProjectField,
}

#[derive(Clone, Debug, Args)]
pub struct IndividualAddToTeamArgs {
    pub team_id: i64,
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<i64>,
}
