use clap::{Args, Subcommand};

/// Evaluation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EvalCommands {
    /// Submit or update your score for a project (0-75).
    Admin(EvalAdminArgs),
    /// Record the AI score for a project (0-25).
    Ai(EvalAiArgs),
    /// Ranked leaderboard.
    #[command(name = "top-teams")]
    TopTeams(EvalTopTeamsArgs),
    /// Per-admin breakdown of one project.
    Details(EvalDetailsArgs),
    /// Evaluation coverage and averages.
    Stats,
}

#[derive(Clone, Debug, Args)]
pub struct EvalAdminArgs {
    #[arg(long)]
    pub project: i64,
    #[arg(long)]
    pub score: f64,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EvalAiArgs {
    #[arg(long)]
    pub project: i64,
    /// Required with --local; the API computes its own score.
    #[arg(long)]
    pub score: Option<f64>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EvalTopTeamsArgs {
    /// Append projects without a complete total after the ranked ones.
    #[arg(long)]
    pub include_partial: bool,
    /// Only featured projects.
    #[arg(long)]
    pub featured: bool,
}

#[derive(Clone, Debug, Args)]
pub struct EvalDetailsArgs {
    pub project_id: i64,
}
