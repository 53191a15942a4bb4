use std::path::PathBuf;

use clap::{Args, Subcommand};
use tek_core::enums::ProjectField;

/// Project submission commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Submit a project from a JSON file.
    Submit(ProjectSubmitArgs),
    /// List submitted projects.
    List(ProjectListArgs),
    /// Show one project.
    Show(ProjectShowArgs),
    /// Attach files to a submitted project.
    Attach(ProjectAttachArgs),
    /// Toggle a project's featured flag (admin).
    Feature(ProjectFeatureArgs),
    /// List featured projects.
    Featured,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectSubmitArgs {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectListArgs {
    /// Only projects in this competition field (key or label).
    #[arg(long)]
    pub field: Option<ProjectField>,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectShowArgs {
    pub project_id: i64,
}

#[derive(Clone, Debug, Args)]
#[command(group(clap::ArgGroup::new("attachments").required(true).multiple(true)))]
pub struct ProjectAttachArgs {
    pub project_id: i64,
    #[arg(long, group = "attachments")]
    pub image: Option<PathBuf>,
    #[arg(long, group = "attachments")]
    pub diagram: Option<PathBuf>,
    #[arg(long, group = "attachments")]
    pub design: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectFeatureArgs {
    pub project_id: i64,
}
