use std::path::PathBuf;

use anyhow::{Context, bail};
use tek_core::entities::{AttachmentKind, NewProjectSubmission, ProjectSubmission};
use tek_core::enums::ProjectField;
use tek_roster::fields::validate_project_submission;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::cli::subcommands::project::ProjectAttachArgs;
use crate::commands::shared::parse::read_json;
use crate::context::{AppContext, Backend};
use crate::output::output;
use crate::progress::Progress;

fn attachments(args: &ProjectAttachArgs) -> Vec<(AttachmentKind, PathBuf)> {
    [
        (AttachmentKind::Image, &args.image),
        (AttachmentKind::Diagram, &args.diagram),
        (AttachmentKind::Design, &args.design),
    ]
    .into_iter()
    .filter_map(|(kind, path)| path.clone().map(|p| (kind, p)))
    .collect()
}

async fn submit(
    project: &NewProjectSubmission,
    ctx: &AppContext,
) -> anyhow::Result<ProjectSubmission> {
    validate_project_submission(project).context("project submission rejected")?;
    let submitted = match &ctx.backend {
        Backend::Remote(client) => client.submit_project(project).await?,
        Backend::Local(service) => service.submit_project(project).await?,
    };
    Ok(submitted)
}

/// Newest first, as the API lists them.
async fn list(
    field: Option<ProjectField>,
    ctx: &AppContext,
) -> anyhow::Result<Vec<ProjectSubmission>> {
    let mut projects = match &ctx.backend {
        Backend::Remote(client) => client.projects(field).await?,
        Backend::Local(service) => {
            let mut projects = service.list_projects().await?;
            projects.reverse();
            projects
        }
    };
    if let Some(field) = field {
        projects.retain(|p| p.field == field);
    }
    Ok(projects)
}

/// Handle `tkf project <subcommand>`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Submit(args) => {
            let project: NewProjectSubmission = read_json(&args.file)?;
            output(&submit(&project, ctx).await?, flags.format)
        }
        ProjectCommands::List(args) => {
            let mut projects = list(args.field, ctx).await?;
            if let Some(limit) = flags.limit {
                projects.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            output(&projects, flags.format)
        }
        ProjectCommands::Show(args) => {
            let project = match &ctx.backend {
                Backend::Remote(client) => client.project(args.project_id).await?,
                Backend::Local(service) => service.get_project(args.project_id).await?,
            };
            output(&project, flags.format)
        }
        ProjectCommands::Attach(args) => {
            let files = attachments(args);
            let project = match &ctx.backend {
                Backend::Remote(client) => {
                    let progress = Progress::spinner(&format!("uploading {} files", files.len()));
                    let project = client.upload_attachments(args.project_id, &files).await?;
                    progress.finish_ok("attachments uploaded");
                    project
                }
                // The local store records paths; the files stay where they are.
                Backend::Local(service) => {
                    let mut latest = None;
                    for (kind, path) in &files {
                        if !path.is_file() {
                            bail!("{kind} attachment not found: {}", path.display());
                        }
                        latest = Some(
                            service
                                .set_attachment(args.project_id, *kind, &path.to_string_lossy())
                                .await?,
                        );
                    }
                    match latest {
                        Some(project) => project,
                        None => service.get_project(args.project_id).await?,
                    }
                }
            };
            output(&project, flags.format)
        }
        ProjectCommands::Feature(args) => {
            let toggle = match &ctx.backend {
                Backend::Remote(client) => client.toggle_featured(args.project_id).await?,
                Backend::Local(service) => service.toggle_featured(args.project_id).await?,
            };
            output(&toggle, flags.format)
        }
        ProjectCommands::Featured => {
            let projects = match &ctx.backend {
                Backend::Remote(client) => client.featured_projects().await?,
                Backend::Local(service) => service.featured_projects().await?,
            };
            output(&projects, flags.format)
        }
    }
}
