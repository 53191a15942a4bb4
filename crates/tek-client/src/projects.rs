//! `/projects` endpoints: submission and attachments.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use tek_core::entities::{AttachmentKind, NewProjectSubmission, ProjectSubmission};
use tek_core::enums::ProjectField;

use crate::{ApiClient, error::ClientError};

impl ApiClient {
    /// Submit a team's project.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a rejected submission.
    pub async fn submit_project(
        &self,
        project: &NewProjectSubmission,
    ) -> Result<ProjectSubmission, ClientError> {
        self.send(self.post("/projects/submit").json(project)).await
    }

    /// Submitted projects, newest first, optionally for one field.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn projects(
        &self,
        field: Option<ProjectField>,
    ) -> Result<Vec<ProjectSubmission>, ClientError> {
        self.send(projects_query(self.get("/projects/"), field)).await
    }

    /// One project by id. Score fields in the response are ignored; use
    /// `project_details` for the breakdown.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] for an unknown project, otherwise
    /// [`ClientError`].
    pub async fn project(&self, project_id: i64) -> Result<ProjectSubmission, ClientError> {
        self.send(self.get(&format!("/projects/{project_id}"))).await
    }

    /// Upload attachment files for a submitted project.
    ///
    /// # Errors
    ///
    /// [`ClientError::Io`] when a file cannot be read, otherwise
    /// [`ClientError`] on transport failure or a rejected upload.
    pub async fn upload_attachments(
        &self,
        project_id: i64,
        files: &[(AttachmentKind, PathBuf)],
    ) -> Result<ProjectSubmission, ClientError> {
        let mut form = Form::new();
        for (kind, path) in files {
            form = form.part(kind.as_str(), file_part(path).await?);
        }
        tracing::debug!(project_id, files = files.len(), "uploading attachments");
        self.send(
            self.post(&format!("/projects/{project_id}/attachments"))
                .multipart(form),
        )
        .await
    }
}

fn projects_query(
    builder: reqwest::RequestBuilder,
    field: Option<ProjectField>,
) -> reqwest::RequestBuilder {
    match field {
        Some(field) => builder.query(&[("field", field.as_str())]),
        None => builder,
    }
}

async fn file_part(path: &Path) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Part::bytes(bytes).file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tek_config::ApiConfig;

    #[test]
    fn project_listing_filters_by_field_label() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let request = projects_query(client.get("/projects/"), Some(ProjectField::Fintech))
            .build()
            .unwrap();
        assert!(request.url().path().ends_with("/projects/"));
        let (key, value) = request.url().query_pairs().next().unwrap();
        assert_eq!(key, "field");
        assert_eq!(value, ProjectField::Fintech.as_str());

        let unfiltered = projects_query(client.get("/projects/"), None).build().unwrap();
        assert_eq!(unfiltered.url().query(), None);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = file_part(Path::new("/nonexistent/diagram.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io { ref path, .. } if path.ends_with("diagram.png")));
    }

    #[test]
    fn parse_submission_fixture() {
        let fixture = format!(
            r#"{{
                "id": 8,
                "team_id": 3,
                "title": "Flood watch",
                "problem_statement": "p",
                "technical_description": "t",
                "scientific_reference": "r",
                "field": "{}",
                "image_path": "uploads/8_image.png",
                "diagram_path": null,
                "design_path": null,
                "character_count": 1204,
                "is_complete": false,
                "is_featured": false,
                "created_at": "2025-03-01T10:00:00Z",
                "updated_at": null
            }}"#,
            ProjectField::EnvironmentEnergy.as_str()
        );
        let project: ProjectSubmission = serde_json::from_str(&fixture).unwrap();
        assert_eq!(project.character_count, 1204);
        assert_eq!(project.attachment(AttachmentKind::Image), Some("uploads/8_image.png"));
        assert!(project.created_at.is_some());
    }
}
