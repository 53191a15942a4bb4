//! Project repository: submissions, attachments, and the featured flag.

use chrono::Utc;

use tek_core::entities::{AttachmentKind, NewProjectSubmission, ProjectSubmission};
use tek_core::responses::{FeatureToggle, FeaturedProject};
use tek_roster::RosterError;
use tek_roster::fields::{character_count, validate_project_submission};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_field, parse_optional_datetime};
use crate::service::TekService;

const SELECT_COLS: &str = "id, team_id, title, problem_statement, technical_description, scientific_reference, field, image_path, diagram_path, design_path, character_count, is_complete, is_featured, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<ProjectSubmission, DatabaseError> {
    let character_count = row.get::<i64>(10)?;
    Ok(ProjectSubmission {
        id: row.get(0)?,
        team_id: row.get(1)?,
        title: row.get(2)?,
        problem_statement: row.get(3)?,
        technical_description: row.get(4)?,
        scientific_reference: row.get(5)?,
        field: parse_field(&row.get::<String>(6)?)?,
        image_path: get_opt_string(row, 7)?,
        diagram_path: get_opt_string(row, 8)?,
        design_path: get_opt_string(row, 9)?,
        character_count: u32::try_from(character_count)
            .map_err(|_| DatabaseError::Query(format!("bad character_count {character_count}")))?,
        is_complete: get_bool(row, 11)?,
        is_featured: get_bool(row, 12)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(13)?.as_deref())?,
        updated_at: parse_optional_datetime(row.get::<Option<String>>(14)?.as_deref())?,
    })
}

const fn attachment_column(kind: AttachmentKind) -> &'static str {
    match kind {
        AttachmentKind::Image => "image_path",
        AttachmentKind::Diagram => "diagram_path",
        AttachmentKind::Design => "design_path",
    }
}

impl TekService {
    /// Submit the project of the team that `member_email` belongs to.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::Roster`] for field constraints,
    /// `CoreError::NotFound` when no team member has the email,
    /// [`DatabaseError::InvalidState`] when the team already submitted.
    pub async fn submit_project(
        &self,
        project: &NewProjectSubmission,
    ) -> Result<ProjectSubmission, DatabaseError> {
        validate_project_submission(project).map_err(RosterError::Fields)?;
        let team_id = self.team_id_for_member_email(&project.member_email).await?;

        let mut rows = self
            .db()
            .conn()
            .query("SELECT id FROM projects WHERE team_id = ?1", [team_id])
            .await?;
        if let Some(row) = rows.next().await? {
            return Err(DatabaseError::InvalidState(format!(
                "team {team_id} already submitted project {}",
                row.get::<i64>(0)?
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO projects (team_id, title, problem_statement, technical_description,
                     scientific_reference, field, character_count, is_complete, is_featured, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0, ?8)",
                libsql::params![
                    team_id,
                    project.title.trim(),
                    project.problem_statement.as_str(),
                    project.technical_description.as_str(),
                    project.scientific_reference.as_str(),
                    project.field.key(),
                    i64::from(character_count(&project.technical_description)),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let id = self.db().conn().last_insert_rowid();
        tracing::info!(project_id = id, team_id, "project submitted");
        self.get_project(id).await
    }

    pub async fn get_project(&self, id: i64) -> Result<ProjectSubmission, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("project", id))?;
        row_to_project(&row)
    }

    /// All projects in submission order (project id ascending).
    pub async fn list_projects(&self) -> Result<Vec<ProjectSubmission>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM projects ORDER BY id"), ())
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Record the stored path of an attachment. The project becomes
    /// complete once all three attachments are present.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown project.
    pub async fn set_attachment(
        &self,
        project_id: i64,
        kind: AttachmentKind,
        path: &str,
    ) -> Result<ProjectSubmission, DatabaseError> {
        let column = attachment_column(kind);
        // SET expressions see the old row, so the new value stands in for its column.
        let complete = AttachmentKind::ALL
            .iter()
            .map(|k| {
                if *k == kind {
                    "?1 IS NOT NULL".to_string()
                } else {
                    format!("{} IS NOT NULL", attachment_column(*k))
                }
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        let changed = self
            .db()
            .conn()
            .execute(
                &format!(
                    "UPDATE projects SET {column} = ?1, updated_at = ?2, is_complete = ({complete})
                     WHERE id = ?3"
                ),
                libsql::params![path, Utc::now().to_rfc3339(), project_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("project", project_id));
        }
        tracing::debug!(project_id, %kind, path, "attachment recorded");
        self.get_project(project_id).await
    }

    /// Flip a project's featured flag. Admin only.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] without an acting admin,
    /// `CoreError::NotFound` for an unknown project.
    pub async fn toggle_featured(&self, project_id: i64) -> Result<FeatureToggle, DatabaseError> {
        self.require_admin()?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE projects SET is_featured = 1 - is_featured WHERE id = ?1",
                [project_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("project", project_id));
        }
        let project = self.get_project(project_id).await?;
        let message = if project.is_featured {
            "project featured"
        } else {
            "project unfeatured"
        };
        tracing::info!(project_id, is_featured = project.is_featured, "featured toggled");
        Ok(FeatureToggle {
            project_id,
            is_featured: project.is_featured,
            message: message.into(),
        })
    }

    /// Featured projects with their team names, in project id order.
    pub async fn featured_projects(&self) -> Result<Vec<FeaturedProject>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.id, p.title, t.team_name, p.field
                 FROM projects p JOIN teams t ON t.id = p.team_id
                 WHERE p.is_featured = 1 ORDER BY p.id",
                (),
            )
            .await?;
        let mut featured = Vec::new();
        while let Some(row) = rows.next().await? {
            featured.push(FeaturedProject {
                id: row.get(0)?,
                title: row.get(1)?,
                team_name: row.get(2)?,
                field: parse_field(&row.get::<String>(3)?)?,
                is_featured: true,
            });
        }
        Ok(featured)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tek_core::enums::Gender;

    use super::*;
    use crate::test_support::helpers::{new_project, new_team, service_as_admin, test_service};

    #[tokio::test]
    async fn submit_project_finds_team_by_member_email() {
        let svc = test_service().await;
        let team = svc
            .register_team(&new_team("Falcons", 3, Gender::Male))
            .await
            .unwrap();
        let project = svc
            .submit_project(&new_project("falcons.3@example.org", "Flood watch"))
            .await
            .unwrap();

        assert_eq!(project.team_id, team.id);
        assert_eq!(project.character_count, 1_000);
        assert!(!project.is_complete);
        assert!(!project.is_featured);
        assert!(!project.has_attachments());
    }

    #[tokio::test]
    async fn unknown_member_email_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .submit_project(&new_project("ghost@example.org", "Flood watch"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn short_description_is_rejected() {
        let svc = test_service().await;
        let mut project = new_project("falcons.1@example.org", "Flood watch");
        project.technical_description = "too short".into();
        let err = svc.submit_project(&project).await.unwrap_err();
        let DatabaseError::Roster(RosterError::Fields(fields)) = err else {
            panic!("expected field errors, got {err}");
        };
        assert!(fields.has("technical_description"));
    }

    #[tokio::test]
    async fn second_submission_is_rejected() {
        let svc = test_service().await;
        svc.register_team(&new_team("Falcons", 3, Gender::Male))
            .await
            .unwrap();
        svc.submit_project(&new_project("falcons.1@example.org", "Flood watch"))
            .await
            .unwrap();
        let err = svc
            .submit_project(&new_project("falcons.2@example.org", "Another idea"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[tokio::test]
    async fn project_completes_with_all_attachments() {
        let svc = test_service().await;
        svc.register_team(&new_team("Falcons", 3, Gender::Male))
            .await
            .unwrap();
        let project = svc
            .submit_project(&new_project("falcons.1@example.org", "Flood watch"))
            .await
            .unwrap();

        let after_one = svc
            .set_attachment(project.id, AttachmentKind::Image, "uploads/1_image.png")
            .await
            .unwrap();
        assert!(!after_one.is_complete);
        svc.set_attachment(project.id, AttachmentKind::Diagram, "uploads/1_diagram.png")
            .await
            .unwrap();
        let done = svc
            .set_attachment(project.id, AttachmentKind::Design, "uploads/1_design.pdf")
            .await
            .unwrap();
        assert!(done.is_complete);
        assert_eq!(done.attachment(AttachmentKind::Design), Some("uploads/1_design.pdf"));
        assert!(done.updated_at.is_some());
    }

    #[tokio::test]
    async fn toggle_featured_flips_and_lists() {
        let svc = service_as_admin(false).await;
        svc.register_team(&new_team("Falcons", 3, Gender::Male))
            .await
            .unwrap();
        let project = svc
            .submit_project(&new_project("falcons.1@example.org", "Flood watch"))
            .await
            .unwrap();

        let on = svc.toggle_featured(project.id).await.unwrap();
        assert!(on.is_featured);
        let listed = svc.featured_projects().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].team_name, "Falcons");

        let off = svc.toggle_featured(project.id).await.unwrap();
        assert!(!off.is_featured);
        assert!(svc.featured_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_unknown_project_is_not_found() {
        let svc = service_as_admin(false).await;
        assert!(svc.toggle_featured(7).await.unwrap_err().is_not_found());
    }
}
