//! Evaluation repository: per-admin scores and the single AI score.

use chrono::Utc;

use tek_core::entities::Evaluation;
use tek_scoring::{ScoringError, validate_admin_score, validate_ai_score};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_optional_datetime};
use crate::service::TekService;

const SELECT_COLS: &str = "id, project_id, admin_id, is_ai_evaluation, score, notes, created_at";

fn row_to_evaluation(row: &libsql::Row) -> Result<Evaluation, DatabaseError> {
    Ok(Evaluation {
        id: row.get(0)?,
        project_id: row.get(1)?,
        admin_id: row.get::<Option<i64>>(2)?,
        is_ai_evaluation: get_bool(row, 3)?,
        score: row.get(4)?,
        notes: get_opt_string(row, 5)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(6)?.as_deref())?,
    })
}

impl TekService {
    async fn ensure_project(&self, project_id: i64) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM projects WHERE id = ?1", [project_id])
            .await?;
        if rows.next().await?.is_none() {
            return Err(ScoringError::ProjectNotFound(project_id).into());
        }
        Ok(())
    }

    /// Record the acting admin's score for a project.
    ///
    /// Idempotent per (admin, project): a second call replaces the score and
    /// notes of the first instead of adding a row.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] without an acting admin,
    /// [`DatabaseError::Scoring`] for a score outside 0..=75 or an unknown
    /// project.
    pub async fn submit_admin_evaluation(
        &self,
        project_id: i64,
        score: f64,
        notes: Option<&str>,
    ) -> Result<Evaluation, DatabaseError> {
        let admin = self.require_admin()?;
        validate_admin_score(score)?;
        self.ensure_project(project_id).await?;

        let now = Utc::now().to_rfc3339();
        self.db()
            .conn()
            .execute(
                "INSERT INTO evaluations (project_id, admin_id, is_ai_evaluation, score, notes, created_at)
                 VALUES (?1, ?2, 0, ?3, ?4, ?5)
                 ON CONFLICT (project_id, admin_id) WHERE is_ai_evaluation = 0
                 DO UPDATE SET score = excluded.score, notes = excluded.notes, updated_at = excluded.created_at",
                libsql::params![project_id, admin.admin_id, score, notes, now.as_str()],
            )
            .await?;
        tracing::info!(project_id, admin_id = admin.admin_id, score, "admin evaluation recorded");

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM evaluations
                     WHERE project_id = ?1 AND admin_id = ?2 AND is_ai_evaluation = 0"
                ),
                libsql::params![project_id, admin.admin_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_evaluation(&row)
    }

    /// Record the AI evaluator's score for a project, replacing any earlier
    /// AI score. Admin only.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] without an acting admin,
    /// [`DatabaseError::Scoring`] for a score outside 0..=25 or an unknown
    /// project.
    pub async fn record_ai_evaluation(
        &self,
        project_id: i64,
        score: f64,
        notes: Option<&str>,
    ) -> Result<Evaluation, DatabaseError> {
        self.require_admin()?;
        validate_ai_score(score)?;
        self.ensure_project(project_id).await?;

        let now = Utc::now().to_rfc3339();
        self.db()
            .conn()
            .execute(
                "INSERT INTO evaluations (project_id, admin_id, is_ai_evaluation, score, notes, created_at)
                 VALUES (?1, NULL, 1, ?2, ?3, ?4)
                 ON CONFLICT (project_id) WHERE is_ai_evaluation = 1
                 DO UPDATE SET score = excluded.score, notes = excluded.notes, updated_at = excluded.created_at",
                libsql::params![project_id, score, notes, now.as_str()],
            )
            .await?;
        tracing::info!(project_id, score, "AI evaluation recorded");

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM evaluations WHERE project_id = ?1 AND is_ai_evaluation = 1"
                ),
                [project_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_evaluation(&row)
    }

    pub async fn project_evaluations(
        &self,
        project_id: i64,
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        self.ensure_project(project_id).await?;
        self.query_evaluations(
            &format!("SELECT {SELECT_COLS} FROM evaluations WHERE project_id = ?1 ORDER BY id"),
            [project_id],
        )
        .await
    }

    pub async fn all_evaluations(&self) -> Result<Vec<Evaluation>, DatabaseError> {
        self.query_evaluations(
            &format!("SELECT {SELECT_COLS} FROM evaluations ORDER BY project_id, id"),
            (),
        )
        .await
    }

    async fn query_evaluations(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Evaluation>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let mut evaluations = Vec::new();
        while let Some(row) = rows.next().await? {
            evaluations.push(row_to_evaluation(&row)?);
        }
        Ok(evaluations)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tek_core::enums::Gender;
    use tek_scoring::ScoreKind;

    use super::*;
    use crate::test_support::helpers::{new_project, new_team, service_as_admin, test_service};

    async fn seeded_project(svc: &TekService) -> i64 {
        svc.register_team(&new_team("Falcons", 3, Gender::Male))
            .await
            .unwrap();
        svc.submit_project(&new_project("falcons.1@example.org", "Flood watch"))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn admin_resubmission_updates_in_place() {
        let svc = service_as_admin(false).await;
        let project_id = seeded_project(&svc).await;

        let first = svc
            .submit_admin_evaluation(project_id, 50.0, Some("promising"))
            .await
            .unwrap();
        let second = svc
            .submit_admin_evaluation(project_id, 62.5, Some("stronger after review"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 62.5);
        assert_eq!(second.notes.as_deref(), Some("stronger after review"));
        assert_eq!(svc.project_evaluations(project_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ai_rerequest_replaces_previous_score() {
        let svc = service_as_admin(false).await;
        let project_id = seeded_project(&svc).await;

        svc.record_ai_evaluation(project_id, 18.0, None).await.unwrap();
        let replaced = svc
            .record_ai_evaluation(project_id, 21.0, Some("rerun"))
            .await
            .unwrap();

        let evaluations = svc.project_evaluations(project_id).await.unwrap();
        assert_eq!(evaluations.len(), 1);
        assert_eq!(evaluations[0], replaced);
        assert!(replaced.is_ai_evaluation);
        assert_eq!(replaced.admin_id, None);
    }

    #[tokio::test]
    async fn out_of_range_scores_are_rejected() {
        let svc = service_as_admin(false).await;
        let project_id = seeded_project(&svc).await;

        let err = svc
            .submit_admin_evaluation(project_id, 80.0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Scoring(ScoringError::ScoreRange {
                kind: ScoreKind::Admin,
                ..
            })
        ));
        let err = svc
            .record_ai_evaluation(project_id, 26.0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Scoring(ScoringError::ScoreRange {
                kind: ScoreKind::Ai,
                ..
            })
        ));
        assert!(svc.all_evaluations().await.unwrap().is_empty());
    }

    #[rstest]
    #[case::admin_floor(0.0, true)]
    #[case::admin_ceiling(75.0, true)]
    #[case::admin_over(75.5, false)]
    #[case::negative(-1.0, false)]
    #[tokio::test]
    async fn admin_score_bounds(#[case] score: f64, #[case] accepted: bool) {
        let svc = service_as_admin(false).await;
        let project_id = seeded_project(&svc).await;
        let result = svc.submit_admin_evaluation(project_id, score, None).await;
        assert_eq!(result.is_ok(), accepted);
    }

    #[tokio::test]
    async fn evaluating_unknown_project_is_not_found() {
        let svc = service_as_admin(false).await;
        let err = svc
            .submit_admin_evaluation(99, 40.0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Scoring(ScoringError::ProjectNotFound(99))
        ));
    }

    #[tokio::test]
    async fn evaluation_requires_an_admin() {
        let svc = test_service().await;
        let project_id = seeded_project(&svc).await;
        let err = svc
            .submit_admin_evaluation(project_id, 40.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::PermissionDenied(_)));
    }
}
