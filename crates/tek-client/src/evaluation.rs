//! `/evaluation` endpoints: scoring, leaderboard, and featured projects.

use tek_core::entities::{AiEvaluationRequest, Evaluation, NewAdminEvaluation};
use tek_core::responses::{
    EvaluationStats, FeatureToggle, FeaturedProject, ProjectDetails, TopTeam,
};

use crate::{ApiClient, error::ClientError};

impl ApiClient {
    /// Submit or update the caller's evaluation of a project. Admin only.
    ///
    /// The API keeps one evaluation per admin and project; resubmitting
    /// replaces the score and notes.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`] on
    /// transport failure or a rejected score.
    pub async fn submit_admin_evaluation(
        &self,
        project_id: i64,
        score: f64,
        notes: Option<String>,
    ) -> Result<Evaluation, ClientError> {
        self.require_token()?;
        let body = NewAdminEvaluation {
            project_id,
            score,
            notes,
            is_ai_evaluation: false,
        };
        self.send(self.post("/evaluation/admin").json(&body)).await
    }

    /// Ask the API to run the AI evaluator on a project. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, [`ClientError::NotFound`] for
    /// an unknown project, otherwise [`ClientError`].
    pub async fn request_ai_evaluation(&self, project_id: i64) -> Result<Evaluation, ClientError> {
        self.require_token()?;
        let body = AiEvaluationRequest { project_id };
        self.send(self.post("/evaluation/ai").json(&body)).await
    }

    /// Highest complete totals first, at most `limit` rows.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn top_teams(&self, limit: u32) -> Result<Vec<TopTeam>, ClientError> {
        self.send(
            self.get("/evaluation/top-teams")
                .query(&[("limit", limit)]),
        )
        .await
    }

    /// Every evaluation of a project with the evaluating admin. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, [`ClientError::NotFound`] for
    /// an unknown project, otherwise [`ClientError`].
    pub async fn project_details(&self, project_id: i64) -> Result<ProjectDetails, ClientError> {
        self.require_token()?;
        self.send(self.get(&format!("/evaluation/project/{project_id}/details")))
            .await
    }

    /// Flip the featured flag of a project. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, [`ClientError::NotFound`] for
    /// an unknown project, otherwise [`ClientError`].
    pub async fn toggle_featured(&self, project_id: i64) -> Result<FeatureToggle, ClientError> {
        self.require_token()?;
        self.send(self.post(&format!("/evaluation/feature/{project_id}")))
            .await
    }

    /// Projects currently marked as featured.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn featured_projects(&self) -> Result<Vec<FeaturedProject>, ClientError> {
        self.send(self.get("/evaluation/featured-projects")).await
    }

    /// Evaluation coverage across all projects. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`].
    pub async fn evaluation_stats(&self) -> Result<EvaluationStats, ClientError> {
        self.require_token()?;
        self.send(self.get("/evaluation/stats")).await
    }
}
