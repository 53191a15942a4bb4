//! Leaderboard, per-project details, and evaluation statistics.
//!
//! Loads rows from the store and hands them to `tek-scoring`, which owns
//! every aggregation rule.

use std::collections::HashMap;

use tek_core::responses::{EvaluationStats, ProjectDetails, ProjectScore, TopTeam};
use tek_scoring::details::project_details;
use tek_scoring::stats::evaluation_stats;
use tek_scoring::{RankOptions, RankedProject, WeightTable, rank_top_teams, score_project};

use crate::error::DatabaseError;
use crate::service::TekService;

impl TekService {
    /// Current admin weights, with the configured default for unknown admins.
    pub async fn weight_table(&self) -> Result<WeightTable, DatabaseError> {
        let admins = self.list_admins().await?;
        Ok(WeightTable::from_admins(&admins, self.default_weight()))
    }

    /// Aggregate score of one project.
    ///
    /// # Errors
    ///
    /// `ScoringError::ProjectNotFound` if the project does not exist.
    pub async fn project_score(&self, project_id: i64) -> Result<ProjectScore, DatabaseError> {
        let evaluations = self.project_evaluations(project_id).await?;
        let weights = self.weight_table().await?;
        Ok(score_project(project_id, &evaluations, &weights))
    }

    /// Ranked leaderboard of submitted projects.
    pub async fn top_teams(&self, options: &RankOptions) -> Result<Vec<TopTeam>, DatabaseError> {
        let projects = self.list_projects().await?;
        let teams: HashMap<i64, _> = self
            .list_teams()
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
        let weights = self.weight_table().await?;

        let mut by_project: HashMap<i64, Vec<_>> = HashMap::new();
        for evaluation in self.all_evaluations().await? {
            by_project
                .entry(evaluation.project_id)
                .or_default()
                .push(evaluation);
        }

        let ranked = projects
            .into_iter()
            .map(|project| {
                let team = teams
                    .get(&project.team_id)
                    .ok_or_else(|| DatabaseError::not_found("team", project.team_id))?;
                let evaluations = by_project.remove(&project.id).unwrap_or_default();
                Ok(RankedProject {
                    project_id: project.id,
                    score: score_project(project.id, &evaluations, &weights),
                    project_title: project.title,
                    problem_statement: project.problem_statement,
                    field: project.field,
                    team_name: team.team_name.clone(),
                    team_members: team.members.iter().map(|m| m.full_name.clone()).collect(),
                    is_featured: project.is_featured,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let rows = rank_top_teams(ranked, options);
        tracing::debug!(rows = rows.len(), "leaderboard ranked");
        Ok(rows)
    }

    /// Per-admin breakdown of a project, marking the acting admin's own
    /// evaluation. Admin only.
    pub async fn project_details(&self, project_id: i64) -> Result<ProjectDetails, DatabaseError> {
        let admin_id = self.require_admin()?.admin_id;
        let project = self.get_project(project_id).await?;
        let evaluations = self.project_evaluations(project_id).await?;
        let admins = self.list_admins().await?;
        Ok(project_details(
            project.id,
            &project.title,
            &evaluations,
            &admins,
            Some(admin_id),
            self.default_weight(),
        ))
    }

    /// Coverage and averages across every submitted project. Admin only.
    pub async fn evaluation_stats(&self) -> Result<EvaluationStats, DatabaseError> {
        self.require_admin()?;
        let project_ids: Vec<i64> = self
            .list_projects()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let evaluations = self.all_evaluations().await?;
        Ok(evaluation_stats(&project_ids, &evaluations))
    }
}
