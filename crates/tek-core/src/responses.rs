//! Response types returned by the REST API and by `tkf` commands.
//!
//! These structs define the JSON shape of leaderboards, score breakdowns,
//! evaluation statistics, and admin triage results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ProjectField, ScoreStatus};

/// One row of `GET /evaluation/top-teams`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TopTeam {
    /// 1-based position on the leaderboard.
    pub rank: u32,
    pub project_id: Option<i64>,
    pub project_title: String,
    /// Problem statement truncated to 200 characters.
    pub project_description: String,
    pub field: ProjectField,
    pub team_name: String,
    pub team_members: Vec<String>,
    pub total_score: Option<f64>,
    pub admin_score: Option<f64>,
    pub ai_score: Option<f64>,
    /// Absent on older API responses, which only ever list complete totals.
    #[serde(default = "complete")]
    pub status: ScoreStatus,
    #[serde(default)]
    pub is_featured: bool,
}

const fn complete() -> ScoreStatus {
    ScoreStatus::Complete
}

/// Aggregated score of a single project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectScore {
    pub project_id: i64,
    /// Weighted average of admin scores; absent without admin evaluations.
    pub admin_component: Option<f64>,
    pub ai_score: Option<f64>,
    /// `admin_component + ai_score`, present only when both sides are.
    pub total_score: Option<f64>,
    pub status: ScoreStatus,
    pub admin_evaluations_count: usize,
}

/// One admin's contribution inside [`ProjectDetails`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvaluationWithAdmin {
    pub id: i64,
    pub project_id: i64,
    pub score: f64,
    pub notes: Option<String>,
    pub is_ai_evaluation: bool,
    pub admin_id: Option<i64>,
    pub admin_name: Option<String>,
    #[serde(default, deserialize_with = "crate::weight::deserialize_opt")]
    pub admin_weight: Option<u8>,
    #[serde(default)]
    pub is_current_admin: bool,
}

/// Body of `GET /evaluation/project/{id}/details`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectDetails {
    pub project_id: i64,
    pub project_title: String,
    pub evaluations: Vec<EvaluationWithAdmin>,
    pub current_admin_evaluation: Option<EvaluationWithAdmin>,
    pub total_admin_evaluations: usize,
    pub has_ai_evaluation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ProjectScore>,
}

/// Body of `GET /evaluation/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvaluationStats {
    pub total_projects: usize,
    pub projects_with_ai_evaluation: usize,
    pub projects_with_admin_evaluation: usize,
    pub projects_without_evaluation: usize,
    pub total_evaluations: usize,
    pub ai_evaluations: usize,
    pub admin_evaluations: usize,
    pub average_ai_score: f64,
    pub average_admin_score: f64,
}

/// Result of grouping unassigned individuals into a new team.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssignmentResult {
    pub message: String,
    pub team_id: i64,
    pub team_name: String,
    pub members_count: usize,
}

/// Result of adding individuals to an existing team.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AddToTeamResult {
    pub message: String,
    pub team_id: i64,
    pub team_name: String,
    pub total_members: usize,
}

/// Result of `POST /evaluation/feature/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeatureToggle {
    pub project_id: i64,
    pub is_featured: bool,
    pub message: String,
}

/// Bearer token issued by `POST /admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// One entry of `GET /evaluation/featured-projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeaturedProject {
    pub id: i64,
    pub title: String,
    pub team_name: String,
    pub field: ProjectField,
    pub is_featured: bool,
}
