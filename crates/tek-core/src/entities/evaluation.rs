use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Payload of `POST /evaluation/admin`. The admin is the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewAdminEvaluation {
    pub project_id: i64,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_ai_evaluation: bool,
}

/// Payload of `POST /evaluation/ai`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AiEvaluationRequest {
    pub project_id: i64,
}

/// A stored score for a project, from one admin or from the AI evaluator.
///
/// At most one AI evaluation and one evaluation per admin exist per project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Evaluation {
    pub id: i64,
    pub project_id: i64,
    pub admin_id: Option<i64>,
    pub is_ai_evaluation: bool,
    pub score: f64,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
