use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, ProjectField, RegistrationType};

/// Payload of `POST /students/individual`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewIndividual {
    pub registration_type: RegistrationType,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_number: Option<String>,
    pub email: String,
    pub phone: String,
    pub technical_skills: String,
    pub interests: String,
    pub experience_level: String,
    pub preferred_field: ProjectField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_idea: Option<String>,
    pub gender: Gender,
}

/// A participant who registered alone and waits to be grouped into a team.
///
/// Created unassigned; becomes assigned exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Individual {
    pub id: i64,
    pub registration_type: RegistrationType,
    pub membership_number: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub technical_skills: String,
    pub interests: String,
    pub experience_level: String,
    pub preferred_field: ProjectField,
    pub project_idea: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub is_assigned: bool,
    pub assigned_team_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}
