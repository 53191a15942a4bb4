use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Gender;

/// Identity resolved from a membership number by the external verification
/// service. Fields sourced from here are read-only on the roster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberIdentity {
    pub membership_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
}

/// A member as submitted with a team registration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTeamMember {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_number: Option<String>,
    #[serde(default)]
    pub is_leader: bool,
}

/// A stored team member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamMember {
    pub id: i64,
    pub team_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub membership_number: Option<String>,
    pub is_leader: bool,
    pub created_at: Option<DateTime<Utc>>,
}
