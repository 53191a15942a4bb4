use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::member::{NewTeamMember, TeamMember};
use crate::enums::{Gender, ProjectField, RegistrationType};

/// Payload of `POST /students/team`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTeam {
    pub team_name: String,
    pub registration_type: RegistrationType,
    pub field: ProjectField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_idea: Option<String>,
    pub members: Vec<NewTeamMember>,
    pub gender: Gender,
}

/// A registered team and its fixed roster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub team_name: String,
    pub registration_type: RegistrationType,
    pub field: ProjectField,
    pub initial_idea: Option<String>,
    pub telegram_group_link: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    pub gender: Gender,
}

impl Team {
    /// Remaining roster slots (`6 - member_count`).
    #[must_use]
    pub fn available_slots(&self) -> usize {
        crate::limits::available_slots(self.members.len())
    }
}

/// Compact member row inside [`TeamWithSpace`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamWithSpaceMember {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub is_leader: bool,
}

/// A team that can still absorb unassigned individuals.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamWithSpace {
    pub id: i64,
    pub team_name: String,
    pub field: ProjectField,
    pub member_count: usize,
    pub available_slots: usize,
    pub members: Vec<TeamWithSpaceMember>,
    pub gender: Gender,
}

impl From<&Team> for TeamWithSpace {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            team_name: team.team_name.clone(),
            field: team.field,
            member_count: team.members.len(),
            available_slots: team.available_slots(),
            members: team
                .members
                .iter()
                .map(|m| TeamWithSpaceMember {
                    id: m.id,
                    full_name: m.full_name.clone(),
                    email: m.email.clone(),
                    is_leader: m.is_leader,
                })
                .collect(),
            gender: team.gender,
        }
    }
}
