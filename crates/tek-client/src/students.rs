//! `/students` endpoints: registration and triage of individuals.

use serde::Serialize;
use tek_core::entities::{Individual, NewIndividual, NewTeam, Team, TeamWithSpace};
use tek_core::enums::ProjectField;
use tek_core::responses::{AddToTeamResult, AssignmentResult};

use crate::{ApiClient, error::ClientError};

#[derive(Serialize)]
struct AssignRequest<'a> {
    individual_ids: &'a [i64],
    team_name: &'a str,
    field: ProjectField,
}

impl ApiClient {
    /// Register a validated team draft.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a rejected payload.
    pub async fn register_team(&self, team: &NewTeam) -> Result<Team, ClientError> {
        tracing::debug!(team = %team.team_name, members = team.members.len(), "registering team");
        self.send(self.post("/students/team").json(team)).await
    }

    /// Register an individual participant.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a rejected payload.
    pub async fn register_individual(
        &self,
        individual: &NewIndividual,
    ) -> Result<Individual, ClientError> {
        self.send(self.post("/students/individual").json(individual))
            .await
    }

    /// Active teams with their rosters.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn teams(&self) -> Result<Vec<Team>, ClientError> {
        self.send(self.get("/students/teams")).await
    }

    /// One team with its roster.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] for an unknown team, otherwise
    /// [`ClientError`].
    pub async fn team(&self, team_id: i64) -> Result<Team, ClientError> {
        self.send(self.get(&format!("/students/team/{team_id}"))).await
    }

    /// Teams with fewer than the maximum number of members.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn teams_with_space(&self) -> Result<Vec<TeamWithSpace>, ClientError> {
        self.send(self.get("/students/teams-with-space")).await
    }

    /// List individuals, optionally only those not yet placed in a team.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or a non-success status.
    pub async fn individuals(&self, unassigned_only: bool) -> Result<Vec<Individual>, ClientError> {
        let builder = self.get("/students/individuals");
        let builder = if unassigned_only {
            builder.query(&[("unassigned_only", "true")])
        } else {
            builder
        };
        self.send(builder).await
    }

    /// Group individuals into a new team. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`] on
    /// transport failure or when the API rejects the grouping.
    pub async fn assign_individuals(
        &self,
        individual_ids: &[i64],
        team_name: &str,
        field: ProjectField,
    ) -> Result<AssignmentResult, ClientError> {
        self.require_token()?;
        let body = AssignRequest {
            individual_ids,
            team_name,
            field,
        };
        self.send(self.post("/students/assign-individuals").json(&body))
            .await
    }

    /// Add individuals to an existing team. Admin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`] on
    /// transport failure or when the team lacks room.
    pub async fn add_to_team(
        &self,
        team_id: i64,
        individual_ids: &[i64],
    ) -> Result<AddToTeamResult, ClientError> {
        self.require_token()?;
        self.send(
            self.post(&format!("/students/add-to-team/{team_id}"))
                .json(individual_ids),
        )
        .await
    }
}
