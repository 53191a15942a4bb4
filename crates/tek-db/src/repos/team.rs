//! Team repository: registration, rosters, and teams with free slots.

use std::collections::HashMap;

use chrono::Utc;

use tek_core::entities::{NewTeam, Team, TeamMember, TeamWithSpace};
use tek_core::errors::CoreError;
use tek_roster::RosterError;
use tek_roster::fields::validate_new_team_fields;
use tek_roster::validate::{validate_leader, validate_member_count, validate_membership_formats};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_enum, parse_field, parse_optional_datetime};
use crate::service::TekService;

const TEAM_COLS: &str = "id, team_name, registration_type, field, initial_idea, telegram_group_link, gender, is_active, created_at";

const MEMBER_COLS: &str =
    "id, team_id, full_name, email, phone, membership_number, is_leader, created_at";

fn row_to_team(row: &libsql::Row) -> Result<Team, DatabaseError> {
    Ok(Team {
        id: row.get(0)?,
        team_name: row.get(1)?,
        registration_type: parse_enum(&row.get::<String>(2)?)?,
        field: parse_field(&row.get::<String>(3)?)?,
        initial_idea: get_opt_string(row, 4)?,
        telegram_group_link: get_opt_string(row, 5)?,
        gender: parse_enum(&row.get::<String>(6)?)?,
        is_active: get_bool(row, 7)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(8)?.as_deref())?,
        members: Vec::new(),
    })
}

fn row_to_member(row: &libsql::Row) -> Result<TeamMember, DatabaseError> {
    Ok(TeamMember {
        id: row.get(0)?,
        team_id: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        membership_number: get_opt_string(row, 5)?,
        is_leader: get_bool(row, 6)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(7)?.as_deref())?,
    })
}

/// Insert a team and its members on `conn` (a connection or an open
/// transaction). Returns the new team id.
pub(crate) async fn insert_team(
    conn: &libsql::Connection,
    team: &NewTeam,
) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM teams WHERE team_name = ?1",
            [team.team_name.as_str()],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    if row.get::<i64>(0)? > 0 {
        return Err(DatabaseError::InvalidState(format!(
            "team name '{}' already exists",
            team.team_name
        )));
    }

    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO teams (team_name, registration_type, field, initial_idea, gender, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        libsql::params![
            team.team_name.as_str(),
            team.registration_type.as_str(),
            team.field.key(),
            team.initial_idea.as_deref(),
            team.gender.as_str(),
            now.as_str()
        ],
    )
    .await?;
    let team_id = conn.last_insert_rowid();
    for member in &team.members {
        conn.execute(
            &format!("INSERT INTO team_members ({MEMBER_COLS}) VALUES (NULL, ?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            libsql::params![
                team_id,
                member.full_name.as_str(),
                member.email.as_str(),
                member.phone.as_str(),
                member.membership_number.as_deref(),
                i64::from(member.is_leader),
                now.as_str()
            ],
        )
        .await?;
    }
    Ok(team_id)
}

impl TekService {
    /// Register a team with its roster.
    ///
    /// Checks field constraints, the 3..=6 member bound, the single leader,
    /// and that entered membership numbers are well-formed. Lookups happen
    /// before this call, in the roster session.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::Roster`] for rule violations,
    /// [`DatabaseError::InvalidState`] for a taken team name.
    pub async fn register_team(&self, team: &NewTeam) -> Result<Team, DatabaseError> {
        validate_new_team_fields(team).map_err(RosterError::Fields)?;
        validate_member_count(&team.members)?;
        validate_leader(&team.members)?;
        validate_membership_formats(&team.members)?;

        let tx = self.db().conn().transaction().await?;
        let team_id = insert_team(&tx, team).await?;
        tx.commit().await?;

        tracing::info!(team_id, team = %team.team_name, members = team.members.len(), "team registered");
        self.get_team(team_id).await
    }

    pub async fn get_team(&self, id: i64) -> Result<Team, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {TEAM_COLS} FROM teams WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("team", id))?;
        let mut team = row_to_team(&row)?;
        team.members = self.team_members(id).await?;
        Ok(team)
    }

    /// All teams with their rosters, in registration order.
    pub async fn list_teams(&self) -> Result<Vec<Team>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {TEAM_COLS} FROM teams ORDER BY id"), ())
            .await?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next().await? {
            teams.push(row_to_team(&row)?);
        }

        let mut members = self.all_members_by_team().await?;
        for team in &mut teams {
            team.members = members.remove(&team.id).unwrap_or_default();
        }
        Ok(teams)
    }

    /// Active teams that can still take members.
    pub async fn teams_with_space(&self) -> Result<Vec<TeamWithSpace>, DatabaseError> {
        Ok(self
            .list_teams()
            .await?
            .iter()
            .filter(|t| t.is_active && t.available_slots() > 0)
            .map(TeamWithSpace::from)
            .collect())
    }

    /// Team that has a member registered with `email`.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` when no member uses the email.
    pub async fn team_id_for_member_email(&self, email: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT team_id FROM team_members WHERE lower(email) = lower(?1) ORDER BY id LIMIT 1",
                [email.trim()],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| CoreError::NotFound {
            entity_type: "team member with email".into(),
            id: email.to_string(),
        })?;
        Ok(row.get(0)?)
    }

    pub(crate) async fn team_members(&self, team_id: i64) -> Result<Vec<TeamMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {MEMBER_COLS} FROM team_members WHERE team_id = ?1 ORDER BY id"),
                [team_id],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    pub(crate) async fn all_members_by_team(
        &self,
    ) -> Result<HashMap<i64, Vec<TeamMember>>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {MEMBER_COLS} FROM team_members ORDER BY team_id, id"),
                (),
            )
            .await?;
        let mut by_team: HashMap<i64, Vec<TeamMember>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            let member = row_to_member(&row)?;
            by_team.entry(member.team_id).or_default().push(member);
        }
        Ok(by_team)
    }
}
