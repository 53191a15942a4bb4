//! Individual repository: solo registrations and their grouping into teams.

use chrono::Utc;

use tek_core::entities::{Individual, NewIndividual};
use tek_core::enums::ProjectField;
use tek_core::responses::{AddToTeamResult, AssignmentResult};
use tek_roster::RosterError;
use tek_roster::assignment::{plan_add_to_team, plan_new_team};
use tek_roster::fields::validate_new_individual;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_enum, parse_field, parse_optional_datetime, placeholders,
};
use crate::repos::team::insert_team;
use crate::service::TekService;

const SELECT_COLS: &str = "id, registration_type, membership_number, full_name, email, phone, technical_skills, interests, experience_level, preferred_field, project_idea, gender, is_assigned, assigned_team_id, created_at";

fn row_to_individual(row: &libsql::Row) -> Result<Individual, DatabaseError> {
    Ok(Individual {
        id: row.get(0)?,
        registration_type: parse_enum(&row.get::<String>(1)?)?,
        membership_number: get_opt_string(row, 2)?,
        full_name: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        technical_skills: row.get(6)?,
        interests: row.get(7)?,
        experience_level: row.get(8)?,
        preferred_field: parse_field(&row.get::<String>(9)?)?,
        project_idea: get_opt_string(row, 10)?,
        gender: parse_enum(&row.get::<String>(11)?)?,
        is_assigned: get_bool(row, 12)?,
        assigned_team_id: row.get::<Option<i64>>(13)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(14)?.as_deref())?,
    })
}

/// Mark individuals as placed in `team_id`. Only unassigned rows change.
async fn mark_assigned(
    conn: &libsql::Connection,
    team_id: i64,
    individual_ids: &[i64],
) -> Result<(), DatabaseError> {
    let sql = format!(
        "UPDATE individuals SET is_assigned = 1, assigned_team_id = ?1
         WHERE is_assigned = 0 AND id IN ({})",
        placeholders(2, individual_ids.len())
    );
    let mut params: Vec<libsql::Value> = vec![team_id.into()];
    params.extend(individual_ids.iter().map(|id| libsql::Value::from(*id)));
    let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    if usize::try_from(changed).ok() != Some(individual_ids.len()) {
        return Err(DatabaseError::InvalidState(
            "individuals changed while being assigned".into(),
        ));
    }
    Ok(())
}

impl TekService {
    /// Register an individual participant, unassigned.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::Roster`] with the failing field constraints.
    pub async fn register_individual(
        &self,
        individual: &NewIndividual,
    ) -> Result<Individual, DatabaseError> {
        validate_new_individual(individual).map_err(RosterError::Fields)?;
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO individuals (registration_type, membership_number, full_name, email, phone,
                     technical_skills, interests, experience_level, preferred_field, project_idea, gender,
                     is_assigned, assigned_team_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0, NULL, ?12)",
                libsql::params![
                    individual.registration_type.as_str(),
                    individual.membership_number.as_deref(),
                    individual.full_name.as_str(),
                    individual.email.as_str(),
                    individual.phone.as_str(),
                    individual.technical_skills.as_str(),
                    individual.interests.as_str(),
                    individual.experience_level.as_str(),
                    individual.preferred_field.key(),
                    individual.project_idea.as_deref(),
                    individual.gender.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let id = self.db().conn().last_insert_rowid();
        tracing::info!(individual_id = id, "individual registered");
        self.get_individual(id).await
    }

    pub async fn get_individual(&self, id: i64) -> Result<Individual, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM individuals WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("individual", id))?;
        row_to_individual(&row)
    }

    /// Individuals in registration order, optionally only unassigned ones.
    pub async fn list_individuals(
        &self,
        unassigned_only: bool,
    ) -> Result<Vec<Individual>, DatabaseError> {
        let filter = if unassigned_only {
            "WHERE is_assigned = 0"
        } else {
            ""
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM individuals {filter} ORDER BY id"),
                (),
            )
            .await?;
        let mut individuals = Vec::new();
        while let Some(row) = rows.next().await? {
            individuals.push(row_to_individual(&row)?);
        }
        Ok(individuals)
    }

    /// Load individuals in the order the ids were given. Duplicate ids are
    /// kept so the grouping rules can reject them.
    async fn individuals_in_order(&self, ids: &[i64]) -> Result<Vec<Individual>, DatabaseError> {
        let mut individuals = Vec::with_capacity(ids.len());
        for id in ids {
            individuals.push(self.get_individual(*id).await?);
        }
        Ok(individuals)
    }

    /// Group unassigned individuals into a new team. Admin only.
    ///
    /// The first listed individual becomes leader; the team takes their
    /// shared gender.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] without an acting admin,
    /// `CoreError::NotFound` for an unknown id, [`DatabaseError::Roster`]
    /// when the grouping rules fail.
    pub async fn assign_individuals(
        &self,
        individual_ids: &[i64],
        team_name: &str,
        field: ProjectField,
    ) -> Result<AssignmentResult, DatabaseError> {
        let actor = self.require_admin()?;
        let individuals = self.individuals_in_order(individual_ids).await?;
        let plan = plan_new_team(&individuals, team_name, field)?;

        let tx = self.db().conn().transaction().await?;
        let team_id = insert_team(&tx, &plan.team).await?;
        mark_assigned(&tx, team_id, &plan.individual_ids).await?;
        tx.commit().await?;

        tracing::info!(team_id, members = plan.individual_ids.len(), by = %actor.username, "individuals grouped into new team");
        Ok(AssignmentResult {
            message: "team created".into(),
            team_id,
            team_name: plan.team.team_name,
            members_count: plan.individual_ids.len(),
        })
    }

    /// Add unassigned individuals to an existing team. Admin only.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] without an acting admin,
    /// `CoreError::NotFound` for an unknown team or individual,
    /// [`DatabaseError::Roster`] when the team lacks room or genders differ.
    pub async fn add_to_team(
        &self,
        team_id: i64,
        individual_ids: &[i64],
    ) -> Result<AddToTeamResult, DatabaseError> {
        let actor = self.require_admin()?;
        let team = self.get_team(team_id).await?;
        let individuals = self.individuals_in_order(individual_ids).await?;
        let plan = plan_add_to_team(&team, &individuals)?;

        let tx = self.db().conn().transaction().await?;
        let now = Utc::now().to_rfc3339();
        for member in &plan.members {
            tx.execute(
                "INSERT INTO team_members (team_id, full_name, email, phone, membership_number, is_leader, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
                libsql::params![
                    team_id,
                    member.full_name.as_str(),
                    member.email.as_str(),
                    member.phone.as_str(),
                    member.membership_number.as_deref(),
                    now.as_str()
                ],
            )
            .await?;
        }
        mark_assigned(&tx, team_id, &plan.individual_ids).await?;
        tx.commit().await?;

        tracing::info!(team_id, added = plan.members.len(), by = %actor.username, "individuals added to team");
        Ok(AddToTeamResult {
            message: "individuals added to team".into(),
            team_id,
            team_name: team.team_name,
            total_members: plan.total_members,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tek_core::enums::{Gender, RegistrationType};

    use super::*;
    use crate::test_support::helpers::{new_individual, new_team, service_as_admin, test_service};

    async fn register_many(svc: &TekService, genders: &[Gender]) -> Vec<i64> {
        let mut ids = Vec::new();
        for (n, gender) in genders.iter().enumerate() {
            let ind = svc
                .register_individual(&new_individual(n + 1, *gender))
                .await
                .unwrap();
            ids.push(ind.id);
        }
        ids
    }

    #[tokio::test]
    async fn register_individual_roundtrip() {
        let svc = test_service().await;
        let ind = svc
            .register_individual(&new_individual(1, Gender::Male))
            .await
            .unwrap();
        assert!(!ind.is_assigned);
        assert_eq!(ind.assigned_team_id, None);
        assert_eq!(ind.registration_type, RegistrationType::IndividualNoIdea);
        assert_eq!(svc.get_individual(ind.id).await.unwrap(), ind);
    }

    #[tokio::test]
    async fn short_skills_are_rejected() {
        let svc = test_service().await;
        let mut ind = new_individual(1, Gender::Male);
        ind.technical_skills = "Rust".into();
        let err = svc.register_individual(&ind).await.unwrap_err();
        let DatabaseError::Roster(RosterError::Fields(fields)) = err else {
            panic!("expected field errors, got {err}");
        };
        assert!(fields.has("technical_skills"));
    }

    #[tokio::test]
    async fn assign_creates_team_and_marks_individuals() {
        let svc = service_as_admin(false).await;
        let ids = register_many(&svc, &[Gender::Female; 4]).await;

        let result = svc
            .assign_individuals(&ids[..3], "Nightingales", ProjectField::AiHealthcare)
            .await
            .unwrap();
        assert_eq!(result.members_count, 3);

        let team = svc.get_team(result.team_id).await.unwrap();
        assert_eq!(team.gender, Gender::Female);
        assert_eq!(team.registration_type, RegistrationType::TeamNoIdea);
        assert!(team.members[0].is_leader);
        assert_eq!(team.members[0].full_name, "Solo 1");

        let unassigned = svc.list_individuals(true).await.unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, ids[3]);
        let placed = svc.get_individual(ids[0]).await.unwrap();
        assert_eq!(placed.assigned_team_id, Some(result.team_id));
    }

    #[tokio::test]
    async fn individuals_are_assigned_only_once() {
        let svc = service_as_admin(false).await;
        let ids = register_many(&svc, &[Gender::Male; 6]).await;
        svc.assign_individuals(&ids[..3], "First", ProjectField::Fintech)
            .await
            .unwrap();

        let err = svc
            .assign_individuals(&ids[2..5], "Second", ProjectField::Fintech)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Roster(RosterError::AlreadyAssigned { ref ids }) if ids.len() == 1
        ));
        assert_eq!(svc.list_teams().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mixed_gender_group_is_rejected() {
        let svc = service_as_admin(false).await;
        let ids = register_many(&svc, &[Gender::Male, Gender::Female, Gender::Male]).await;
        let err = svc
            .assign_individuals(&ids, "Mixed", ProjectField::Fintech)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Roster(RosterError::GenderMismatch { .. })
        ));
        assert_eq!(svc.list_individuals(true).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn assignment_requires_an_admin() {
        let svc = test_service().await;
        let ids = register_many(&svc, &[Gender::Male; 3]).await;
        let err = svc
            .assign_individuals(&ids, "Anon", ProjectField::Fintech)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn add_to_team_respects_capacity() {
        let svc = service_as_admin(false).await;
        let team = svc
            .register_team(&new_team("Falcons", 5, Gender::Male))
            .await
            .unwrap();
        let ids = register_many(&svc, &[Gender::Male; 2]).await;

        let err = svc.add_to_team(team.id, &ids).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Roster(RosterError::NoCapacity {
                available: 1,
                requested: 2
            })
        ));

        let result = svc.add_to_team(team.id, &ids[..1]).await.unwrap();
        assert_eq!(result.total_members, 6);
        let team = svc.get_team(team.id).await.unwrap();
        assert_eq!(team.members.len(), 6);
        assert_eq!(team.members.iter().filter(|m| m.is_leader).count(), 1);
        assert!(svc.teams_with_space().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_to_unknown_team_is_not_found() {
        let svc = service_as_admin(false).await;
        let ids = register_many(&svc, &[Gender::Male]).await;
        let err = svc.add_to_team(42, &ids).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
