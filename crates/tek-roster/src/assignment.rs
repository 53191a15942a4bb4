//! Admin grouping of unassigned individuals into teams.
//!
//! Plans are computed from loaded records and carry everything a store or
//! the API needs to apply them. Nothing is written here.

use std::collections::HashSet;

use tek_core::entities::{Individual, NewTeam, NewTeamMember, Team};
use tek_core::enums::{Gender, ProjectField, RegistrationType};
use tek_core::limits::{MAX_TEAM_MEMBERS, MIN_TEAM_MEMBERS};

use crate::RosterError;
use crate::fields::validate_new_team_fields;

/// A new team built from individuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeamPlan {
    pub team: NewTeam,
    /// Individuals to mark assigned, in roster order.
    pub individual_ids: Vec<i64>,
}

/// Individuals joining an existing team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToTeamPlan {
    pub team_id: i64,
    pub members: Vec<NewTeamMember>,
    pub individual_ids: Vec<i64>,
    /// Roster size once the plan is applied.
    pub total_members: usize,
}

fn to_member(individual: &Individual, is_leader: bool) -> NewTeamMember {
    NewTeamMember {
        full_name: individual.full_name.clone(),
        email: individual.email.clone(),
        phone: individual.phone.clone(),
        membership_number: individual.membership_number.clone(),
        is_leader,
    }
}

/// Selection must be non-empty, free of duplicates, and fully unassigned.
fn check_selection(individuals: &[Individual]) -> Result<(), RosterError> {
    if individuals.is_empty() {
        return Err(RosterError::EmptySelection);
    }
    let mut seen = HashSet::with_capacity(individuals.len());
    for individual in individuals {
        if !seen.insert(individual.id) {
            return Err(RosterError::DuplicateIndividual(individual.id));
        }
    }
    let assigned: Vec<i64> = individuals
        .iter()
        .filter(|i| i.is_assigned)
        .map(|i| i.id)
        .collect();
    if assigned.is_empty() {
        Ok(())
    } else {
        Err(RosterError::AlreadyAssigned { ids: assigned })
    }
}

fn check_gender(team_gender: Gender, individuals: &[Individual]) -> Result<(), RosterError> {
    let offending: Vec<usize> = individuals
        .iter()
        .enumerate()
        .filter(|(_, i)| i.gender != team_gender)
        .map(|(n, _)| n + 1)
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(RosterError::GenderMismatch {
            team_gender,
            members: offending,
        })
    }
}

/// Group 3 to 6 unassigned individuals of one gender into a new
/// `team_no_idea` team. The first individual leads.
///
/// # Errors
///
/// [`RosterError`] on an empty, duplicate, already assigned, mixed-gender,
/// or wrongly sized selection, or when the team name is out of bounds.
pub fn plan_new_team(
    individuals: &[Individual],
    team_name: &str,
    field: ProjectField,
) -> Result<NewTeamPlan, RosterError> {
    check_selection(individuals)?;
    let count = individuals.len();
    if !(MIN_TEAM_MEMBERS..=MAX_TEAM_MEMBERS).contains(&count) {
        return Err(RosterError::RosterSize {
            count,
            min: MIN_TEAM_MEMBERS,
            max: MAX_TEAM_MEMBERS,
        });
    }
    let gender = individuals[0].gender;
    check_gender(gender, individuals)?;

    let team = NewTeam {
        team_name: team_name.trim().to_string(),
        registration_type: RegistrationType::TeamNoIdea,
        field,
        initial_idea: None,
        members: individuals
            .iter()
            .enumerate()
            .map(|(n, i)| to_member(i, n == 0))
            .collect(),
        gender,
    };
    validate_new_team_fields(&team).map_err(RosterError::Fields)?;

    Ok(NewTeamPlan {
        team,
        individual_ids: individuals.iter().map(|i| i.id).collect(),
    })
}

/// Add unassigned individuals to a team with free slots. Nobody joining
/// becomes leader.
///
/// # Errors
///
/// [`RosterError`] on an empty, duplicate, or already assigned selection,
/// when the team lacks capacity, or when a gender differs from the team's.
pub fn plan_add_to_team(team: &Team, individuals: &[Individual]) -> Result<AddToTeamPlan, RosterError> {
    check_selection(individuals)?;
    let available = team.available_slots();
    if individuals.len() > available {
        return Err(RosterError::NoCapacity {
            available,
            requested: individuals.len(),
        });
    }
    check_gender(team.gender, individuals)?;

    Ok(AddToTeamPlan {
        team_id: team.id,
        members: individuals.iter().map(|i| to_member(i, false)).collect(),
        individual_ids: individuals.iter().map(|i| i.id).collect(),
        total_members: team.members.len() + individuals.len(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tek_core::entities::TeamMember;

    use super::*;

    fn individual(id: i64, gender: Gender) -> Individual {
        Individual {
            id,
            registration_type: RegistrationType::IndividualNoIdea,
            membership_number: None,
            full_name: format!("Person {id}"),
            email: format!("p{id}@example.org"),
            phone: "05550001122".into(),
            technical_skills: "Rust and embedded C".into(),
            interests: "Edge inference".into(),
            experience_level: "beginner".into(),
            preferred_field: ProjectField::Fintech,
            project_idea: None,
            gender,
            is_assigned: false,
            assigned_team_id: None,
            created_at: None,
        }
    }

    fn team_of(size: usize, gender: Gender) -> Team {
        Team {
            id: 9,
            team_name: "Falcons".into(),
            registration_type: RegistrationType::TeamWithIdea,
            field: ProjectField::Fintech,
            initial_idea: Some("Idea".into()),
            telegram_group_link: None,
            is_active: true,
            created_at: None,
            members: (0..size)
                .map(|n| TeamMember {
                    id: i64::try_from(n).unwrap() + 100,
                    team_id: 9,
                    full_name: format!("Member {n}"),
                    email: format!("m{n}@example.org"),
                    phone: "05550001122".into(),
                    membership_number: None,
                    is_leader: n == 0,
                    created_at: None,
                })
                .collect(),
            gender,
        }
    }

    #[test]
    fn new_team_first_individual_leads() {
        let people: Vec<_> = (1..=4).map(|id| individual(id, Gender::Female)).collect();
        let plan = plan_new_team(&people, " Nebula ", ProjectField::EducationTech).unwrap();
        assert_eq!(plan.team.team_name, "Nebula");
        assert_eq!(plan.team.registration_type, RegistrationType::TeamNoIdea);
        assert_eq!(plan.team.gender, Gender::Female);
        assert_eq!(plan.individual_ids, vec![1, 2, 3, 4]);
        let leaders: Vec<bool> = plan.team.members.iter().map(|m| m.is_leader).collect();
        assert_eq!(leaders, vec![true, false, false, false]);
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    fn new_team_size_bounds(#[case] n: i64) {
        let people: Vec<_> = (1..=n).map(|id| individual(id, Gender::Male)).collect();
        assert!(matches!(
            plan_new_team(&people, "Nebula", ProjectField::Fintech),
            Err(RosterError::RosterSize { .. })
        ));
    }

    #[test]
    fn new_team_rejects_mixed_gender() {
        let people = vec![
            individual(1, Gender::Male),
            individual(2, Gender::Female),
            individual(3, Gender::Male),
        ];
        assert_eq!(
            plan_new_team(&people, "Nebula", ProjectField::Fintech),
            Err(RosterError::GenderMismatch {
                team_gender: Gender::Male,
                members: vec![2],
            })
        );
    }

    #[test]
    fn new_team_rejects_assigned_and_duplicates() {
        let mut people: Vec<_> = (1..=3).map(|id| individual(id, Gender::Male)).collect();
        people[1].is_assigned = true;
        assert_eq!(
            plan_new_team(&people, "Nebula", ProjectField::Fintech),
            Err(RosterError::AlreadyAssigned { ids: vec![2] })
        );

        let dupes = vec![
            individual(1, Gender::Male),
            individual(2, Gender::Male),
            individual(1, Gender::Male),
        ];
        assert_eq!(
            plan_new_team(&dupes, "Nebula", ProjectField::Fintech),
            Err(RosterError::DuplicateIndividual(1))
        );
    }

    #[test]
    fn new_team_name_is_checked() {
        let people: Vec<_> = (1..=3).map(|id| individual(id, Gender::Male)).collect();
        assert!(matches!(
            plan_new_team(&people, "N", ProjectField::Fintech),
            Err(RosterError::Fields(errors)) if errors.has("team_name")
        ));
    }

    #[test]
    fn add_to_team_respects_capacity() {
        let team = team_of(5, Gender::Male);
        let people = vec![individual(1, Gender::Male), individual(2, Gender::Male)];
        assert_eq!(
            plan_add_to_team(&team, &people),
            Err(RosterError::NoCapacity {
                available: 1,
                requested: 2
            })
        );
    }

    #[test]
    fn add_to_team_requires_team_gender() {
        let team = team_of(3, Gender::Female);
        let people = vec![individual(1, Gender::Female), individual(2, Gender::Male)];
        assert_eq!(
            plan_add_to_team(&team, &people),
            Err(RosterError::GenderMismatch {
                team_gender: Gender::Female,
                members: vec![2],
            })
        );
    }

    #[test]
    fn add_to_team_never_adds_leaders() {
        let team = team_of(3, Gender::Male);
        let people = vec![individual(1, Gender::Male), individual(2, Gender::Male)];
        let plan = plan_add_to_team(&team, &people).unwrap();
        assert_eq!(plan.total_members, 5);
        assert!(plan.members.iter().all(|m| !m.is_leader));
        assert_eq!(plan.team_id, 9);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let team = team_of(3, Gender::Male);
        assert_eq!(plan_add_to_team(&team, &[]), Err(RosterError::EmptySelection));
    }
}
