//! Shared test utilities for tek-db unit tests.

pub(crate) mod helpers {
    use tek_core::entities::{NewIndividual, NewProjectSubmission, NewTeam, NewTeamMember};
    use tek_core::enums::{Gender, ProjectField, RegistrationType};

    use crate::TekDb;
    use crate::service::TekService;

    /// In-memory service without an acting admin.
    pub async fn test_service() -> TekService {
        let db = TekDb::open_local(":memory:").await.unwrap();
        TekService::from_db(db, None)
    }

    /// In-memory service acting as a freshly created admin.
    pub async fn service_as_admin(superadmin: bool) -> TekService {
        let mut svc = test_service().await;
        svc.create_admin("judge1", "judge1@example.org", "Judge One", 10, superadmin)
            .await
            .unwrap();
        svc.act_as("judge1").await.unwrap();
        svc
    }

    pub fn member(n: usize, leader: bool) -> NewTeamMember {
        NewTeamMember {
            full_name: format!("Member {n}"),
            email: format!("member{n}@example.org"),
            phone: "05550001122".into(),
            membership_number: None,
            is_leader: leader,
        }
    }

    pub fn new_team(name: &str, size: usize, gender: Gender) -> NewTeam {
        NewTeam {
            team_name: name.to_string(),
            registration_type: RegistrationType::TeamNoIdea,
            field: ProjectField::EnvironmentEnergy,
            initial_idea: None,
            members: (1..=size)
                .map(|n| {
                    let mut m = member(n, n == 1);
                    m.email = format!("{}.{n}@example.org", name.to_lowercase());
                    m
                })
                .collect(),
            gender,
        }
    }

    pub fn new_individual(n: usize, gender: Gender) -> NewIndividual {
        NewIndividual {
            registration_type: RegistrationType::IndividualNoIdea,
            full_name: format!("Solo {n}"),
            membership_number: None,
            email: format!("solo{n}@example.org"),
            phone: "05550001122".into(),
            technical_skills: "Rust, embedded C, signal processing".into(),
            interests: "Edge inference and robotics".into(),
            experience_level: "intermediate".into(),
            preferred_field: ProjectField::Fintech,
            project_idea: None,
            gender,
        }
    }

    pub fn new_project(member_email: &str, title: &str) -> NewProjectSubmission {
        NewProjectSubmission {
            member_email: member_email.to_string(),
            title: title.to_string(),
            problem_statement: "Small river basins flood with little warning for residents."
                .into(),
            technical_description: "x".repeat(1_000),
            scientific_reference: "Hydrology Journal, 2021".into(),
            field: ProjectField::EnvironmentEnergy,
        }
    }
}
