//! Evaluations through aggregation to a ranked leaderboard.

use tek_core::entities::{Admin, Evaluation};
use tek_core::enums::{ProjectField, ScoreStatus};
use tek_scoring::{RankOptions, RankedProject, WeightTable, rank_top_teams, score_project};

fn admin(id: i64, weight: u8) -> Admin {
    Admin {
        id,
        username: format!("judge{id}"),
        email: format!("judge{id}@example.org"),
        full_name: format!("Judge {id}"),
        evaluation_weight: weight,
        is_active: true,
        is_superadmin: false,
        created_at: None,
    }
}

fn evaluation(project_id: i64, admin_id: Option<i64>, score: f64) -> Evaluation {
    Evaluation {
        id: 0,
        project_id,
        admin_id,
        is_ai_evaluation: admin_id.is_none(),
        score,
        notes: None,
        created_at: None,
    }
}

fn ranked(project_id: i64, evaluations: &[Evaluation], weights: &WeightTable) -> RankedProject {
    RankedProject {
        project_id,
        project_title: format!("Project {project_id}"),
        problem_statement: "Flood forecasting for small river basins".into(),
        field: ProjectField::EnvironmentEnergy,
        team_name: format!("Team {project_id}"),
        team_members: vec!["Ali".into(), "Omar".into(), "Sami".into()],
        is_featured: false,
        score: score_project(project_id, evaluations, weights),
    }
}

#[test]
fn weighted_project_outranks_partial_one() {
    let weights = WeightTable::from_admins(&[admin(1, 25), admin(2, 75)], 10);
    let evaluations = vec![
        evaluation(1, Some(1), 60.0),
        evaluation(1, Some(2), 70.0),
        evaluation(1, None, 20.0),
        evaluation(2, Some(1), 75.0),
        evaluation(2, Some(2), 75.0),
        evaluation(3, Some(1), 30.0),
        evaluation(3, None, 5.0),
    ];

    let projects: Vec<RankedProject> = (1..=3).map(|id| ranked(id, &evaluations, &weights)).collect();
    let rows = rank_top_teams(projects, &RankOptions::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].project_id, Some(1));
    assert_eq!(rows[0].total_score, Some(87.5));
    assert_eq!(rows[0].admin_score, Some(67.5));
    assert_eq!(rows[1].project_id, Some(3));
    assert!(rows.iter().all(|r| r.status == ScoreStatus::Complete));
}
