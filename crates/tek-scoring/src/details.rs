//! Per-admin breakdown of one project's evaluations.

use tek_core::entities::{Admin, Evaluation};
use tek_core::responses::{EvaluationWithAdmin, ProjectDetails};

use crate::aggregate::{WeightTable, score_project};

/// Build the details view of a project. `current_admin` marks the caller's
/// own evaluation.
#[must_use]
pub fn project_details(
    project_id: i64,
    project_title: &str,
    evaluations: &[Evaluation],
    admins: &[Admin],
    current_admin: Option<i64>,
    default_weight: u8,
) -> ProjectDetails {
    let rows: Vec<EvaluationWithAdmin> = evaluations
        .iter()
        .filter(|e| e.project_id == project_id)
        .map(|e| {
            let admin = e
                .admin_id
                .and_then(|id| admins.iter().find(|a| a.id == id));
            EvaluationWithAdmin {
                id: e.id,
                project_id: e.project_id,
                score: e.score,
                notes: e.notes.clone(),
                is_ai_evaluation: e.is_ai_evaluation,
                admin_id: e.admin_id,
                admin_name: admin.map(|a| a.full_name.clone()),
                admin_weight: admin.map(|a| a.evaluation_weight),
                is_current_admin: !e.is_ai_evaluation
                    && current_admin.is_some()
                    && e.admin_id == current_admin,
            }
        })
        .collect();

    let weights = WeightTable::from_admins(admins, default_weight);
    let score = score_project(project_id, evaluations, &weights);
    ProjectDetails {
        project_id,
        project_title: project_title.to_string(),
        current_admin_evaluation: rows.iter().rev().find(|r| r.is_current_admin).cloned(),
        total_admin_evaluations: score.admin_evaluations_count,
        has_ai_evaluation: score.ai_score.is_some(),
        evaluations: rows,
        score: Some(score),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tek_core::enums::ScoreStatus;

    use super::*;

    fn admin(id: i64, name: &str, weight: u8) -> Admin {
        Admin {
            id,
            username: name.to_lowercase(),
            email: format!("{}@example.org", name.to_lowercase()),
            full_name: name.into(),
            evaluation_weight: weight,
            is_active: true,
            is_superadmin: false,
            created_at: None,
        }
    }

    fn eval(id: i64, admin_id: Option<i64>, score: f64) -> Evaluation {
        Evaluation {
            id,
            project_id: 4,
            admin_id,
            is_ai_evaluation: admin_id.is_none(),
            score,
            notes: Some(format!("note {id}")),
            created_at: None,
        }
    }

    #[test]
    fn marks_current_admin_and_joins_names() {
        let admins = vec![admin(1, "Judge", 40), admin(2, "Mentor", 60)];
        let evals = vec![eval(10, Some(1), 50.0), eval(11, Some(2), 60.0), eval(12, None, 20.0)];
        let details = project_details(4, "Edge triage", &evals, &admins, Some(2), 10);

        assert_eq!(details.evaluations.len(), 3);
        assert_eq!(details.total_admin_evaluations, 2);
        assert!(details.has_ai_evaluation);
        let mine = details.current_admin_evaluation.unwrap();
        assert_eq!(mine.id, 11);
        assert_eq!(mine.admin_name.as_deref(), Some("Mentor"));
        assert_eq!(mine.admin_weight, Some(60));

        let score = details.score.unwrap();
        assert_eq!(score.status, ScoreStatus::Complete);
        // (50*40 + 60*60) / 100 + 20
        assert_eq!(score.total_score, Some(76.0));
    }

    #[test]
    fn deleted_admin_has_no_name_but_still_counts() {
        let evals = vec![eval(10, Some(99), 30.0)];
        let details = project_details(4, "Edge triage", &evals, &[], None, 10);
        assert_eq!(details.evaluations[0].admin_name, None);
        assert_eq!(details.current_admin_evaluation, None);
        assert_eq!(details.score.unwrap().admin_component, Some(30.0));
    }
}
