//! Evaluation coverage and averages across all projects.

use std::collections::HashSet;

use tek_core::entities::Evaluation;
use tek_core::responses::EvaluationStats;

use crate::aggregate::round2;

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let count = f64::from(u32::try_from(scores.len()).unwrap_or(u32::MAX));
    round2(scores.iter().sum::<f64>() / count)
}

/// Summarize evaluations over the given projects. Averages are rounded to
/// two decimals and are 0 when no evaluation of that kind exists.
#[must_use]
pub fn evaluation_stats(project_ids: &[i64], evaluations: &[Evaluation]) -> EvaluationStats {
    let projects: HashSet<i64> = project_ids.iter().copied().collect();
    let evaluations: Vec<&Evaluation> = evaluations
        .iter()
        .filter(|e| projects.contains(&e.project_id))
        .collect();

    let (ai, admin): (Vec<&Evaluation>, Vec<&Evaluation>) =
        evaluations.iter().copied().partition(|e| e.is_ai_evaluation);
    let with_ai: HashSet<i64> = ai.iter().map(|e| e.project_id).collect();
    let with_admin: HashSet<i64> = admin.iter().map(|e| e.project_id).collect();
    let evaluated = with_ai.union(&with_admin).count();

    let ai_scores: Vec<f64> = ai.iter().map(|e| e.score).collect();
    let admin_scores: Vec<f64> = admin.iter().map(|e| e.score).collect();

    EvaluationStats {
        total_projects: projects.len(),
        projects_with_ai_evaluation: with_ai.len(),
        projects_with_admin_evaluation: with_admin.len(),
        projects_without_evaluation: projects.len() - evaluated,
        total_evaluations: evaluations.len(),
        ai_evaluations: ai.len(),
        admin_evaluations: admin.len(),
        average_ai_score: mean(&ai_scores),
        average_admin_score: mean(&admin_scores),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn eval(project_id: i64, ai: bool, score: f64) -> Evaluation {
        Evaluation {
            id: 0,
            project_id,
            admin_id: if ai { None } else { Some(1) },
            is_ai_evaluation: ai,
            score,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn counts_coverage_per_kind() {
        let evals = vec![
            eval(1, true, 20.0),
            eval(1, false, 60.0),
            eval(2, false, 50.0),
            eval(2, false, 55.0),
            eval(3, true, 15.0),
        ];
        let stats = evaluation_stats(&[1, 2, 3, 4, 5], &evals);
        assert_eq!(
            stats,
            EvaluationStats {
                total_projects: 5,
                projects_with_ai_evaluation: 2,
                projects_with_admin_evaluation: 2,
                projects_without_evaluation: 2,
                total_evaluations: 5,
                ai_evaluations: 2,
                admin_evaluations: 3,
                average_ai_score: 17.5,
                average_admin_score: 55.0,
            }
        );
    }

    #[test]
    fn empty_store_has_zero_averages() {
        let stats = evaluation_stats(&[], &[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.average_ai_score, 0.0);
        assert_eq!(stats.average_admin_score, 0.0);
    }

    #[test]
    fn evaluations_of_unknown_projects_are_ignored() {
        let stats = evaluation_stats(&[1], &[eval(9, true, 25.0)]);
        assert_eq!(stats.total_evaluations, 0);
        assert_eq!(stats.projects_without_evaluation, 1);
    }
}
