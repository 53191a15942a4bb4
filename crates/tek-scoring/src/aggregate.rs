//! Per-project score aggregation.
//!
//! The admin component is the weighted mean of admin scores, normalized by
//! the weights of the admins who actually scored the project. The total is
//! `admin_component + ai_score` and exists only when both sides do.

use std::collections::HashMap;

use tek_core::entities::{Admin, Evaluation};
use tek_core::enums::ScoreStatus;
use tek_core::limits::{ADMIN_SCORE_MAX, AI_SCORE_MAX, DEFAULT_ADMIN_WEIGHT};
use tek_core::responses::ProjectScore;

use crate::error::{ScoreKind, ScoringError};

fn check_range(kind: ScoreKind, score: f64, max: f64) -> Result<(), ScoringError> {
    if score.is_finite() && (0.0..=max).contains(&score) {
        Ok(())
    } else {
        Err(ScoringError::ScoreRange { kind, score, max })
    }
}

/// # Errors
///
/// [`ScoringError::ScoreRange`] unless `0 <= score <= 75`.
pub fn validate_admin_score(score: f64) -> Result<(), ScoringError> {
    check_range(ScoreKind::Admin, score, ADMIN_SCORE_MAX)
}

/// # Errors
///
/// [`ScoringError::ScoreRange`] unless `0 <= score <= 25`.
pub fn validate_ai_score(score: f64) -> Result<(), ScoringError> {
    check_range(ScoreKind::Ai, score, AI_SCORE_MAX)
}

/// Round to two decimals for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evaluation weight per admin id. Admins missing from the table (deleted
/// accounts) get the default weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: HashMap<i64, u8>,
    default_weight: u8,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_WEIGHT)
    }
}

impl WeightTable {
    #[must_use]
    pub fn new(default_weight: u8) -> Self {
        Self {
            weights: HashMap::new(),
            default_weight,
        }
    }

    #[must_use]
    pub fn from_admins(admins: &[Admin], default_weight: u8) -> Self {
        let mut table = Self::new(default_weight);
        for admin in admins {
            table.insert(admin.id, admin.evaluation_weight);
        }
        table
    }

    pub fn insert(&mut self, admin_id: i64, weight: u8) {
        self.weights.insert(admin_id, weight);
    }

    #[must_use]
    pub fn weight_of(&self, admin_id: Option<i64>) -> u8 {
        admin_id
            .and_then(|id| self.weights.get(&id).copied())
            .unwrap_or(self.default_weight)
    }
}

/// Admin evaluations with one entry per admin, the last occurrence winning.
/// Evaluations without an admin id are kept as they are.
fn latest_per_admin(evaluations: &[Evaluation]) -> Vec<&Evaluation> {
    let mut kept: Vec<&Evaluation> = Vec::new();
    let mut slot_by_admin: HashMap<i64, usize> = HashMap::new();
    for evaluation in evaluations.iter().filter(|e| !e.is_ai_evaluation) {
        match evaluation.admin_id {
            Some(admin_id) => {
                if let Some(&slot) = slot_by_admin.get(&admin_id) {
                    kept[slot] = evaluation;
                } else {
                    slot_by_admin.insert(admin_id, kept.len());
                    kept.push(evaluation);
                }
            }
            None => kept.push(evaluation),
        }
    }
    kept
}

/// Weighted mean of admin scores, or `None` without admin evaluations.
///
/// When every participating admin has weight 0 the plain mean is used.
#[must_use]
pub fn admin_component(evaluations: &[Evaluation], weights: &WeightTable) -> Option<f64> {
    let admin_evals = latest_per_admin(evaluations);
    if admin_evals.is_empty() {
        return None;
    }
    let (weighted_sum, total_weight) =
        admin_evals
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sum, total), evaluation| {
                let weight = f64::from(weights.weight_of(evaluation.admin_id));
                (sum + evaluation.score * weight, total + weight)
            });
    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        let count = f64::from(u32::try_from(admin_evals.len()).unwrap_or(u32::MAX));
        Some(admin_evals.iter().map(|e| e.score).sum::<f64>() / count)
    }
}

/// The project's AI score; the last AI evaluation wins.
#[must_use]
pub fn ai_score(evaluations: &[Evaluation]) -> Option<f64> {
    evaluations
        .iter()
        .rev()
        .find(|e| e.is_ai_evaluation)
        .map(|e| e.score)
}

/// Aggregate the evaluations of one project. Evaluations for other projects
/// are ignored.
#[must_use]
pub fn score_project(project_id: i64, evaluations: &[Evaluation], weights: &WeightTable) -> ProjectScore {
    let own: Vec<Evaluation> = evaluations
        .iter()
        .filter(|e| e.project_id == project_id)
        .cloned()
        .collect();
    let admin = admin_component(&own, weights);
    let ai = ai_score(&own);
    let total = admin.zip(ai).map(|(a, b)| a + b);
    let score = ProjectScore {
        project_id,
        admin_component: admin,
        ai_score: ai,
        total_score: total,
        status: ScoreStatus::from_presence(admin.is_some(), ai.is_some()),
        admin_evaluations_count: latest_per_admin(&own).len(),
    };
    tracing::debug!(project_id, status = %score.status, total = ?score.total_score, "scored project");
    score
}
