use std::collections::BTreeMap;

use super::rounded_average;
use super::views::{ActivityEntry, DashboardView, RiskAlertView, WelfareStatus};
use crate::welfare::animals::{Animal, AnimalId};
use crate::welfare::evaluations::Evaluation;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;
pub const DEFAULT_ALERT_THRESHOLD: u8 = 75;

/// Organisation-wide overview across every animal and evaluation.
pub fn dashboard(
    animals: &[Animal],
    evaluations: &[Evaluation],
    alert_threshold: u8,
) -> DashboardView {
    let names: BTreeMap<AnimalId, &Animal> =
        animals.iter().map(|animal| (animal.id, animal)).collect();

    let mut newest_first: Vec<&Evaluation> = evaluations.iter().collect();
    newest_first.sort_by(|left, right| {
        right
            .timestamp()
            .cmp(&left.timestamp())
            .then(right.id().cmp(&left.id()))
    });

    let average_score = rounded_average(evaluations.iter().map(Evaluation::overall_score));
    let status = WelfareStatus::from_average(average_score);

    let mut latest_per_animal: BTreeMap<AnimalId, &Evaluation> = BTreeMap::new();
    for evaluation in newest_first.iter().copied() {
        latest_per_animal
            .entry(evaluation.animal_id())
            .or_insert(evaluation);
    }

    let mut at_risk: Vec<RiskAlertView> = latest_per_animal
        .into_iter()
        .filter(|(_, evaluation)| evaluation.overall_score() < alert_threshold)
        .filter_map(|(animal_id, evaluation)| {
            names.get(&animal_id).map(|animal| RiskAlertView {
                animal_id,
                animal_name: animal.name.clone(),
                species: animal.species.clone(),
                evaluation_id: evaluation.id(),
                timestamp: evaluation.timestamp(),
                score: evaluation.overall_score(),
            })
        })
        .collect();
    at_risk.sort_by_key(|alert| (alert.score, alert.animal_id));

    let recent_activity = newest_first
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|evaluation| ActivityEntry {
            evaluation_id: evaluation.id(),
            animal_id: evaluation.animal_id(),
            animal_name: names
                .get(&evaluation.animal_id())
                .map(|animal| animal.name.clone())
                .unwrap_or_default(),
            timestamp: evaluation.timestamp(),
            evaluator_name: evaluation.evaluator_name().to_string(),
            score: evaluation.overall_score(),
        })
        .collect();

    DashboardView {
        total_animals: animals.len(),
        total_evaluations: evaluations.len(),
        average_score,
        status,
        status_label: status.label(),
        alert_threshold,
        at_risk,
        recent_activity,
    }
}
