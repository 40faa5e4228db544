use super::rounded_average;
use super::views::{AnimalHistoryView, ScorePoint, Trend};
use crate::welfare::animals::Animal;
use crate::welfare::catalog::QuestionCatalog;
use crate::welfare::evaluations::Evaluation;
use crate::welfare::scoring::ScoringRule;

/// Score history for one animal. `evaluations` may arrive in any order.
pub fn animal_history(
    animal: &Animal,
    evaluations: &[Evaluation],
    catalog: &QuestionCatalog,
) -> AnimalHistoryView {
    let mut ordered: Vec<&Evaluation> = evaluations
        .iter()
        .filter(|evaluation| evaluation.animal_id() == animal.id)
        .collect();
    ordered.sort_by_key(|evaluation| (evaluation.timestamp(), evaluation.id()));

    let points: Vec<ScorePoint> = ordered
        .iter()
        .map(|evaluation| ScorePoint {
            evaluation_id: evaluation.id(),
            timestamp: evaluation.timestamp(),
            score: evaluation.overall_score(),
        })
        .collect();

    let trend = trend(&points);
    let latest_breakdown = ordered
        .last()
        .map(|latest| {
            ScoringRule::new().category_breakdown(latest.answers().iter().filter_map(|answer| {
                catalog
                    .get(answer.question_id())
                    .map(|question| (question, answer.points()))
            }))
        })
        .unwrap_or_default();

    AnimalHistoryView {
        animal_id: animal.id,
        name: animal.name.clone(),
        species: animal.species.clone(),
        evaluations: points.len(),
        average_score: rounded_average(points.iter().map(|point| point.score)),
        latest_score: points.last().map(|point| point.score),
        trend,
        trend_label: trend.label(),
        points,
        latest_breakdown,
    }
}

/// Latest score against the one before it.
fn trend(points: &[ScorePoint]) -> Trend {
    match points {
        [.., previous, latest] if latest.score > previous.score => Trend::Rising,
        [.., previous, latest] if latest.score < previous.score => Trend::Falling,
        _ => Trend::Stable,
    }
}
