//! Read-side welfare reports: per-animal score history and the organisation dashboard.

mod dashboard;
mod history;
pub mod views;


pub use dashboard::{dashboard, DEFAULT_ALERT_THRESHOLD, RECENT_ACTIVITY_LIMIT};
pub use history::animal_history;
pub use views::{
    ActivityEntry, AnimalHistoryView, DashboardView, RiskAlertView, ScorePoint, Trend,
    WelfareStatus,
};

use std::sync::Arc;

use super::animals::AnimalId;
use super::catalog::QuestionCatalog;
use super::repository::{AnimalRepository, EvaluationRepository, RepositoryError};

/// Repository-backed entry point for the report builders.
pub struct WelfareReporter<A, E> {
    catalog: Arc<QuestionCatalog>,
    animals: Arc<A>,
    evaluations: Arc<E>,
    alert_threshold: u8,
}

impl<A, E> WelfareReporter<A, E>
where
    A: AnimalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        animals: Arc<A>,
        evaluations: Arc<E>,
        alert_threshold: u8,
    ) -> Self {
        Self {
            catalog,
            animals,
            evaluations,
            alert_threshold,
        }
    }

    pub fn animal_history(&self, animal_id: AnimalId) -> Result<AnimalHistoryView, ReportError> {
        let animal = self
            .animals
            .fetch(animal_id)?
            .ok_or(ReportError::AnimalNotFound(animal_id))?;
        let evaluations = self.evaluations.for_animal(animal_id)?;
        Ok(animal_history(&animal, &evaluations, &self.catalog))
    }

    pub fn dashboard(&self) -> Result<DashboardView, ReportError> {
        let animals = self.animals.all()?;
        let evaluations = self.evaluations.all()?;
        Ok(dashboard(&animals, &evaluations, self.alert_threshold))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("animal {0} not found")]
    AnimalNotFound(AnimalId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Integer mean rounded half up; 0 for no scores.
pub(crate) fn rounded_average<I>(scores: I) -> u8
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), score| {
            (sum + u64::from(score), count + 1)
        });
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)).min(100) as u8
}
