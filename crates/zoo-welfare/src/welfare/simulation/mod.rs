//! Synthetic evaluation history for demonstration stores.
//!
//! A run plans every animal, visit and answer up front (all random draws and all scoring),
//! then writes the roster as one batch followed by its evaluations. If an evaluation write
//! fails, the roster is deleted again, which cascades to its evaluations, so a run either
//! lands completely or not at all.

mod archetypes;
mod tiers;

pub use archetypes::{AnimalArchetype, ARCHETYPES, EVALUATORS, LOCATIONS};
pub use tiers::{select_option, AnswerTier, HealthProfile};

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::SimulationSettings;
use crate::random::{choose, RandomSource};
use crate::welfare::animals::{AnimalDraft, AnimalId, OwnerRef, OwnerRole};
use crate::welfare::catalog::{CatalogLoadError, QuestionCatalog};
use crate::welfare::evaluations::{
    AnswerSelection, EvaluationAssembler, EvaluationDraft, EvaluationError, EvaluationMetadata,
};
use crate::welfare::repository::{
    AnimalRepository, EvaluationRepository, QuestionRepository, RepositoryError,
};

/// Visits per animal are drawn from this inclusive range.
pub const VISITS_PER_ANIMAL: (i64, i64) = (3, 7);
/// Animal ages in whole years are drawn from this inclusive range.
pub const AGE_YEARS: (i64, i64) = (2, 16);
pub const DEFAULT_VISIT_SPACING_DAYS: u32 = 5;

const NEEDS_OBSERVATION: &str = "Needs observation.";
const NO_ISSUES: &str = "No issues.";

/// Result of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationOutcome {
    Seeded { animals: usize, evaluations: usize },
    Skipped { existing_animals: usize },
}

/// Generates plausible historical evaluations for the fixed archetype roster.
#[derive(Debug, Clone, Copy)]
pub struct SimulationEngine {
    visit_spacing: Duration,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_VISIT_SPACING_DAYS)
    }
}

struct PlannedAnimal {
    draft: AnimalDraft,
    evaluations: Vec<EvaluationDraft>,
}

impl SimulationEngine {
    pub fn new(visit_spacing_days: u32) -> Self {
        Self {
            visit_spacing: Duration::days(i64::from(visit_spacing_days.max(1))),
        }
    }

    pub fn from_settings(settings: &SimulationSettings) -> Self {
        Self::new(settings.visit_spacing_days)
    }

    /// Populates an empty animal store. Leaves any existing animal data untouched.
    pub fn run<S, R, C>(
        &self,
        store: &S,
        random: &mut R,
        clock: &C,
    ) -> Result<SimulationOutcome, SimulationError>
    where
        S: QuestionRepository + AnimalRepository + EvaluationRepository + ?Sized,
        R: RandomSource + ?Sized,
        C: Clock + ?Sized,
    {
        let existing_animals = AnimalRepository::count(store)?;
        if existing_animals > 0 {
            debug!(existing_animals, "animal data present; skipping simulation");
            return Ok(SimulationOutcome::Skipped { existing_animals });
        }

        let catalog = QuestionCatalog::load(store)?;
        if catalog.is_empty() {
            return Err(SimulationError::CatalogNotSeeded);
        }

        let plan = self.plan(&catalog, random, clock.now())?;
        let outcome = self.persist(store, plan)?;

        match outcome {
            SimulationOutcome::Seeded {
                animals,
                evaluations,
            } => info!(animals, evaluations, "seeded simulated welfare history"),
            SimulationOutcome::Skipped { existing_animals } => debug!(
                existing_animals,
                "another run populated the animals first; discarding plan"
            ),
        }
        Ok(outcome)
    }

    fn plan<R>(
        &self,
        catalog: &QuestionCatalog,
        random: &mut R,
        now: NaiveDateTime,
    ) -> Result<Vec<PlannedAnimal>, SimulationError>
    where
        R: RandomSource + ?Sized,
    {
        let today = now.date();
        let drafts: Vec<AnimalDraft> = ARCHETYPES
            .iter()
            .map(|archetype| animal_draft(archetype, today, random))
            .collect();

        let assembler = EvaluationAssembler::new(catalog);
        let mut plan = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let profile = HealthProfile::draw(random);
            let visits = random.uniform_int(VISITS_PER_ANIMAL.0, VISITS_PER_ANIMAL.1);
            debug!(
                animal = %draft.name,
                health = profile.value(),
                visits,
                "planned simulated history"
            );

            let mut evaluations = Vec::with_capacity(visits as usize);
            for visit in 0..visits {
                let timestamp = now - self.visit_spacing * (visits - 1 - visit) as i32;
                let metadata = visit_metadata(visit, timestamp, random);
                let selections = simulate_answers(catalog, profile, random);
                // Placeholder owner; reassigned once the animal has an id.
                evaluations.push(assembler.assemble(
                    AnimalId(0),
                    metadata,
                    selections,
                    timestamp,
                )?);
            }

            plan.push(PlannedAnimal { draft, evaluations });
        }

        Ok(plan)
    }

    /// Writes the roster in one batch, then its evaluations. A roster rejected with
    /// `Conflict` means animals appeared after the emptiness check, and the run is skipped.
    fn persist<S>(
        &self,
        store: &S,
        plan: Vec<PlannedAnimal>,
    ) -> Result<SimulationOutcome, SimulationError>
    where
        S: AnimalRepository + EvaluationRepository + ?Sized,
    {
        let (drafts, histories): (Vec<AnimalDraft>, Vec<Vec<EvaluationDraft>>) = plan
            .into_iter()
            .map(|planned| (planned.draft, planned.evaluations))
            .unzip();

        let animals = match AnimalRepository::insert_all(store, drafts) {
            Ok(animals) => animals,
            Err(RepositoryError::Conflict) => {
                return Ok(SimulationOutcome::Skipped {
                    existing_animals: AnimalRepository::count(store)?,
                })
            }
            Err(err) => return Err(SimulationError::Persistence(err)),
        };

        let created: Vec<AnimalId> = animals.iter().map(|animal| animal.id).collect();
        let mut evaluations = 0;
        for (animal, history) in animals.iter().zip(histories) {
            for draft in history {
                if let Err(err) = EvaluationRepository::insert(store, draft.reassigned_to(animal.id))
                {
                    rollback(store, &created);
                    return Err(SimulationError::Persistence(err));
                }
                evaluations += 1;
            }
        }

        Ok(SimulationOutcome::Seeded {
            animals: animals.len(),
            evaluations,
        })
    }
}

fn animal_draft<R>(
    archetype: &AnimalArchetype,
    today: NaiveDate,
    random: &mut R,
) -> AnimalDraft
where
    R: RandomSource + ?Sized,
{
    let years = random.uniform_int(AGE_YEARS.0, AGE_YEARS.1);
    let birth_date = today
        .checked_sub_months(Months::new(years as u32 * 12))
        .unwrap_or(today);
    let owner = if random.uniform() < 0.5 {
        OwnerRef {
            account: archetypes::ADMIN_ACCOUNT.to_string(),
            role: OwnerRole::Admin,
        }
    } else {
        OwnerRef {
            account: archetypes::CARETAKER_ACCOUNT.to_string(),
            role: OwnerRole::Caretaker,
        }
    };

    AnimalDraft {
        name: archetype.name.to_string(),
        species: archetype.species.to_string(),
        birth_date,
        notes: archetypes::RESIDENT_NOTES.to_string(),
        photo_url: Some(archetype.photo_url.to_string()),
        owner,
    }
}

fn visit_metadata<R>(visit: i64, timestamp: NaiveDateTime, random: &mut R) -> EvaluationMetadata
where
    R: RandomSource + ?Sized,
{
    let location = choose(random, &LOCATIONS).copied().unwrap_or(LOCATIONS[0]);
    let evaluator = choose(random, &EVALUATORS).copied().unwrap_or(EVALUATORS[0]);
    let role = if visit == 0 {
        archetypes::LEAD_ROLE
    } else {
        archetypes::FOLLOW_UP_ROLE
    };

    EvaluationMetadata {
        timestamp: Some(timestamp),
        started_at: Some(timestamp - Duration::hours(1)),
        ended_at: Some(timestamp),
        location: location.to_string(),
        evaluator_name: evaluator.to_string(),
        evaluator_role: role.to_string(),
        confidence_level: 5,
        notes: archetypes::VISIT_NOTES.to_string(),
        photo_urls: Vec::new(),
    }
}

fn simulate_answers<R>(
    catalog: &QuestionCatalog,
    profile: HealthProfile,
    random: &mut R,
) -> Vec<AnswerSelection>
where
    R: RandomSource + ?Sized,
{
    catalog
        .questions()
        .iter()
        .filter_map(|question| {
            let tier = profile.tier_for(random.uniform());
            select_option(question, tier).map(|(letter, option)| {
                let comment = if option.points < 4 {
                    NEEDS_OBSERVATION
                } else {
                    NO_ISSUES
                };
                AnswerSelection::new(question.id, letter).with_comment(comment)
            })
        })
        .collect()
}

fn rollback<S>(store: &S, created: &[AnimalId])
where
    S: AnimalRepository + ?Sized,
{
    for id in created {
        if let Err(err) = AnimalRepository::delete(store, *id) {
            warn!(animal_id = %id, error = %err, "failed to roll back simulated animal");
        }
    }
    warn!(animals = created.len(), "rolled back partial simulation run");
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("question catalog is empty; seed it before simulating history")]
    CatalogNotSeeded,
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
    #[error(transparent)]
    Scoring(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("simulation write failed and was rolled back: {0}")]
    Persistence(RepositoryError),
}

#[cfg(test)]
mod tests;
