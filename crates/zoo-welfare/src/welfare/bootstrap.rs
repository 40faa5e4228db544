use tracing::info;

use super::catalog::{CatalogLoadError, CatalogSeedOutcome, QuestionCatalog};
use super::repository::{AnimalRepository, EvaluationRepository, QuestionRepository};
use super::simulation::{SimulationEngine, SimulationError, SimulationOutcome};
use crate::clock::Clock;
use crate::random::RandomSource;

/// What one bootstrap phase did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Seeded { created: usize },
    Skipped { existing: usize },
}

impl BootstrapPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seeded { .. } => "seeded",
            Self::Skipped { .. } => "skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub catalog: BootstrapPhase,
    pub animals: BootstrapPhase,
    /// Evaluations written by the simulation phase.
    pub evaluations: usize,
}

/// Two-phase store initialisation: the question catalog first, then simulated history.
/// Each phase only writes into an empty store, so repeated runs are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bootstrapper {
    simulation: SimulationEngine,
}

impl Bootstrapper {
    pub fn new(simulation: SimulationEngine) -> Self {
        Self { simulation }
    }

    pub fn run<S, R, C>(
        &self,
        store: &S,
        random: &mut R,
        clock: &C,
    ) -> Result<BootstrapReport, BootstrapError>
    where
        S: QuestionRepository + AnimalRepository + EvaluationRepository + ?Sized,
        R: RandomSource + ?Sized,
        C: Clock + ?Sized,
    {
        let catalog = match QuestionCatalog::seed(store)? {
            CatalogSeedOutcome::Seeded { questions } => BootstrapPhase::Seeded {
                created: questions,
            },
            CatalogSeedOutcome::AlreadyPresent { questions } => BootstrapPhase::Skipped {
                existing: questions,
            },
        };

        let (animals, evaluations) = match self.simulation.run(store, random, clock)? {
            SimulationOutcome::Seeded {
                animals,
                evaluations,
            } => (BootstrapPhase::Seeded { created: animals }, evaluations),
            SimulationOutcome::Skipped { existing_animals } => (
                BootstrapPhase::Skipped {
                    existing: existing_animals,
                },
                0,
            ),
        };

        info!(
            catalog = catalog.label(),
            animals = animals.label(),
            evaluations,
            "bootstrap finished"
        );
        Ok(BootstrapReport {
            catalog,
            animals,
            evaluations,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("catalog phase failed: {0}")]
    Catalog(#[from] CatalogLoadError),
    #[error("simulation phase failed: {0}")]
    Simulation(#[from] SimulationError),
}
