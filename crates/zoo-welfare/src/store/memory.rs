use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::welfare::animals::{Animal, AnimalDraft, AnimalId};
use crate::welfare::catalog::{Question, QuestionCatalog, QuestionDraft, QuestionId};
use crate::welfare::evaluations::{Evaluation, EvaluationAssembler, EvaluationDraft, EvaluationId};
use crate::welfare::repository::{
    AnimalRepository, EvaluationRepository, QuestionRepository, RepositoryError,
};

/// Serialized image of a [`MemoryStore`], written between CLI invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub questions: Vec<Question>,
    pub animals: Vec<Animal>,
    pub evaluations: Vec<Evaluation>,
}

#[derive(Debug, Default)]
struct State {
    questions: BTreeMap<QuestionId, Question>,
    animals: BTreeMap<AnimalId, Animal>,
    evaluations: BTreeMap<EvaluationId, Evaluation>,
    next_question: u32,
    next_animal: u64,
    next_evaluation: u64,
}

impl State {
    fn question_id(&mut self) -> QuestionId {
        self.next_question += 1;
        QuestionId(self.next_question)
    }

    fn animal_id(&mut self) -> AnimalId {
        self.next_animal += 1;
        AnimalId(self.next_animal)
    }

    fn evaluation_id(&mut self) -> EvaluationId {
        self.next_evaluation += 1;
        EvaluationId(self.next_evaluation)
    }
}

/// In-process store backing all three repositories. Identifiers are sequential per entity
/// and maps are ordered, so identical call sequences produce identical snapshots.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory store mutex poisoned".to_string()))
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot, RepositoryError> {
        let state = self.lock()?;
        Ok(StoreSnapshot {
            questions: state.questions.values().cloned().collect(),
            animals: state.animals.values().cloned().collect(),
            evaluations: state.evaluations.values().cloned().collect(),
        })
    }

    /// Rebuilds a store from a snapshot. Duplicate ids are a `Conflict`. The snapshot is
    /// unusable when a stored question is invalid, an evaluation points at a missing animal,
    /// or an evaluation's points and score disagree with the stored catalog.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, RepositoryError> {
        let mut state = State::default();

        for question in snapshot.questions {
            state.next_question = state.next_question.max(question.id.0);
            if state.questions.insert(question.id, question).is_some() {
                return Err(RepositoryError::Conflict);
            }
        }

        let questions = state.questions.values().cloned().collect();
        let catalog = QuestionCatalog::from_questions(questions)
            .map_err(|err| RepositoryError::Unavailable(format!("stored catalog: {err}")))?;
        let assembler = EvaluationAssembler::new(&catalog);

        for animal in snapshot.animals {
            state.next_animal = state.next_animal.max(animal.id.0);
            if state.animals.insert(animal.id, animal).is_some() {
                return Err(RepositoryError::Conflict);
            }
        }

        for evaluation in snapshot.evaluations {
            if !state.animals.contains_key(&evaluation.animal_id()) {
                return Err(RepositoryError::Unavailable(format!(
                    "evaluation {} references missing animal {}",
                    evaluation.id(),
                    evaluation.animal_id()
                )));
            }
            assembler.verify(&evaluation).map_err(|err| {
                RepositoryError::Unavailable(format!(
                    "evaluation {} is inconsistent with the catalog: {err}",
                    evaluation.id()
                ))
            })?;
            state.next_evaluation = state.next_evaluation.max(evaluation.id().0);
            if state.evaluations.insert(evaluation.id(), evaluation).is_some() {
                return Err(RepositoryError::Conflict);
            }
        }

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }
}

impl QuestionRepository for MemoryStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.questions.len())
    }

    fn insert_all(&self, drafts: Vec<QuestionDraft>) -> Result<Vec<Question>, RepositoryError> {
        let mut state = self.lock()?;
        if !state.questions.is_empty() {
            return Err(RepositoryError::Conflict);
        }

        let mut stored = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let question = draft.into_question(state.question_id());
            state.questions.insert(question.id, question.clone());
            stored.push(question);
        }
        Ok(stored)
    }

    fn all(&self) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.lock()?.questions.values().cloned().collect())
    }
}

impl AnimalRepository for MemoryStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.animals.len())
    }

    fn insert(&self, draft: AnimalDraft) -> Result<Animal, RepositoryError> {
        let mut state = self.lock()?;
        let animal = draft.into_animal(state.animal_id());
        state.animals.insert(animal.id, animal.clone());
        Ok(animal)
    }

    fn insert_all(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, RepositoryError> {
        let mut state = self.lock()?;
        if !state.animals.is_empty() {
            return Err(RepositoryError::Conflict);
        }

        let mut stored = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let animal = draft.into_animal(state.animal_id());
            state.animals.insert(animal.id, animal.clone());
            stored.push(animal);
        }
        Ok(stored)
    }

    fn fetch(&self, id: AnimalId) -> Result<Option<Animal>, RepositoryError> {
        Ok(self.lock()?.animals.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Animal>, RepositoryError> {
        Ok(self.lock()?.animals.values().cloned().collect())
    }

    fn delete(&self, id: AnimalId) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.animals.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        state
            .evaluations
            .retain(|_, evaluation| evaluation.animal_id() != id);
        Ok(())
    }
}

impl EvaluationRepository for MemoryStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.evaluations.len())
    }

    fn insert(&self, draft: EvaluationDraft) -> Result<Evaluation, RepositoryError> {
        let mut state = self.lock()?;
        if !state.animals.contains_key(&draft.animal_id()) {
            return Err(RepositoryError::NotFound);
        }
        let evaluation = draft.into_evaluation(state.evaluation_id());
        state.evaluations.insert(evaluation.id(), evaluation.clone());
        Ok(evaluation)
    }

    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        match state.evaluations.get_mut(&evaluation.id()) {
            Some(slot) => {
                *slot = evaluation;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        Ok(self.lock()?.evaluations.get(&id).cloned())
    }

    fn for_animal(&self, animal_id: AnimalId) -> Result<Vec<Evaluation>, RepositoryError> {
        let state = self.lock()?;
        let mut history: Vec<Evaluation> = state
            .evaluations
            .values()
            .filter(|evaluation| evaluation.animal_id() == animal_id)
            .cloned()
            .collect();
        history.sort_by(|left, right| {
            right
                .timestamp()
                .cmp(&left.timestamp())
                .then(right.id().cmp(&left.id()))
        });
        Ok(history)
    }

    fn all(&self) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self.lock()?.evaluations.values().cloned().collect())
    }

    fn delete(&self, id: EvaluationId) -> Result<(), RepositoryError> {
        match self.lock()?.evaluations.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}
