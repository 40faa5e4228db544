use std::sync::Arc;

use tracing::info;

use super::domain::{Animal, AnimalDraft, AnimalId};
use crate::welfare::repository::{AnimalRepository, RepositoryError};

/// Registry facade over the animal repository.
pub struct AnimalRegistry<R> {
    repository: Arc<R>,
}

impl<R> AnimalRegistry<R>
where
    R: AnimalRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn register(&self, draft: AnimalDraft) -> Result<Animal, AnimalError> {
        if draft.name.trim().is_empty() {
            return Err(AnimalError::MissingField("name"));
        }
        if draft.species.trim().is_empty() {
            return Err(AnimalError::MissingField("species"));
        }

        let animal = self.repository.insert(draft)?;
        info!(animal_id = %animal.id, name = %animal.name, "registered animal");
        Ok(animal)
    }

    pub fn get(&self, id: AnimalId) -> Result<Animal, AnimalError> {
        self.repository
            .fetch(id)?
            .ok_or(AnimalError::NotFound(id))
    }

    pub fn list(&self) -> Result<Vec<Animal>, AnimalError> {
        Ok(self.repository.all()?)
    }

    /// Case-insensitive substring match over name or species.
    pub fn search(&self, query: &str) -> Result<Vec<Animal>, AnimalError> {
        Ok(self
            .repository
            .all()?
            .into_iter()
            .filter(|animal| animal.matches(query))
            .collect())
    }

    /// Removes the animal together with its evaluation history.
    pub fn delete(&self, id: AnimalId) -> Result<(), AnimalError> {
        match self.repository.delete(id) {
            Ok(()) => {
                info!(animal_id = %id, "deleted animal and its evaluations");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(AnimalError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnimalError {
    #[error("animal {0} not found")]
    NotFound(AnimalId),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::welfare::animals::{OwnerRef, OwnerRole};
    use chrono::NaiveDate;

    fn draft(name: &str, species: &str) -> AnimalDraft {
        AnimalDraft {
            name: name.to_string(),
            species: species.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 6, 1).expect("valid date"),
            notes: String::new(),
            photo_url: None,
            owner: OwnerRef {
                account: "caretaker@welfare.local".to_string(),
                role: OwnerRole::Caretaker,
            },
        }
    }

    #[test]
    fn register_requires_name_and_species() {
        let registry = AnimalRegistry::new(Arc::new(MemoryStore::default()));

        assert!(matches!(
            registry.register(draft(" ", "Red Panda")),
            Err(AnimalError::MissingField("name"))
        ));
        assert!(matches!(
            registry.register(draft("Pabu", "")),
            Err(AnimalError::MissingField("species"))
        ));
    }

    #[test]
    fn search_matches_name_or_species_case_insensitively() {
        let registry = AnimalRegistry::new(Arc::new(MemoryStore::default()));
        registry
            .register(draft("Kaiser", "African Lion"))
            .expect("register");
        registry
            .register(draft("Kiara", "Lioness"))
            .expect("register");
        registry
            .register(draft("Pabu", "Red Panda"))
            .expect("register");

        let lions = registry.search("LION").expect("search");
        assert_eq!(lions.len(), 2);

        let by_name = registry.search("pab").expect("search");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Pabu");
    }

    #[test]
    fn get_and_delete_report_missing_animals() {
        let registry = AnimalRegistry::new(Arc::new(MemoryStore::default()));

        assert!(matches!(
            registry.get(AnimalId(41)),
            Err(AnimalError::NotFound(AnimalId(41)))
        ));
        assert!(matches!(
            registry.delete(AnimalId(41)),
            Err(AnimalError::NotFound(AnimalId(41)))
        ));
    }

    #[test]
    fn age_counts_whole_years() {
        let animal = draft("George", "Galapagos Tortoise").into_animal(AnimalId(1));
        let today = NaiveDate::from_ymd_opt(2025, 5, 31).expect("valid date");
        assert_eq!(animal.age_in_years(today), 9);
    }
}
