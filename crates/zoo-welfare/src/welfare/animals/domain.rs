use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimalId(pub u64);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Role granted by the identity provider to the owning account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerRole {
    Admin,
    Caretaker,
}

impl OwnerRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Caretaker => "Caretaker",
        }
    }
}

/// Reference to the account responsible for an animal. Credentials live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub account: String,
    pub role: OwnerRole,
}

/// Animal content before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalDraft {
    pub name: String,
    pub species: String,
    pub birth_date: NaiveDate,
    pub notes: String,
    pub photo_url: Option<String>,
    pub owner: OwnerRef,
}

impl AnimalDraft {
    pub fn into_animal(self, id: AnimalId) -> Animal {
        Animal {
            id,
            name: self.name,
            species: self.species,
            birth_date: self.birth_date,
            notes: self.notes,
            photo_url: self.photo_url,
            owner: self.owner,
        }
    }
}

/// Scoring subject. Owns its evaluations; removing it removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub species: String,
    pub birth_date: NaiveDate,
    pub notes: String,
    pub photo_url: Option<String>,
    pub owner: OwnerRef,
}

impl Animal {
    /// Whole years between the birth date and `today`.
    pub fn age_in_years(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_date).unwrap_or(0)
    }

    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.species.to_lowercase().contains(&needle)
    }
}
