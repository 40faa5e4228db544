pub mod domain;
pub mod service;

pub use domain::{Animal, AnimalDraft, AnimalId, OwnerRef, OwnerRole};
pub use service::{AnimalError, AnimalRegistry};
