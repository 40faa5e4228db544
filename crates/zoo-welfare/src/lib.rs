//! Welfare questionnaire scoring, evaluation aggregates, and synthetic history seeding for
//! zoo and wildlife-care organisations.

pub mod clock;
pub mod config;
pub mod error;
pub mod random;
pub mod store;
pub mod telemetry;
pub mod welfare;
