//! Storage adapters for the welfare repositories.

mod memory;

pub use memory::{MemoryStore, StoreSnapshot};
