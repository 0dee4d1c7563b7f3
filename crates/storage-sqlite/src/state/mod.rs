//! SQLite storage implementation for persisted ledger state.

mod model;
mod repository;

pub use model::AppStateDB;
pub use repository::StateRepository;

// Re-export trait from core for convenience
pub use pointfolio_core::state::StateRepositoryTrait;
