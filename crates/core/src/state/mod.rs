//! Persisted ledger state - the storage port and the typed store on top of it.

mod state_model;
mod state_store;
mod state_traits;

pub use state_model::{LedgerState, Mutation, StateEntry};
pub use state_store::StateStore;
pub use state_traits::StateRepositoryTrait;

#[cfg(test)]
pub(crate) mod test_support;
