//! Repository trait for the key-value state store.

use async_trait::async_trait;

use super::StateEntry;
use crate::errors::Result;

/// Key-value persistence port.
///
/// Implemented by the storage crate; the core only issues discrete reads and
/// writes through it.
#[async_trait]
pub trait StateRepositoryTrait: Send + Sync {
    /// Get the raw value stored under `state_key`, if any.
    fn get_state(&self, state_key: &str) -> Result<Option<String>>;

    /// Write every entry in one atomic step. Existing values are replaced.
    async fn put_state(&self, entries: Vec<StateEntry>) -> Result<()>;
}
