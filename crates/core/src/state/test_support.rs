//! In-memory state repository shared by the core unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{StateEntry, StateRepositoryTrait, StateStore};
use crate::errors::{DatabaseError, Error, Result};

#[derive(Default)]
pub struct MockStateRepository {
    values: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<Vec<StateEntry>>>,
    fail_writes: AtomicBool,
}

impl MockStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    /// Every `put_state` call received, in order.
    pub fn writes(&self) -> Vec<Vec<StateEntry>> {
        self.writes.read().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.read().unwrap().len()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StateRepositoryTrait for MockStateRepository {
    fn get_state(&self, state_key: &str) -> Result<Option<String>> {
        Ok(self.raw(state_key))
    }

    async fn put_state(&self, entries: Vec<StateEntry>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk full".to_string(),
            )));
        }
        let mut values = self.values.write().unwrap();
        for entry in &entries {
            values.insert(entry.key.clone(), entry.value.clone());
        }
        self.writes.write().unwrap().push(entries);
        Ok(())
    }
}

pub fn store_with(repository: &Arc<MockStateRepository>) -> Arc<StateStore> {
    Arc::new(StateStore::new(repository.clone()))
}
