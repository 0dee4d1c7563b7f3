use std::sync::{Arc, RwLock};

use log::{debug, warn};
use pointfolio_feeds::PointBalance;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::{LedgerState, Mutation, StateEntry, StateRepositoryTrait};
use crate::constants::{CUSTOM_ASSETS_KEY, PROJECTS_KEY};
use crate::errors::Result;
use crate::ledger::LedgerAsset;
use crate::projects::ProjectRegistry;

/// Typed access to the persisted registry and ledger.
///
/// All mutations are serialized through one lock and read the current state
/// from the repository inside it, so a mutation never works from a stale
/// snapshot. Both keys touched by a mutation are written in a single
/// `put_state` call, and nothing is written when the state is unchanged.
///
/// The latest points snapshot lives next to the persisted state so that
/// registry mutations reconcile against it too. It is never persisted.
pub struct StateStore {
    repository: Arc<dyn StateRepositoryTrait>,
    write_lock: Mutex<()>,
    latest_points: RwLock<Option<Vec<PointBalance>>>,
}

impl StateStore {
    pub fn new(repository: Arc<dyn StateRepositoryTrait>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
            latest_points: RwLock::new(None),
        }
    }

    /// The last points snapshot committed through [`mutate`](Self::mutate).
    pub fn latest_points(&self) -> Option<Vec<PointBalance>> {
        match self.latest_points.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_latest_points(&self, points: Option<Vec<PointBalance>>) {
        let mut latest = match self.latest_points.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *latest = points;
    }

    /// Loads the project registry. Malformed JSON yields an empty registry.
    pub fn load_projects(&self) -> Result<ProjectRegistry> {
        let registry: ProjectRegistry = self.load_key(PROJECTS_KEY)?;
        Ok(registry.normalized())
    }

    /// Loads the ledger. Malformed JSON yields an empty ledger.
    pub fn load_assets(&self) -> Result<Vec<LedgerAsset>> {
        self.load_key(CUSTOM_ASSETS_KEY)
    }

    pub fn load(&self) -> Result<LedgerState> {
        let mut state = LedgerState::new(self.load_projects()?, self.load_assets()?);
        state.points = self.latest_points();
        Ok(state)
    }

    /// Runs `f` against the current state and persists whatever it changed.
    ///
    /// If `f` returns an error, or the write fails, the store and the latest
    /// points snapshot are left untouched.
    pub async fn mutate<R, F>(&self, f: F) -> Result<Mutation<R>>
    where
        F: FnOnce(&mut LedgerState) -> Result<R>,
    {
        let _guard = self.write_lock.lock().await;

        let mut state = self.load()?;
        let projects_before = serde_json::to_string(&state.projects)?;
        let assets_before = serde_json::to_string(&state.assets)?;

        let output = f(&mut state)?;

        let projects_after = serde_json::to_string(&state.projects)?;
        let assets_after = serde_json::to_string(&state.assets)?;

        let mut entries = Vec::with_capacity(2);
        if projects_after != projects_before {
            entries.push(StateEntry::new(PROJECTS_KEY, projects_after));
        }
        if assets_after != assets_before {
            entries.push(StateEntry::new(CUSTOM_ASSETS_KEY, assets_after));
        }

        let written = !entries.is_empty();
        if written {
            debug!(
                "Persisting state keys: {:?}",
                entries.iter().map(|e| e.key.as_str()).collect::<Vec<_>>()
            );
            self.repository.put_state(entries).await?;
        }
        self.set_latest_points(state.points);

        Ok(Mutation { output, written })
    }

    fn load_key<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.repository.get_state(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    "Discarding malformed persisted state for '{}': {}. Starting empty.",
                    key, e
                );
                Ok(T::default())
            }
        }
    }
}
