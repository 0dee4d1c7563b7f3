//! State models.

use pointfolio_feeds::PointBalance;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerAsset;
use crate::projects::ProjectRegistry;

/// One key-value pair to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntry {
    pub key: String,
    pub value: String,
}

impl StateEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Current registry and ledger, read together from the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub projects: ProjectRegistry,
    pub assets: Vec<LedgerAsset>,
    /// Latest points snapshot seen by this process. Held in memory only.
    pub points: Option<Vec<PointBalance>>,
}

impl LedgerState {
    pub fn new(projects: ProjectRegistry, assets: Vec<LedgerAsset>) -> Self {
        Self {
            projects,
            assets,
            points: None,
        }
    }

    /// Points to reconcile against; empty until a snapshot has been seen.
    pub fn snapshot(&self) -> &[PointBalance] {
        self.points.as_deref().unwrap_or_default()
    }
}

/// Outcome of a state mutation.
#[derive(Debug, Clone)]
pub struct Mutation<R> {
    pub output: R,
    /// Whether anything was written back to the store.
    pub written: bool,
}
