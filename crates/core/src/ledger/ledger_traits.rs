use async_trait::async_trait;
use pointfolio_feeds::PointBalance;

use super::{LedgerAsset, LedgerAssetUpdate, NewLedgerAsset, ReconcileSummary};
use crate::errors::Result;

/// Ledger service operations.
///
/// Mutations read the current registry and ledger at invocation time and
/// commit through the state store.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Current ledger rows in stored order.
    fn list_assets(&self) -> Result<Vec<LedgerAsset>>;

    /// The most recent points snapshot passed to [`reconcile_points`](Self::reconcile_points).
    fn latest_points(&self) -> Option<Vec<PointBalance>>;

    /// Reconciles a points snapshot into the ledger, writing only on change.
    async fn reconcile_points(&self, points: Vec<PointBalance>) -> Result<ReconcileSummary>;

    /// Adds a manually entered asset. Names must be unique within the ledger.
    async fn add_asset(&self, new_asset: NewLedgerAsset) -> Result<LedgerAsset>;

    async fn update_asset(&self, asset_update: LedgerAssetUpdate) -> Result<LedgerAsset>;

    async fn delete_asset(&self, asset_id: &str) -> Result<LedgerAsset>;
}
