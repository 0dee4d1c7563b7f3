use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use pointfolio_feeds::PointBalance;

use super::reconcile::price_asset;
use super::{
    reconcile, LedgerAsset, LedgerAssetUpdate, LedgerServiceTrait, NewLedgerAsset,
    ReconcileSummary,
};
use crate::errors::{Error, Result};
use crate::state::StateStore;

/// Service for the custom asset ledger.
pub struct LedgerService {
    store: Arc<StateStore>,
}

impl LedgerService {
    pub fn new(store: Arc<StateStore>) -> Self {
        LedgerService { store }
    }

    fn not_found(asset_id: &str) -> Error {
        Error::NotFound(format!("Ledger asset {} not found", asset_id))
    }

    fn duplicate(name: &str) -> Error {
        Error::ConstraintViolation(format!("Ledger already holds an asset named '{}'", name))
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    fn list_assets(&self) -> Result<Vec<LedgerAsset>> {
        self.store.load_assets()
    }

    fn latest_points(&self) -> Option<Vec<PointBalance>> {
        self.store.latest_points()
    }

    async fn reconcile_points(&self, points: Vec<PointBalance>) -> Result<ReconcileSummary> {
        let mutation = self
            .store
            .mutate(move |state| {
                let outcome = reconcile(&points, &state.projects, &state.assets);
                state.points = Some(points);
                state.assets = outcome.assets;
                Ok((outcome.created, outcome.updated, state.assets.clone()))
            })
            .await?;

        let (created, updated, assets) = mutation.output;
        if mutation.written {
            info!(
                "Reconciled points snapshot: {} created, {} updated",
                created, updated
            );
        } else {
            debug!("Reconciled points snapshot: ledger unchanged");
        }

        Ok(ReconcileSummary {
            created,
            updated,
            written: mutation.written,
            assets,
        })
    }

    async fn add_asset(&self, new_asset: NewLedgerAsset) -> Result<LedgerAsset> {
        let (name, quantity) = new_asset.validate()?;

        let mutation = self
            .store
            .mutate(move |state| {
                if state.assets.iter().any(|asset| asset.name == name) {
                    return Err(Self::duplicate(&name));
                }
                let mut asset = LedgerAsset::new(name, quantity);
                price_asset(&mut asset, &state.projects);
                state.assets.push(asset.clone());
                Ok(asset)
            })
            .await?;

        let asset = mutation.output;
        info!("Added ledger asset '{}'", asset.name);
        Ok(asset)
    }

    async fn update_asset(&self, asset_update: LedgerAssetUpdate) -> Result<LedgerAsset> {
        let mutation = self
            .store
            .mutate(move |state| {
                let index = state
                    .assets
                    .iter()
                    .position(|asset| asset.id == asset_update.id)
                    .ok_or_else(|| Self::not_found(&asset_update.id))?;
                let (name, quantity) = asset_update.merge_into(&state.assets[index])?;

                let taken = state
                    .assets
                    .iter()
                    .enumerate()
                    .any(|(i, asset)| i != index && asset.name == name);
                if taken {
                    return Err(Self::duplicate(&name));
                }

                let asset = &mut state.assets[index];
                asset.name = name;
                asset.set_quantity(quantity);
                price_asset(asset, &state.projects);
                Ok(asset.clone())
            })
            .await?;

        Ok(mutation.output)
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<LedgerAsset> {
        let asset_id = asset_id.to_string();
        let mutation = self
            .store
            .mutate(move |state| {
                let index = state
                    .assets
                    .iter()
                    .position(|asset| asset.id == asset_id)
                    .ok_or_else(|| Self::not_found(&asset_id))?;
                Ok(state.assets.remove(index))
            })
            .await?;

        let asset = mutation.output;
        info!("Deleted ledger asset '{}'", asset.name);
        Ok(asset)
    }
}
