//! Ledger module - the persisted custom asset ledger and its reconciliation.

mod ledger_model;
mod ledger_service;
mod ledger_traits;
pub mod matching;
mod reconcile;

pub use ledger_model::{LedgerAsset, LedgerAssetUpdate, NewLedgerAsset, ReconcileSummary};
pub use ledger_service::LedgerService;
pub use ledger_traits::LedgerServiceTrait;
pub use reconcile::{reconcile, rename_assets, unlink_assets, Reconciliation};
