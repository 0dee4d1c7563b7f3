use std::sync::Arc;

use crate::{api::points::perform_points_sync, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use pointfolio_core::ledger::{LedgerAsset, LedgerAssetUpdate, NewLedgerAsset, ReconcileSummary};

async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<LedgerAsset>>> {
    let assets = state.ledger_service.list_assets()?;
    Ok(Json(assets))
}

async fn add_asset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewLedgerAsset>,
) -> ApiResult<Json<LedgerAsset>> {
    let asset = state.ledger_service.add_asset(payload).await?;
    Ok(Json(asset))
}

async fn update_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<LedgerAssetUpdate>,
) -> ApiResult<Json<LedgerAsset>> {
    payload.id = id;
    let asset = state.ledger_service.update_asset(payload).await?;
    Ok(Json(asset))
}

async fn delete_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LedgerAsset>> {
    let asset = state.ledger_service.delete_asset(&id).await?;
    Ok(Json(asset))
}

/// Fetches points now and reconciles them into the ledger.
async fn reconcile_ledger(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReconcileSummary>> {
    let sync = perform_points_sync(&state).await?;
    Ok(Json(sync.summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ledger/assets", get(list_assets).post(add_asset))
        .route("/ledger/assets/{id}", put(update_asset).delete(delete_asset))
        .route("/ledger/reconcile", post(reconcile_ledger))
}
