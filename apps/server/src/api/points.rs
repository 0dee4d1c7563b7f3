use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use pointfolio_core::ledger::ReconcileSummary;
use pointfolio_feeds::PointBalance;

/// A fetched points snapshot and the reconciliation it triggered.
pub struct PointsSync {
    pub points: Vec<PointBalance>,
    pub summary: ReconcileSummary,
}

/// Fetches the points feed and reconciles the snapshot into the ledger.
///
/// Shared by the points endpoints and the background scheduler.
pub async fn perform_points_sync(state: &Arc<AppState>) -> ApiResult<PointsSync> {
    let points = state.points_feed.fetch_points().await?;
    tracing::debug!(
        "Fetched {} point balances from {}",
        points.len(),
        state.points_feed.id()
    );
    let summary = state
        .ledger_service
        .reconcile_points(points.clone())
        .await?;
    Ok(PointsSync { points, summary })
}

/// Normalized points, with the fallback payload when the upstream fails.
/// Every fetch is reconciled into the ledger before responding.
async fn get_user_points(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PointBalance>>> {
    let sync = perform_points_sync(&state).await?;
    Ok(Json(sync.points))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/user-points", get(get_user_points))
}
