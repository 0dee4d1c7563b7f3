use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use pointfolio_core::aggregation::{PortfolioSummary, SeriesEntry};

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    let summary = state.aggregation_service.summary().await?;
    Ok(Json(summary))
}

async fn get_allocation(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SeriesEntry>>> {
    let series = state.aggregation_service.allocation().await?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio/summary", get(get_summary))
        .route("/portfolio/allocation", get(get_allocation))
}
