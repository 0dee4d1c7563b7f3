use std::sync::Arc;

use crate::config::Config;
use pointfolio_core::{
    aggregation::{AggregationService, AggregationServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    state::StateStore,
};
use pointfolio_feeds::{
    ExtendedPointsProvider, FallbackPointsFeed, OctavPortfolioProvider, PointsFeed,
    PortfolioFeed, PortfolioRequest, StaticPointsFeed,
};
use pointfolio_storage_sqlite::{db, StateRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub aggregation_service: Arc<dyn AggregationServiceTrait>,
    /// Points source wrapped in a fallback; it never fails.
    pub points_feed: Arc<dyn PointsFeed>,
}

/// Installs the global subscriber. `PF_LOG_FORMAT=text` switches from JSON to
/// human-readable lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let text = std::env::var("PF_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("text"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if text {
        registry.with(fmt::layer()).init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let state_repository = Arc::new(StateRepository::new(pool.clone(), writer.clone()));
    let store = Arc::new(StateStore::new(state_repository));

    let project_service = Arc::new(ProjectService::new(store.clone()));
    let ledger_service: Arc<dyn LedgerServiceTrait> = Arc::new(LedgerService::new(store));

    let portfolio_feed: Arc<dyn PortfolioFeed> = Arc::new(OctavPortfolioProvider::new(
        config.portfolio_api_url.clone(),
        config.portfolio_api_key.clone(),
    ));
    let aggregation_service = Arc::new(AggregationService::new(
        portfolio_feed,
        PortfolioRequest::for_address(config.wallet_address.clone()),
        ledger_service.clone(),
    ));

    let upstream: Arc<dyn PointsFeed> = if config.points_demo {
        tracing::info!("Points feed running on the demo snapshot");
        Arc::new(StaticPointsFeed::demo())
    } else {
        Arc::new(
            ExtendedPointsProvider::new(
                config.points_api_url.clone(),
                config.points_api_key.clone(),
            )
            .with_source_name(config.points_source_name.clone()),
        )
    };
    let points_feed = Arc::new(FallbackPointsFeed::new(upstream));

    Ok(Arc::new(AppState {
        project_service,
        ledger_service,
        aggregation_service,
        points_feed,
    }))
}
