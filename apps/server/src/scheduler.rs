//! Background scheduler for periodic points refresh.
//!
//! Fetches the points feed on a fixed interval and reconciles the snapshot
//! into the ledger.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::points::perform_points_sync;
use crate::main_lib::AppState;

/// Initial delay before the first refresh, to let the server finish starting.
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the background points refresh scheduler.
pub fn start_points_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("Points refresh scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut refresh_interval = interval(every);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

/// Runs a single scheduled refresh.
async fn run_scheduled_refresh(state: &Arc<AppState>) {
    debug!("Running scheduled points refresh...");

    match perform_points_sync(state).await {
        Ok(sync) if sync.summary.written => {
            info!(
                "Scheduled points refresh completed: {} created, {} updated",
                sync.summary.created, sync.summary.updated
            );
        }
        Ok(_) => debug!("Scheduled points refresh completed: ledger unchanged"),
        Err(e) => warn!("Scheduled points refresh failed: {}", e),
    }
}
