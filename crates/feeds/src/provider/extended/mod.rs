//! Extended exchange provider for reward points.
//!
//! Reads the user's leaderboard stats with a server-held `X-Api-Key` and
//! normalizes the answer into named point balances.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::FeedError;
use crate::models::{normalize_points, PointBalance};
use crate::provider::{build_client, PointsFeed};

/// Provider ID constant
const PROVIDER_ID: &str = "EXTENDED";

/// Default leaderboard stats endpoint
pub const DEFAULT_STATS_URL: &str =
    "https://api.extended.exchange/api/v1/user/rewards/leaderboard/stats";

/// Name given to balances when the upstream reports a single total.
pub const DEFAULT_SOURCE_NAME: &str = "extended";

pub struct ExtendedPointsProvider {
    client: Client,
    stats_url: String,
    api_key: String,
    source_name: String,
}

impl ExtendedPointsProvider {
    pub fn new(stats_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            stats_url: stats_url.into(),
            api_key: api_key.into(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }

    /// Overrides the balance name used for single-total responses.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }
}

#[async_trait]
impl PointsFeed for ExtendedPointsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError> {
        if self.api_key.trim().is_empty() {
            return Err(FeedError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let response = self
            .client
            .get(&self.stats_url)
            .header("X-Api-Key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::from_status(PROVIDER_ID, status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FeedError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let points = normalize_points(PROVIDER_ID, &body, &self.source_name)?;
        debug!("Fetched {} point balances", points.len());
        Ok(points)
    }
}
