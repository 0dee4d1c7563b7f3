//! Octav provider for wallet portfolio data.
//!
//! Calls `GET {base}/v1/portfolio` with a bearer API key. The endpoint can
//! answer with one portfolio object or an array of them (one per requested
//! address); only the first is used since the dashboard tracks one address.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::FeedError;
use crate::models::{Portfolio, PortfolioRequest};
use crate::provider::{build_client, PortfolioFeed};

/// Provider ID constant
const PROVIDER_ID: &str = "OCTAV";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.octav.fi";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortfolioResponse {
    Many(Vec<Portfolio>),
    One(Box<Portfolio>),
}

/// Octav portfolio provider.
///
/// # Example
///
/// ```ignore
/// use pointfolio_feeds::OctavPortfolioProvider;
///
/// let provider = OctavPortfolioProvider::new("https://api.octav.fi", "your_api_key");
/// ```
pub struct OctavPortfolioProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OctavPortfolioProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn portfolio_url(&self) -> String {
        format!("{}/v1/portfolio", self.base_url)
    }

    fn query(request: &PortfolioRequest) -> [(&'static str, String); 4] {
        [
            ("addresses", request.address.clone()),
            ("includeImages", request.include_images.to_string()),
            ("includeExplorerUrls", request.include_explorer_urls.to_string()),
            ("waitForSync", request.wait_for_sync.to_string()),
        ]
    }

    fn pick_portfolio(response: PortfolioResponse) -> Result<Portfolio, FeedError> {
        match response {
            PortfolioResponse::One(portfolio) => Ok(*portfolio),
            PortfolioResponse::Many(portfolios) => {
                portfolios
                    .into_iter()
                    .next()
                    .ok_or_else(|| FeedError::InvalidResponse {
                        provider: PROVIDER_ID.to_string(),
                        message: "empty portfolio list".to_string(),
                    })
            }
        }
    }
}

#[async_trait]
impl PortfolioFeed for OctavPortfolioProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_portfolio(&self, request: &PortfolioRequest) -> Result<Portfolio, FeedError> {
        if self.api_key.trim().is_empty() {
            return Err(FeedError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            });
        }

        debug!("Fetching portfolio for {}", request.address);

        let response = self
            .client
            .get(self.portfolio_url())
            .bearer_auth(&self.api_key)
            .query(&Self::query(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::from_status(PROVIDER_ID, status));
        }

        let body: PortfolioResponse =
            response
                .json()
                .await
                .map_err(|e| FeedError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Self::pick_portfolio(body)
    }
}
