//! Feed trait definitions.

use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::{PointBalance, Portfolio, PortfolioRequest};

/// Source of wallet portfolio snapshots.
#[async_trait]
pub trait PortfolioFeed: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the current portfolio for the requested address.
    async fn get_portfolio(&self, request: &PortfolioRequest) -> Result<Portfolio, FeedError>;
}

/// Source of named reward point balances.
#[async_trait]
pub trait PointsFeed: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the latest point balances, already normalized.
    async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError>;
}
