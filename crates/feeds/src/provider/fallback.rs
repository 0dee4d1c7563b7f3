//! Points feeds that never fail.
//!
//! The reconciliation engine has no feed-failure handling of its own; every
//! points source it reads goes through [`FallbackPointsFeed`], which turns an
//! upstream error into a fixed payload.

use std::sync::Arc;

use async_trait::async_trait;
use log::{log, Level};
use rust_decimal::Decimal;

use crate::errors::FeedError;
use crate::models::PointBalance;
use crate::provider::PointsFeed;

/// Fixed snapshot, used for demo mode and tests.
pub struct StaticPointsFeed {
    points: Vec<PointBalance>,
}

impl StaticPointsFeed {
    pub fn new(points: Vec<PointBalance>) -> Self {
        Self { points }
    }

    /// Two sample balances for running the dashboard without an API key.
    pub fn demo() -> Self {
        Self::new(vec![
            PointBalance::new("backpack", Decimal::from(1500)),
            PointBalance::new("extended", Decimal::from(800)),
        ])
    }
}

#[async_trait]
impl PointsFeed for StaticPointsFeed {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError> {
        Ok(self.points.clone())
    }
}

/// Wraps a points feed and substitutes `fallback` on any upstream error.
pub struct FallbackPointsFeed {
    inner: Arc<dyn PointsFeed>,
    fallback: Vec<PointBalance>,
}

impl FallbackPointsFeed {
    /// Falls back to an empty snapshot, which leaves every ledger row as is.
    pub fn new(inner: Arc<dyn PointsFeed>) -> Self {
        Self::with_fallback(inner, Vec::new())
    }

    pub fn with_fallback(inner: Arc<dyn PointsFeed>, fallback: Vec<PointBalance>) -> Self {
        Self { inner, fallback }
    }

    /// Fetches from the wrapped feed, or returns the fallback payload.
    pub async fn fetch_or_fallback(&self) -> Vec<PointBalance> {
        match self.inner.fetch_points().await {
            Ok(points) => points,
            Err(e) => {
                log!(
                    failure_level(&e),
                    "Points feed {} unavailable, using fallback payload: {}",
                    self.inner.id(),
                    e
                );
                self.fallback.clone()
            }
        }
    }
}

/// Transient failures are expected to clear on their own; anything else needs
/// a configuration or upstream fix.
fn failure_level(error: &FeedError) -> Level {
    if error.is_transient() {
        Level::Warn
    } else {
        Level::Error
    }
}

#[async_trait]
impl PointsFeed for FallbackPointsFeed {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError> {
        Ok(self.fetch_or_fallback().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct FailingFeed;

    #[async_trait]
    impl PointsFeed for FailingFeed {
        fn id(&self) -> &'static str {
            "FAILING"
        }

        async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError> {
            Err(FeedError::ProviderError {
                provider: "FAILING".to_string(),
                message: "HTTP 500".to_string(),
            })
        }
    }

    struct UnconfiguredFeed;

    #[async_trait]
    impl PointsFeed for UnconfiguredFeed {
        fn id(&self) -> &'static str {
            "UNCONFIGURED"
        }

        async fn fetch_points(&self) -> Result<Vec<PointBalance>, FeedError> {
            Err(FeedError::MissingApiKey {
                provider: "UNCONFIGURED".to_string(),
            })
        }
    }

    #[test]
    fn test_failure_level_follows_transience() {
        let rate_limited = FeedError::RateLimited {
            provider: "X".to_string(),
        };
        let missing_key = FeedError::MissingApiKey {
            provider: "X".to_string(),
        };
        assert_eq!(failure_level(&rate_limited), Level::Warn);
        assert_eq!(failure_level(&missing_key), Level::Error);
    }

    #[tokio::test]
    async fn test_terminal_failure_still_falls_back() {
        let fallback = vec![PointBalance::new("extended", dec!(1))];
        let feed = FallbackPointsFeed::with_fallback(Arc::new(UnconfiguredFeed), fallback.clone());
        assert_eq!(feed.fetch_points().await.unwrap(), fallback);
    }

    #[tokio::test]
    async fn test_failure_yields_empty_fallback() {
        let feed = FallbackPointsFeed::new(Arc::new(FailingFeed));
        assert!(feed.fetch_points().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_yields_configured_fallback() {
        let fallback = vec![PointBalance::new("extended", dec!(1))];
        let feed = FallbackPointsFeed::with_fallback(Arc::new(FailingFeed), fallback.clone());
        assert_eq!(feed.fetch_or_fallback().await, fallback);
        assert_eq!(feed.id(), "FAILING");
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let feed = FallbackPointsFeed::new(Arc::new(StaticPointsFeed::demo()));
        let points = feed.fetch_points().await.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PointBalance::new("backpack", dec!(1500)));
    }
}
