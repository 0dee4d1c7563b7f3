//! Feed provider abstractions and implementations.
//!
//! This module contains:
//! - The `PortfolioFeed` and `PointsFeed` traits
//! - HTTP providers (Octav for portfolios, Extended for points)
//! - Wrappers that make the points feed infallible for the ledger

mod traits;

pub mod extended;
pub mod fallback;
pub mod octav;

pub use traits::{PointsFeed, PortfolioFeed};

use std::time::Duration;

use reqwest::Client;

/// Default HTTP request timeout
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
