//! Pointfolio Feeds Crate
//!
//! This crate provides the remote data sources the reconciliation engine
//! reads from:
//!
//! - a wallet portfolio feed (net worth, per-chain and per-protocol values)
//! - a reward points feed (named point balances)
//!
//! # Architecture
//!
//! ```text
//! +------------------+        +-------------------+
//! |  OctavProvider   |        | ExtendedProvider  |   (HTTP, server-held keys)
//! +------------------+        +-------------------+
//!          |                            |
//!          v                            v
//! +------------------+        +-------------------+
//! |  PortfolioFeed   |        |    PointsFeed     |   (traits)
//! +------------------+        +-------------------+
//!          |                            |
//!          |                  +-------------------+
//!          |                  | FallbackPointsFeed|   (never fails)
//!          |                  +-------------------+
//!          v                            v
//!      Portfolio               Vec<PointBalance>
//! ```
//!
//! Upstream decimal strings are parsed into [`rust_decimal::Decimal`] so no
//! precision is lost before presentation.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::FeedError;

pub use models::{
    normalize_points, AssetByProtocol, ChainSummary, PointBalance, Portfolio, PortfolioRequest,
};

pub use provider::extended::ExtendedPointsProvider;
pub use provider::fallback::{FallbackPointsFeed, StaticPointsFeed};
pub use provider::octav::OctavPortfolioProvider;
pub use provider::{PointsFeed, PortfolioFeed};
