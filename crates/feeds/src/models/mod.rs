//! Feed models
//!
//! - `portfolio` - Wallet portfolio request/response (Portfolio, ChainSummary, AssetByProtocol)
//! - `points` - Point balances and upstream response normalization

mod points;
mod portfolio;

pub use points::{normalize_points, PointBalance};
pub use portfolio::{AssetByProtocol, ChainSummary, Portfolio, PortfolioRequest};
