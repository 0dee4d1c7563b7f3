use async_trait::async_trait;

use super::{PortfolioSummary, SeriesEntry};
use crate::errors::Result;

/// Read-only views over the portfolio feed and the ledger.
///
/// Both are recomputed on every call and never persisted.
#[async_trait]
pub trait AggregationServiceTrait: Send + Sync {
    /// Protocol values followed by ledger values.
    async fn allocation(&self) -> Result<Vec<SeriesEntry>>;

    async fn summary(&self) -> Result<PortfolioSummary>;
}
