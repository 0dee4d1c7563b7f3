use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use pointfolio_feeds::{Portfolio, PortfolioFeed, PortfolioRequest};
use rust_decimal::Decimal;

use super::{aggregate, AggregationServiceTrait, PortfolioSummary, SeriesEntry};
use crate::errors::Result;
use crate::ledger::LedgerServiceTrait;

pub struct AggregationService {
    portfolio_feed: Arc<dyn PortfolioFeed>,
    request: PortfolioRequest,
    ledger_service: Arc<dyn LedgerServiceTrait>,
}

impl AggregationService {
    pub fn new(
        portfolio_feed: Arc<dyn PortfolioFeed>,
        request: PortfolioRequest,
        ledger_service: Arc<dyn LedgerServiceTrait>,
    ) -> Self {
        Self {
            portfolio_feed,
            request,
            ledger_service,
        }
    }

    /// Fetches the portfolio. A feed failure is logged and yields `None`.
    async fn fetch_portfolio(&self) -> Option<Portfolio> {
        match self.portfolio_feed.get_portfolio(&self.request).await {
            Ok(portfolio) => {
                debug!(
                    "Fetched portfolio for {} from {}",
                    portfolio.address,
                    self.portfolio_feed.id()
                );
                Some(portfolio)
            }
            Err(e) => {
                warn!(
                    "Portfolio feed {} unavailable for {}: {}",
                    self.portfolio_feed.id(),
                    self.request.address,
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl AggregationServiceTrait for AggregationService {
    async fn allocation(&self) -> Result<Vec<SeriesEntry>> {
        let protocols = self
            .fetch_portfolio()
            .await
            .map(|portfolio| portfolio.protocol_values())
            .unwrap_or_default();
        let assets = self.ledger_service.list_assets()?;
        Ok(aggregate(&protocols, &assets))
    }

    async fn summary(&self) -> Result<PortfolioSummary> {
        let portfolio = self.fetch_portfolio().await;
        let assets = self.ledger_service.list_assets()?;

        let ledger_total = assets
            .iter()
            .filter(|asset| asset.has_project)
            .map(|asset| asset.value())
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let unpriced_assets = assets.iter().filter(|asset| !asset.has_project).count();

        Ok(match portfolio {
            Some(portfolio) => PortfolioSummary {
                chains: portfolio.chains_by_value(),
                networth: Some(portfolio.networth),
                address: portfolio.address,
                ledger_total,
                unpriced_assets,
            },
            None => PortfolioSummary {
                address: self.request.address.clone(),
                networth: None,
                chains: Vec::new(),
                ledger_total,
                unpriced_assets,
            },
        })
    }
}
