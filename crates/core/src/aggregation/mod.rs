//! Aggregation module - chart-ready series built from the portfolio feed and the ledger.

mod aggregation_model;
mod aggregation_service;
mod aggregation_traits;

pub use aggregation_model::{aggregate, PortfolioSummary, SeriesEntry, SeriesSource};
pub use aggregation_service::AggregationService;
pub use aggregation_traits::AggregationServiceTrait;
