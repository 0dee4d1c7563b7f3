//! Aggregated series models.

use pointfolio_feeds::ChainSummary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::ledger::LedgerAsset;

/// Where a series entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSource {
    Protocol,
    Ledger,
}

/// One slice of the allocation chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntry {
    pub name: String,
    pub value: Decimal,
    /// `value` rounded for labels, e.g. `"80.00"`
    pub display_value: String,
    pub source: SeriesSource,
    /// False for ledger assets without a project; their zero value is not a valuation.
    pub priced: bool,
}

impl SeriesEntry {
    pub fn protocol(name: impl Into<String>, value: Decimal) -> Self {
        Self::build(name.into(), value, SeriesSource::Protocol, true)
    }

    pub fn ledger(asset: &LedgerAsset) -> Self {
        Self::build(
            asset.name.clone(),
            asset.value(),
            SeriesSource::Ledger,
            asset.has_project,
        )
    }

    fn build(name: String, value: Decimal, source: SeriesSource, priced: bool) -> Self {
        Self {
            display_value: format_display(value),
            name,
            value,
            source,
            priced,
        }
    }
}

/// Flattens protocol values and ledger assets into one series.
///
/// Protocol entries come first in feed order, then ledger assets in ledger
/// order. Entries are never merged, even when names collide.
pub fn aggregate(protocols: &[(String, Decimal)], ledger: &[LedgerAsset]) -> Vec<SeriesEntry> {
    protocols
        .iter()
        .map(|(name, value)| SeriesEntry::protocol(name.clone(), *value))
        .chain(ledger.iter().map(SeriesEntry::ledger))
        .collect()
}

/// Wallet overview with the ledger's priced total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub address: String,
    /// `None` when the portfolio feed was unavailable.
    pub networth: Option<Decimal>,
    /// Chains ordered by value, highest first.
    pub chains: Vec<ChainSummary>,
    /// Sum of priced ledger values.
    pub ledger_total: Decimal,
    /// Ledger assets without a project.
    pub unpriced_assets: usize,
}

pub(crate) fn format_display(value: Decimal) -> String {
    let mut rounded = value.round_dp(DISPLAY_DECIMAL_PRECISION);
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);
    rounded.to_string()
}
