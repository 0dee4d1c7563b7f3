//! Wallet portfolio models.
//!
//! Monetary values arrive as decimal strings and are kept as [`Decimal`]; any
//! rounding happens at presentation time.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters for a portfolio lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    pub address: String,
    pub include_images: bool,
    pub include_explorer_urls: bool,
    pub wait_for_sync: bool,
}

impl PortfolioRequest {
    /// Request for `address` with images, explorer links and a synced snapshot.
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            include_images: true,
            include_explorer_urls: true,
            wait_for_sync: true,
        }
    }
}

/// Portfolio snapshot for a single address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(with = "rust_decimal::serde::str")]
    pub networth: Decimal,
    pub address: String,
    #[serde(default)]
    pub chains: BTreeMap<String, ChainSummary>,
    #[serde(default)]
    pub asset_by_protocols: BTreeMap<String, AssetByProtocol>,
}

impl Portfolio {
    /// Per-protocol `(name, value)` pairs in key order.
    pub fn protocol_values(&self) -> Vec<(String, Decimal)> {
        self.asset_by_protocols
            .values()
            .map(|protocol| (protocol.name.clone(), protocol.value))
            .collect()
    }

    /// Chains sorted by value, largest first.
    pub fn chains_by_value(&self) -> Vec<ChainSummary> {
        let mut chains: Vec<ChainSummary> = self.chains.values().cloned().collect();
        chains.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
        chains
    }
}

/// Aggregated holdings on one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainSummary {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub img_small: Option<String>,
    #[serde(default)]
    pub img_large: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub value_percentile: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_cost_basis: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_closed_pnl: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_open_pnl: Option<Decimal>,
}

/// Value held in one protocol (wallet, lending market, LP, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetByProtocol {
    pub name: String,
    pub key: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    #[serde(default)]
    pub img_small: Option<String>,
    #[serde(default)]
    pub img_large: Option<String>,
}
