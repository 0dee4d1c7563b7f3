//! Reward point balances.

use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FeedError;

/// Fields that carry a point quantity in upstream payloads, in lookup order.
const QUANTITY_FIELDS: &[&str] = &["quantity", "totalPoints", "points", "total"];

/// A named point balance as reported by a points feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointBalance {
    pub name: String,
    pub quantity: Decimal,
}

impl PointBalance {
    pub fn new(name: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Normalizes an upstream points payload into `[{name, quantity}]`.
///
/// Accepted shapes:
/// - an array of `{name, quantity|points|totalPoints}` objects
/// - an object carrying a quantity field, named after `source_name`
/// - either of the above wrapped in a `data` envelope
///
/// Array entries without a name or with a negative quantity are skipped.
pub fn normalize_points(
    provider: &str,
    body: &Value,
    source_name: &str,
) -> Result<Vec<PointBalance>, FeedError> {
    match body {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| match balance_from_entry(item) {
                Some(balance) => Some(balance),
                None => {
                    warn!("{}: skipping malformed points entry {}", provider, item);
                    None
                }
            })
            .collect()),
        Value::Object(map) => {
            if let Some(data) = map.get("data") {
                if data.is_object() || data.is_array() {
                    return normalize_points(provider, data, source_name);
                }
            }
            match quantity_of(body) {
                Some(quantity) if quantity >= Decimal::ZERO => {
                    Ok(vec![PointBalance::new(source_name, quantity)])
                }
                Some(quantity) => Err(FeedError::InvalidResponse {
                    provider: provider.to_string(),
                    message: format!("negative points quantity {}", quantity),
                }),
                None => Err(FeedError::InvalidResponse {
                    provider: provider.to_string(),
                    message: "no points quantity in response".to_string(),
                }),
            }
        }
        other => Err(FeedError::InvalidResponse {
            provider: provider.to_string(),
            message: format!("unexpected points payload: {}", other),
        }),
    }
}

fn balance_from_entry(item: &Value) -> Option<PointBalance> {
    let name = item.get("name")?.as_str()?;
    let quantity = quantity_of(item)?;
    if quantity < Decimal::ZERO {
        return None;
    }
    Some(PointBalance::new(name, quantity))
}

fn quantity_of(item: &Value) -> Option<Decimal> {
    QUANTITY_FIELDS
        .iter()
        .find_map(|field| item.get(*field))
        .and_then(decimal_from_value)
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}
