//! Ledger domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, ValidationError};
use crate::utils::input::{lenient_number, parse_optional, parse_required, required_name};

/// A locally tracked holding, optionally priced by a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAsset {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Point price of the matching project, or zero when unpriced.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub has_project: bool,
}

impl LedgerAsset {
    /// Creates an unpriced asset with a fresh id.
    pub fn new(name: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            price: Decimal::ZERO,
            has_project: false,
        }
    }

    /// `quantity * price`, saturating at `Decimal::MAX`.
    pub fn value(&self) -> Decimal {
        self.quantity.saturating_mul(self.price)
    }

    /// Links the asset to a project price. Returns whether anything changed.
    pub(crate) fn link(&mut self, point_price: Decimal) -> bool {
        let changed = !self.has_project || self.price != point_price;
        if changed {
            self.price = point_price;
            self.has_project = true;
        }
        changed
    }

    /// Marks the asset unpriced. Returns whether anything changed.
    pub(crate) fn unlink(&mut self) -> bool {
        let changed = self.has_project || !self.price.is_zero();
        if changed {
            self.price = Decimal::ZERO;
            self.has_project = false;
        }
        changed
    }

    /// Sets the quantity when it differs numerically, keeping the stored
    /// representation otherwise.
    pub(crate) fn set_quantity(&mut self, quantity: Decimal) -> bool {
        let changed = self.quantity != quantity;
        if changed {
            self.quantity = quantity;
        }
        changed
    }
}

/// Input model for a manually entered ledger asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<String>,
}

impl NewLedgerAsset {
    pub fn new(name: &str, quantity: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            quantity: Some(quantity.to_string()),
        }
    }

    /// Returns the validated `(name, quantity)` pair.
    pub fn validate(&self) -> Result<(String, Decimal)> {
        let name = required_name(self.name.as_deref())?;
        let quantity = parse_required("quantity", self.quantity.as_deref())?;
        ensure_non_negative(quantity)?;
        Ok((name, quantity))
    }
}

/// Partial edit of a ledger row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAssetUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<String>,
}

impl LedgerAssetUpdate {
    /// Merges this update over `current`, returning the validated name and quantity.
    pub fn merge_into(&self, current: &LedgerAsset) -> Result<(String, Decimal)> {
        let name = match self.name.as_deref() {
            Some(name) => required_name(Some(name))?,
            None => current.name.clone(),
        };
        let quantity = parse_optional("quantity", self.quantity.as_deref(), current.quantity)?;
        ensure_non_negative(quantity)?;
        Ok((name, quantity))
    }
}

/// Result of reconciling a points snapshot into the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSummary {
    /// Rows appended for balances not yet in the ledger
    pub created: usize,
    /// Existing rows whose quantity or pricing changed
    pub updated: usize,
    /// Whether the ledger was written back
    pub written: bool,
    pub assets: Vec<LedgerAsset>,
}

fn ensure_non_negative(quantity: Decimal) -> Result<()> {
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            reason: "must not be negative".to_string(),
        }
        .into());
    }
    Ok(())
}
