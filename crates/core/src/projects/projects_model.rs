//! Project domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_TOKEN_PERCENT;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::input::{lenient_number, parse_optional, parse_required, required_name};

/// A user-defined valuation model turning points into a price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Fully diluted valuation of the project's token
    #[serde(with = "rust_decimal::serde::str")]
    pub fdv: Decimal,
    /// Share of the token supply allocated to points holders, in percent
    #[serde(with = "rust_decimal::serde::str")]
    pub percent: Decimal,
    /// Total points issued by the project
    #[serde(with = "rust_decimal::serde::str")]
    pub total_points: Decimal,
    /// Derived from the three fields above; never set directly.
    #[serde(with = "rust_decimal::serde::str")]
    pub point_price: Decimal,
}

impl Project {
    pub fn new(id: String, params: ProjectParams) -> Self {
        let mut project = Self {
            id,
            name: params.name,
            fdv: params.fdv,
            percent: params.percent,
            total_points: params.total_points,
            point_price: Decimal::ZERO,
        };
        project.refresh_point_price();
        project
    }

    /// `fdv * (percent / 100) / total_points`, or `None` when the result does
    /// not fit in a `Decimal`.
    pub fn derive_point_price(
        fdv: Decimal,
        percent: Decimal,
        total_points: Decimal,
    ) -> Option<Decimal> {
        let share = percent.checked_div(Decimal::ONE_HUNDRED)?;
        fdv.checked_mul(share)?.checked_div(total_points)
    }

    /// Expects inputs that passed [`ProjectParams::validate`], which rejects
    /// prices that cannot be represented.
    pub fn refresh_point_price(&mut self) {
        self.point_price = Self::derive_point_price(self.fdv, self.percent, self.total_points)
            .unwrap_or(Decimal::ZERO);
    }

    pub fn params(&self) -> ProjectParams {
        ProjectParams {
            name: self.name.clone(),
            fdv: self.fdv,
            percent: self.percent,
            total_points: self.total_points,
        }
    }
}

/// Validated project inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectParams {
    pub name: String,
    pub fdv: Decimal,
    pub percent: Decimal,
    pub total_points: Decimal,
}

impl ProjectParams {
    /// Checks the numeric ranges: `fdv > 0`, `0 < percent <= 100`, `total_points > 0`,
    /// and that the derived point price is representable.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.fdv <= Decimal::ZERO {
            return Err(out_of_range("fdv", "must be greater than 0"));
        }
        if self.percent <= Decimal::ZERO || self.percent > Decimal::from(MAX_TOKEN_PERCENT) {
            return Err(out_of_range("percent", "must be in (0, 100]"));
        }
        if self.total_points <= Decimal::ZERO {
            return Err(out_of_range("totalPoints", "must be greater than 0"));
        }
        if Project::derive_point_price(self.fdv, self.percent, self.total_points).is_none() {
            return Err(out_of_range("totalPoints", "point price is too large"));
        }
        Ok(())
    }
}

/// Input model for creating a project, as submitted by a form.
///
/// Numeric fields are raw text (JSON numbers are accepted too) and are parsed
/// during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fdv: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub percent: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_points: Option<String>,
}

impl NewProject {
    pub fn new(name: &str, fdv: &str, percent: &str, total_points: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            fdv: Some(fdv.to_string()),
            percent: Some(percent.to_string()),
            total_points: Some(total_points.to_string()),
        }
    }

    /// Parses and validates every field.
    pub fn into_params(self) -> Result<ProjectParams> {
        let params = ProjectParams {
            name: required_name(self.name.as_deref())?,
            fdv: parse_required("fdv", self.fdv.as_deref())?,
            percent: parse_required("percent", self.percent.as_deref())?,
            total_points: parse_required("totalPoints", self.total_points.as_deref())?,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Partial update of an existing project. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fdv: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub percent: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_points: Option<String>,
}

impl ProjectUpdate {
    /// Merges this update over `current` and validates the result.
    pub fn merge_into(&self, current: &ProjectParams) -> Result<ProjectParams> {
        let name = match self.name.as_deref() {
            Some(name) => required_name(Some(name))?,
            None => current.name.clone(),
        };
        let merged = ProjectParams {
            name,
            fdv: parse_optional("fdv", self.fdv.as_deref(), current.fdv)?,
            percent: parse_optional("percent", self.percent.as_deref(), current.percent)?,
            total_points: parse_optional(
                "totalPoints",
                self.total_points.as_deref(),
                current.total_points,
            )?,
        };
        merged.validate()?;
        Ok(merged)
    }
}

fn out_of_range(field: &str, reason: &str) -> Error {
    ValidationError::OutOfRange {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
