//! Parsing helpers for form-style numeric input.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::{Result, ValidationError};

/// Parses a finite decimal. Text such as `NaN` or `inf` is rejected.
pub fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| {
            ValidationError::NotANumber {
                field: field.to_string(),
                value: text.to_string(),
            }
            .into()
        })
}

/// Parses a field that must be present and non-blank.
pub fn parse_required(field: &str, raw: Option<&str>) -> Result<Decimal> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => parse_decimal(field, text),
        _ => Err(ValidationError::MissingField(field.to_string()).into()),
    }
}

/// Parses a field that keeps `current` when absent.
pub fn parse_optional(field: &str, raw: Option<&str>, current: Decimal) -> Result<Decimal> {
    match raw {
        Some(_) => parse_required(field, raw),
        None => Ok(current),
    }
}

/// Trimmed, non-empty name.
pub fn required_name(raw: Option<&str>) -> Result<String> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::MissingField("name".to_string()).into()),
    }
}

/// Accepts a JSON string or number and keeps its text form.
pub fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
