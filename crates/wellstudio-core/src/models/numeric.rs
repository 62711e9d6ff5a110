// ABOUTME: Lenient decimal parsing and column digit limits for operator-entered values
// ABOUTME: Accepts JSON numbers, numeric strings, empty strings and nulls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// Raw JSON scalar that may carry a decimal
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parse a decimal from free text; blank text is `Ok(None)`
///
/// # Errors
///
/// Returns the offending text when it is not a finite number.
pub fn parse_decimal(text: &str) -> Result<Option<f64>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(trimmed.to_owned()),
    }
}

/// Digit limits of a fixed-point column
///
/// A value fits when it has at most `decimal_places` fractional digits and at
/// most `max_digits - decimal_places` digits before the point. Digits are
/// counted on the shortest decimal spelling of the `f64`, so `70.1` has one
/// fractional digit and `0.05` has none before the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalLimits {
    /// Total significant digits allowed
    pub max_digits: usize,
    /// Fractional digits allowed
    pub decimal_places: usize,
}

impl DecimalLimits {
    /// Height and weight columns, up to `9999.99`
    pub const MEASUREMENT: Self = Self::new(6, 2);
    /// Percentages, levels and ages, up to `999.99`
    pub const READING: Self = Self::new(5, 2);
    /// Resting metabolic rate, up to `99999.99`
    pub const METABOLIC_RATE: Self = Self::new(7, 2);
    /// Currency amounts, up to `99999999.99`
    pub const AMOUNT: Self = Self::new(10, 2);

    /// Limits with the given precision and scale
    #[must_use]
    pub const fn new(max_digits: usize, decimal_places: usize) -> Self {
        Self {
            max_digits,
            decimal_places,
        }
    }

    /// Describe why `value` does not fit, or `None` when it does
    #[must_use]
    pub fn violation(self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return Some("Enter a finite number.".to_owned());
        }
        let text = value.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let whole_digits = whole.trim_start_matches('0').len();
        let fraction_digits = fraction.len();

        if whole_digits + fraction_digits > self.max_digits {
            Some(format!(
                "Ensure that there are no more than {} digits in total.",
                self.max_digits
            ))
        } else if fraction_digits > self.decimal_places {
            Some(format!(
                "Ensure that there are no more than {} decimal places.",
                self.decimal_places
            ))
        } else if whole_digits > self.max_digits.saturating_sub(self.decimal_places) {
            Some(format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                self.max_digits.saturating_sub(self.decimal_places)
            ))
        } else {
            None
        }
    }

    /// Check an optional field value
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` naming the field when the value does not fit.
    pub fn check(self, field: &str, value: Option<f64>) -> AppResult<()> {
        match value.and_then(|v| self.violation(v)) {
            Some(reason) => Err(AppError::invalid_input(format!("{field}: {reason}"))
                .with_details(json!({ "field": field }))),
            None => Ok(()),
        }
    }
}

/// Serde helper for optional decimal fields
///
/// Use with `#[serde(default, deserialize_with = "deserialize_optional_decimal")]`.
///
/// # Errors
///
/// Fails when the value is neither null, a number, nor numeric text.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) if value.is_finite() => Ok(Some(value)),
        Some(NumberOrString::Number(value)) => {
            Err(de::Error::custom(format!("invalid decimal: {value}")))
        }
        Some(NumberOrString::Text(text)) => parse_decimal(&text)
            .map_err(|bad| de::Error::custom(format!("invalid decimal: {bad:?}"))),
    }
}
