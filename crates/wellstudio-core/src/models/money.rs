// ABOUTME: Exact currency amounts stored as integer hundredths
// ABOUTME: Serialises as a JSON number and accepts numbers or numeric strings on input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::numeric::{DecimalLimits, NumberOrString};

/// Currency amount with two decimal places, held as hundredths
///
/// Balances and payments are summed and subtracted repeatedly, so amounts are
/// never carried as floating point between operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Build from hundredths
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Build from a major-unit value, rounding to the nearest hundredth
    #[must_use]
    pub fn from_major(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Amount in hundredths
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Amount in major units
    #[must_use]
    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whether the amount is strictly greater than zero
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parse a decimal string such as `"5400"`, `"700.5"` or `"-12.25"`
    ///
    /// Returns `None` for empty input, non-numeric text, more than two
    /// fractional digits or more than eight digits before the point.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let amount = DecimalLimits::AMOUNT;
        if fraction.len() > amount.decimal_places
            || whole.trim_start_matches('0').len() > amount.max_digits - amount.decimal_places
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        let minor = whole_value.checked_mul(100)?.checked_add(fraction_value)?;
        Some(Self(if negative { -minor } else { minor }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(value) => match DecimalLimits::AMOUNT.violation(value) {
                None => Ok(Self::from_major(value)),
                Some(reason) => Err(de::Error::custom(format!(
                    "invalid amount {value}: {reason}"
                ))),
            },
            NumberOrString::Text(text) => Self::parse(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid amount: {text:?}"))),
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
