// ABOUTME: Checkup records holding a dated measurement snapshot
// ABOUTME: Height and weight are columns, remaining measurements live in category_data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::numeric::{deserialize_optional_decimal, DecimalLimits};
use crate::errors::AppResult;

/// A measurement snapshot for a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkup {
    /// Database identifier
    pub id: i64,
    /// Measured member
    pub member_id: i64,
    /// Member name, joined for display
    pub member_name: String,
    /// Day of the checkup
    pub checkup_date: NaiveDate,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimetres
    pub height: Option<f64>,
    /// Additional measurements keyed by name
    pub category_data: Option<Value>,
    /// Free text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a checkup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckupInput {
    /// Measured member
    pub member_id: i64,
    /// Day of the checkup, today when omitted
    pub checkup_date: Option<NaiveDate>,
    /// Weight in kilograms
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub weight: Option<f64>,
    /// Height in centimetres
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub height: Option<f64>,
    /// Additional measurements
    pub category_data: Option<Value>,
    /// Free text notes
    pub notes: Option<String>,
}

impl CheckupInput {
    /// Check that weight and height fit their columns
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` naming the offending field.
    pub fn validate(&self) -> AppResult<()> {
        DecimalLimits::MEASUREMENT.check("weight", self.weight)?;
        DecimalLimits::MEASUREMENT.check("height", self.height)
    }
}
