// ABOUTME: Payment records received from members
// ABOUTME: Amount, date, method and notes with the member name joined for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Money received from a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Database identifier
    pub id: i64,
    /// Paying member
    pub member_id: i64,
    /// Member name, joined for display
    pub member_name: String,
    /// Amount received
    pub amount: Money,
    /// Day of payment
    pub date: NaiveDate,
    /// Method such as `cash` or `registration`
    pub method: Option<String>,
    /// Free text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Paying member
    pub member_id: i64,
    /// Amount received
    pub amount: Money,
    /// Day of payment, today when omitted
    pub date: Option<NaiveDate>,
    /// Payment method
    pub method: Option<String>,
    /// Free text notes
    pub notes: Option<String>,
}
