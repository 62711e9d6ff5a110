// ABOUTME: Daily attendance records and the desk submission payload
// ABOUTME: One row per member per day with presence and amount collected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Attendance of one member on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Database identifier
    pub id: i64,
    /// Member the row belongs to
    pub member_id: i64,
    /// Member name, joined for display
    pub member_name: String,
    /// Day of attendance
    pub date: NaiveDate,
    /// Whether the member attended
    pub present: bool,
    /// Amount collected at the desk that day
    pub paid_amount: Money,
    /// When the desk submitted the row
    pub submitted_at: Option<DateTime<Utc>>,
    /// Free text notes
    pub notes: Option<String>,
}

/// Payload for creating or replacing a single attendance row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceInput {
    /// Member the row belongs to
    pub member_id: i64,
    /// Day of attendance
    pub date: NaiveDate,
    /// Whether the member attended
    #[serde(default)]
    pub present: bool,
    /// Amount collected
    #[serde(default)]
    pub paid_amount: Money,
    /// Free text notes
    pub notes: Option<String>,
}

/// One line of a desk submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Member attending
    pub member_id: i64,
    /// Whether the member attended
    #[serde(default)]
    pub present: bool,
    /// Amount collected, zero when absent or null
    #[serde(default)]
    pub paid_amount: Option<Money>,
    /// Payment method, `cash` when omitted
    pub method: Option<String>,
    /// Free text notes
    pub notes: Option<String>,
}

/// Batch attendance submission for a single day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    /// Day being submitted, today when omitted
    pub date: Option<NaiveDate>,
    /// One entry per member
    #[serde(default)]
    pub entries: Vec<AttendanceEntry>,
}

/// Result of a desk submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSummary {
    /// Always `"ok"`
    pub status: String,
    /// Number of entries written
    pub submitted_count: usize,
    /// Sum of positive amounts received
    pub total_received: Money,
}

impl SubmissionSummary {
    /// Successful submission summary
    #[must_use]
    pub fn ok(submitted_count: usize, total_received: Money) -> Self {
        Self {
            status: "ok".to_owned(),
            submitted_count,
            total_received,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_defaults() {
        let submission: AttendanceSubmission = serde_json::from_str(
            r#"{"entries": [{"member_id": 3, "present": true, "paid_amount": null}]}"#,
        )
        .unwrap();
        assert!(submission.date.is_none());
        let entry = &submission.entries[0];
        assert!(entry.present);
        assert_eq!(entry.paid_amount.unwrap_or_default(), Money::ZERO);
        assert!(entry.method.is_none());
    }
}
