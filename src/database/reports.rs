// ABOUTME: Aggregate queries for the front desk dashboard and daily attendance report
// ABOUTME: Member totals, today's attendance, outstanding balances and the daily summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::attendance::list_present_on;
use super::{acquire, format_date};
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, Money};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of registered members
    pub total_members: i64,
    /// Members marked present today
    pub today_attendance: i64,
    /// Sum of all member balances
    pub total_outstanding_balance: Money,
}

/// Attendance report for one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Reported day
    pub date: NaiveDate,
    /// Members present
    pub total_present: usize,
    /// Amount collected from present members
    pub total_received: Money,
    /// Present rows ordered by member name
    pub attendances: Vec<Attendance>,
}

/// Report queries manager
pub struct ReportsManager {
    pool: SqlitePool,
}

impl ReportsManager {
    /// Create a new reports manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Dashboard numbers as of `today`
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn dashboard_stats(&self, today: NaiveDate) -> AppResult<DashboardStats> {
        let (total_members, outstanding): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(balance), 0) FROM members")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count members: {e}")))?;

        let today_attendance: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendances WHERE date = ?1 AND present = 1",
        )
        .bind(format_date(today))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count attendance: {e}")))?;

        Ok(DashboardStats {
            total_members,
            today_attendance,
            total_outstanding_balance: Money::from_minor(outstanding),
        })
    }

    /// Present members and amounts collected on `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn daily_summary(&self, date: NaiveDate) -> AppResult<DailySummary> {
        let mut conn = acquire(&self.pool).await?;
        let attendances = list_present_on(&mut conn, date).await?;
        let total_received = attendances.iter().map(|a| a.paid_amount).sum();

        Ok(DailySummary {
            date,
            total_present: attendances.len(),
            total_received,
            attendances,
        })
    }
}
