// ABOUTME: Database operations for payments received from members
// ABOUTME: Payment CRUD plus the insert used by registration and attendance workflows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{acquire, format_date, parse_date, parse_timestamp};
use crate::errors::{AppError, AppResult};
use crate::models::{Money, Payment, PaymentInput};

const PAYMENT_SELECT: &str = r"
    SELECT p.id, p.member_id, m.full_name AS member_name, p.amount, p.date,
           p.method, p.notes, p.created_at
    FROM payments p
    JOIN members m ON m.id = p.member_id
";

/// A payment about to be written
#[derive(Debug, Clone, Copy)]
pub struct NewPayment<'a> {
    /// Paying member
    pub member_id: i64,
    /// Amount received
    pub amount: Money,
    /// Day of payment
    pub date: NaiveDate,
    /// Payment method
    pub method: Option<&'a str>,
    /// Free text notes
    pub notes: Option<&'a str>,
}

impl<'a> NewPayment<'a> {
    fn from_input(input: &'a PaymentInput, date: NaiveDate) -> Self {
        Self {
            member_id: input.member_id,
            amount: input.amount,
            date,
            method: input.method.as_deref(),
            notes: input.notes.as_deref(),
        }
    }
}

/// Load a payment by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_payment(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Payment>> {
    let row = sqlx::query(&format!("{PAYMENT_SELECT} WHERE p.id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch payment: {e}")))?;

    row.as_ref().map(row_to_payment).transpose()
}

/// Record a payment and return its id
///
/// # Errors
///
/// Returns invalid input for an unknown member
pub async fn insert_payment(conn: &mut SqliteConnection, payment: NewPayment<'_>) -> AppResult<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO payments (member_id, amount, date, method, notes, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )
    .bind(payment.member_id)
    .bind(payment.amount.minor_units())
    .bind(format_date(payment.date))
    .bind(payment.method)
    .bind(payment.notes)
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Payment database operations manager
pub struct PaymentsManager {
    pool: SqlitePool,
}

impl PaymentsManager {
    /// Create a new payments manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All payments, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query(&format!(
            "{PAYMENT_SELECT} ORDER BY p.date DESC, p.created_at DESC, p.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list payments: {e}")))?;

        rows.iter().map(row_to_payment).collect()
    }

    /// Get a payment by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Payment>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_payment(&mut conn, id).await
    }

    /// Record a payment without touching member balances
    ///
    /// # Errors
    ///
    /// Returns invalid input for an unknown member
    pub async fn create(&self, input: &PaymentInput) -> AppResult<Payment> {
        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut conn = acquire(&self.pool).await?;
        let id = insert_payment(&mut conn, NewPayment::from_input(input, date)).await?;
        fetch_payment(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted payment could not be read back"))
    }

    /// Replace a payment; omitted date keeps the stored one
    ///
    /// # Errors
    ///
    /// Returns invalid input for an unknown member
    pub async fn replace(&self, id: i64, input: &PaymentInput) -> AppResult<Option<Payment>> {
        let mut conn = acquire(&self.pool).await?;
        let Some(existing) = fetch_payment(&mut conn, id).await? else {
            return Ok(None);
        };
        let payment = NewPayment::from_input(input, input.date.unwrap_or(existing.date));

        sqlx::query(
            r"
            UPDATE payments SET member_id = ?2, amount = ?3, date = ?4, method = ?5, notes = ?6
            WHERE id = ?1
            ",
        )
        .bind(id)
        .bind(payment.member_id)
        .bind(payment.amount.minor_units())
        .bind(format_date(payment.date))
        .bind(payment.method)
        .bind(payment.notes)
        .execute(&mut *conn)
        .await?;

        fetch_payment(&mut conn, id).await
    }

    /// Delete a payment by id
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete payment: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_payment(row: &SqliteRow) -> AppResult<Payment> {
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");

    Ok(Payment {
        id: row.get("id"),
        member_id: row.get("member_id"),
        member_name: row.get("member_name"),
        amount: Money::from_minor(row.get("amount")),
        date: parse_date(&date)?,
        method: row.get("method"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
    })
}
