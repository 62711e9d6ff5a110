// ABOUTME: Database operations for dated measurement checkups
// ABOUTME: Checkup CRUD and the per-member lookups behind the weekly checkup sheet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{acquire, format_date, parse_date, parse_json, parse_timestamp};
use crate::errors::{AppError, AppResult};
use crate::models::{Checkup, CheckupInput};

const CHECKUP_SELECT: &str = r"
    SELECT c.id, c.member_id, m.full_name AS member_name, c.checkup_date, c.weight,
           c.height, c.category_data, c.notes, c.created_at
    FROM checkups c
    JOIN members m ON m.id = c.member_id
";

/// Load a checkup by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_checkup(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Checkup>> {
    let row = sqlx::query(&format!("{CHECKUP_SELECT} WHERE c.id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch checkup: {e}")))?;

    row.as_ref().map(row_to_checkup).transpose()
}

/// The member's checkup on `date`, if any
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_checkup_on(
    conn: &mut SqliteConnection,
    member_id: i64,
    date: NaiveDate,
) -> AppResult<Option<Checkup>> {
    let row = sqlx::query(&format!(
        "{CHECKUP_SELECT} WHERE c.member_id = ?1 AND c.checkup_date = ?2 ORDER BY c.id LIMIT 1"
    ))
    .bind(member_id)
    .bind(format_date(date))
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch checkup: {e}")))?;

    row.as_ref().map(row_to_checkup).transpose()
}

/// A member's checkups, oldest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_member_checkups(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> AppResult<Vec<Checkup>> {
    let rows = sqlx::query(&format!(
        "{CHECKUP_SELECT} WHERE c.member_id = ?1 ORDER BY c.checkup_date, c.id"
    ))
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list member checkups: {e}")))?;

    rows.iter().map(row_to_checkup).collect()
}

/// Insert a checkup dated `date` and return its id
///
/// # Errors
///
/// Returns invalid input for an unknown member
pub async fn insert_checkup(
    conn: &mut SqliteConnection,
    input: &CheckupInput,
    date: NaiveDate,
) -> AppResult<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO checkups (member_id, checkup_date, weight, height, category_data, notes, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ",
    )
    .bind(input.member_id)
    .bind(format_date(date))
    .bind(input.weight)
    .bind(input.height)
    .bind(encode_category_data(input.category_data.as_ref())?)
    .bind(input.notes.as_deref())
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite a checkup
///
/// # Errors
///
/// Returns invalid input for an unknown member
pub async fn update_checkup(
    conn: &mut SqliteConnection,
    id: i64,
    input: &CheckupInput,
    date: NaiveDate,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE checkups
        SET member_id = ?2, checkup_date = ?3, weight = ?4, height = ?5, category_data = ?6, notes = ?7
        WHERE id = ?1
        ",
    )
    .bind(id)
    .bind(input.member_id)
    .bind(format_date(date))
    .bind(input.weight)
    .bind(input.height)
    .bind(encode_category_data(input.category_data.as_ref())?)
    .bind(input.notes.as_deref())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn encode_category_data(data: Option<&Value>) -> AppResult<Option<String>> {
    data.filter(|value| !value.is_null())
        .map(serde_json::to_string)
        .transpose()
        .map_err(AppError::from)
}

/// Checkup database operations manager
pub struct CheckupsManager {
    pool: SqlitePool,
}

impl CheckupsManager {
    /// Create a new checkups manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All checkups, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Checkup>> {
        let rows = sqlx::query(&format!(
            "{CHECKUP_SELECT} ORDER BY c.checkup_date DESC, c.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list checkups: {e}")))?;

        rows.iter().map(row_to_checkup).collect()
    }

    /// Get a checkup by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Checkup>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_checkup(&mut conn, id).await
    }

    /// Create a checkup, dated today when no date is given
    ///
    /// # Errors
    ///
    /// Returns invalid input for an unknown member or an out of range reading
    pub async fn create(&self, input: &CheckupInput) -> AppResult<Checkup> {
        input.validate()?;
        let date = input.checkup_date.unwrap_or_else(|| Utc::now().date_naive());
        let mut conn = acquire(&self.pool).await?;
        let id = insert_checkup(&mut conn, input, date).await?;
        fetch_checkup(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted checkup could not be read back"))
    }

    /// Replace a checkup; omitted date keeps the stored one
    ///
    /// # Errors
    ///
    /// Returns invalid input for an unknown member or an out of range reading
    pub async fn replace(&self, id: i64, input: &CheckupInput) -> AppResult<Option<Checkup>> {
        input.validate()?;
        let mut conn = acquire(&self.pool).await?;
        let Some(existing) = fetch_checkup(&mut conn, id).await? else {
            return Ok(None);
        };
        let date = input.checkup_date.unwrap_or(existing.checkup_date);
        update_checkup(&mut conn, id, input, date).await?;
        fetch_checkup(&mut conn, id).await
    }

    /// Delete a checkup by id
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM checkups WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete checkup: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_checkup(row: &SqliteRow) -> AppResult<Checkup> {
    let checkup_date: String = row.get("checkup_date");
    let created_at: String = row.get("created_at");

    Ok(Checkup {
        id: row.get("id"),
        member_id: row.get("member_id"),
        member_name: row.get("member_name"),
        checkup_date: parse_date(&checkup_date)?,
        weight: row.get("weight"),
        height: row.get("height"),
        category_data: parse_json(row.get("category_data"))?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
    })
}
