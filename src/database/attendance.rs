// ABOUTME: Database operations for daily attendance rows
// ABOUTME: Attendance CRUD with the member name joined for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{acquire, format_date, parse_date, parse_timestamp};
use crate::errors::{AppError, AppResult};
use crate::models::{Attendance, AttendanceInput, Money};

const ATTENDANCE_SELECT: &str = r"
    SELECT a.id, a.member_id, m.full_name AS member_name, a.date, a.present,
           a.paid_amount, a.submitted_at, a.notes
    FROM attendances a
    JOIN members m ON m.id = a.member_id
";

/// Load an attendance row by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_attendance(
    conn: &mut SqliteConnection,
    id: i64,
) -> AppResult<Option<Attendance>> {
    let row = sqlx::query(&format!("{ATTENDANCE_SELECT} WHERE a.id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch attendance: {e}")))?;

    row.as_ref().map(row_to_attendance).transpose()
}

/// Load the row for a member on a given day
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_attendance(
    conn: &mut SqliteConnection,
    member_id: i64,
    date: NaiveDate,
) -> AppResult<Option<Attendance>> {
    let row = sqlx::query(&format!(
        "{ATTENDANCE_SELECT} WHERE a.member_id = ?1 AND a.date = ?2"
    ))
    .bind(member_id)
    .bind(format_date(date))
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch attendance: {e}")))?;

    row.as_ref().map(row_to_attendance).transpose()
}

/// Insert an attendance row and return its id
///
/// # Errors
///
/// Returns `RESOURCE_ALREADY_EXISTS` when the member already has a row for the day
pub async fn insert_attendance(
    conn: &mut SqliteConnection,
    input: &AttendanceInput,
    submitted_at: Option<DateTime<Utc>>,
) -> AppResult<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO attendances (member_id, date, present, paid_amount, submitted_at, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )
    .bind(input.member_id)
    .bind(format_date(input.date))
    .bind(input.present)
    .bind(input.paid_amount.minor_units())
    .bind(submitted_at.map(|ts| ts.to_rfc3339()))
    .bind(input.notes.as_deref())
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite an attendance row
///
/// # Errors
///
/// Returns an error if the statement fails
pub async fn update_attendance(
    conn: &mut SqliteConnection,
    id: i64,
    input: &AttendanceInput,
    submitted_at: Option<DateTime<Utc>>,
) -> AppResult<bool> {
    let result = sqlx::query(
        r"
        UPDATE attendances
        SET member_id = ?2, date = ?3, present = ?4, paid_amount = ?5, submitted_at = ?6, notes = ?7
        WHERE id = ?1
        ",
    )
    .bind(id)
    .bind(input.member_id)
    .bind(format_date(input.date))
    .bind(input.present)
    .bind(input.paid_amount.minor_units())
    .bind(submitted_at.map(|ts| ts.to_rfc3339()))
    .bind(input.notes.as_deref())
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Present rows for one day ordered by member name
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_present_on(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> AppResult<Vec<Attendance>> {
    let rows = sqlx::query(&format!(
        "{ATTENDANCE_SELECT} WHERE a.date = ?1 AND a.present = 1 ORDER BY m.full_name, a.id"
    ))
    .bind(format_date(date))
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list attendance for {date}: {e}")))?;

    rows.iter().map(row_to_attendance).collect()
}

/// Attendance database operations manager
pub struct AttendanceManager {
    pool: SqlitePool,
}

impl AttendanceManager {
    /// Create a new attendance manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All rows, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Attendance>> {
        let rows = sqlx::query(&format!(
            "{ATTENDANCE_SELECT} ORDER BY a.date DESC, m.full_name, a.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list attendance: {e}")))?;

        rows.iter().map(row_to_attendance).collect()
    }

    /// Get a row by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Attendance>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_attendance(&mut conn, id).await
    }

    /// Create a row without touching member balances
    ///
    /// # Errors
    ///
    /// Returns a conflict for a duplicate day or invalid input for an unknown member
    pub async fn create(&self, input: &AttendanceInput) -> AppResult<Attendance> {
        let mut conn = acquire(&self.pool).await?;
        let id = insert_attendance(&mut conn, input, None).await?;
        fetch_attendance(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted attendance could not be read back"))
    }

    /// Replace a row, keeping its submission timestamp
    ///
    /// # Errors
    ///
    /// Returns a conflict for a duplicate day or invalid input for an unknown member
    pub async fn replace(&self, id: i64, input: &AttendanceInput) -> AppResult<Option<Attendance>> {
        let mut conn = acquire(&self.pool).await?;
        let Some(existing) = fetch_attendance(&mut conn, id).await? else {
            return Ok(None);
        };
        update_attendance(&mut conn, id, input, existing.submitted_at).await?;
        fetch_attendance(&mut conn, id).await
    }

    /// Delete a row by id
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete attendance: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_attendance(row: &SqliteRow) -> AppResult<Attendance> {
    let date: String = row.get("date");
    let submitted_at: Option<String> = row.get("submitted_at");

    Ok(Attendance {
        id: row.get("id"),
        member_id: row.get("member_id"),
        member_name: row.get("member_name"),
        date: parse_date(&date)?,
        present: row.get("present"),
        paid_amount: Money::from_minor(row.get("paid_amount")),
        submitted_at: submitted_at.as_deref().map(parse_timestamp).transpose()?,
        notes: row.get("notes"),
    })
}
