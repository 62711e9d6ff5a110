// ABOUTME: Database operations for body composition evaluations
// ABOUTME: Stores the raw readings and the analyzer's fat, fluids and analysis data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{acquire, format_date, parse_date, parse_json, parse_timestamp};
use crate::errors::{AppError, AppResult};
use crate::models::{BodyEvaluation, BodyMeasurements};

const EVALUATION_COLUMNS: &str = r"
    id, member_id, date, height_cm, weight_kg, visceral_fat, trunk_subcutaneous_fat,
    body_fat_men, body_fat_women, body_age, bmi, bmr_rm, skeletal_muscle_men,
    skeletal_muscle_women, fat, fluids, analysis_data, notes, created_at, updated_at
";

/// Insert the readings of an evaluation and return its id
///
/// # Errors
///
/// Returns invalid input for an unknown member
pub async fn insert_evaluation(
    conn: &mut SqliteConnection,
    member_id: i64,
    date: NaiveDate,
    measurements: &BodyMeasurements,
    notes: Option<&str>,
) -> AppResult<i64> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r"
        INSERT INTO body_evaluations (
            member_id, date, height_cm, weight_kg, visceral_fat, trunk_subcutaneous_fat,
            body_fat_men, body_fat_women, body_age, bmi, bmr_rm, skeletal_muscle_men,
            skeletal_muscle_women, notes, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)
        ",
    )
    .bind(member_id)
    .bind(format_date(date))
    .bind(measurements.height_cm)
    .bind(measurements.weight_kg)
    .bind(measurements.visceral_fat)
    .bind(measurements.trunk_subcutaneous_fat)
    .bind(measurements.body_fat_men)
    .bind(measurements.body_fat_women)
    .bind(measurements.body_age)
    .bind(measurements.bmi)
    .bind(measurements.bmr_rm)
    .bind(measurements.skeletal_muscle_men)
    .bind(measurements.skeletal_muscle_women)
    .bind(notes)
    .bind(&now)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Store the analyzer output on an evaluation
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` if the evaluation no longer exists
pub async fn record_analysis(
    conn: &mut SqliteConnection,
    id: i64,
    fat: f64,
    fluids: f64,
    analysis_data: &Value,
) -> AppResult<()> {
    let result = sqlx::query(
        r"
        UPDATE body_evaluations
        SET fat = ?2, fluids = ?3, analysis_data = ?4, updated_at = ?5
        WHERE id = ?1
        ",
    )
    .bind(id)
    .bind(fat)
    .bind(fluids)
    .bind(serde_json::to_string(analysis_data)?)
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to record body analysis: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("Body evaluation {id}")));
    }
    Ok(())
}

/// A member's evaluations, newest first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn list_member_evaluations(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> AppResult<Vec<BodyEvaluation>> {
    let rows = sqlx::query(&format!(
        "SELECT {EVALUATION_COLUMNS} FROM body_evaluations WHERE member_id = ?1 ORDER BY date DESC, id DESC"
    ))
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to list body evaluations: {e}")))?;

    rows.iter().map(row_to_evaluation).collect()
}

/// A member's most recent evaluation
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn latest_evaluation(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> AppResult<Option<BodyEvaluation>> {
    let row = sqlx::query(&format!(
        "SELECT {EVALUATION_COLUMNS} FROM body_evaluations WHERE member_id = ?1 ORDER BY date DESC, id DESC LIMIT 1"
    ))
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch body evaluation: {e}")))?;

    row.as_ref().map(row_to_evaluation).transpose()
}

/// Body evaluation database operations manager
pub struct EvaluationsManager {
    pool: SqlitePool,
}

impl EvaluationsManager {
    /// Create a new evaluations manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an evaluation by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<BodyEvaluation>> {
        let row = sqlx::query(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM body_evaluations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch body evaluation: {e}")))?;

        row.as_ref().map(row_to_evaluation).transpose()
    }

    /// A member's evaluations, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn for_member(&self, member_id: i64) -> AppResult<Vec<BodyEvaluation>> {
        let mut conn = acquire(&self.pool).await?;
        list_member_evaluations(&mut conn, member_id).await
    }
}

fn row_to_evaluation(row: &SqliteRow) -> AppResult<BodyEvaluation> {
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(BodyEvaluation {
        id: row.get("id"),
        member_id: row.get("member_id"),
        date: parse_date(&date)?,
        measurements: BodyMeasurements {
            height_cm: row.get("height_cm"),
            weight_kg: row.get("weight_kg"),
            visceral_fat: row.get("visceral_fat"),
            trunk_subcutaneous_fat: row.get("trunk_subcutaneous_fat"),
            body_fat_men: row.get("body_fat_men"),
            body_fat_women: row.get("body_fat_women"),
            body_age: row.get("body_age"),
            bmi: row.get("bmi"),
            bmr_rm: row.get("bmr_rm"),
            skeletal_muscle_men: row.get("skeletal_muscle_men"),
            skeletal_muscle_women: row.get("skeletal_muscle_women"),
        },
        fat: row.get("fat"),
        fluids: row.get("fluids"),
        analysis_data: parse_json(row.get("analysis_data"))?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
