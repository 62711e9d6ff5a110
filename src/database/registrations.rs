// ABOUTME: Database operations for onboarding registration surveys
// ABOUTME: One survey per member, inserted or updated in place by the registration workflow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{acquire, parse_json, parse_timestamp, to_count};
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, MembershipPlan, Money, Registration, RegistrationForm};

const REGISTRATION_COLUMNS: &str = r"
    id, member_id, guest_name, mobile_number, invited_by, gender, membership, occupation,
    age, location, do_you_exercise, hours_sleep, liters_water, loss_of_energy, veg_nonveg,
    personal_health_history, transformation_targets, tried_diet_programs, surveyed_by,
    available_time, number_of_days, plan_total_amount, initial_amount_paid, created_at,
    updated_at
";

/// Load a registration by id
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_registration(
    conn: &mut SqliteConnection,
    id: i64,
) -> AppResult<Option<Registration>> {
    let row = sqlx::query(&format!(
        "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch registration: {e}")))?;

    row.as_ref().map(row_to_registration).transpose()
}

/// Load the survey linked to a member
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn fetch_member_registration(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> AppResult<Option<Registration>> {
    let row = sqlx::query(&format!(
        "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE member_id = ?1"
    ))
    .bind(member_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch member registration: {e}")))?;

    row.as_ref().map(row_to_registration).transpose()
}

/// Insert a survey for `member_id` and return its id
///
/// # Errors
///
/// Returns a conflict if the member already has a survey
pub async fn insert_registration(
    conn: &mut SqliteConnection,
    member_id: i64,
    form: &RegistrationForm,
    plan_total: Money,
) -> AppResult<i64> {
    let now = Utc::now().to_rfc3339();
    let history = encode_history(form)?;

    let result = sqlx::query(
        r"
        INSERT INTO registrations (
            member_id, guest_name, mobile_number, invited_by, gender, membership, occupation,
            age, location, do_you_exercise, hours_sleep, liters_water, loss_of_energy,
            veg_nonveg, personal_health_history, transformation_targets, tried_diet_programs,
            surveyed_by, available_time, number_of_days, plan_total_amount,
            initial_amount_paid, created_at, updated_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
            ?18, ?19, ?20, ?21, ?22, ?23, ?23
        )
        ",
    )
    .bind(member_id)
    .bind(&form.guest_name)
    .bind(&form.mobile_number)
    .bind(&form.invited_by)
    .bind(form.gender.as_str())
    .bind(form.membership.as_str())
    .bind(&form.occupation)
    .bind(i64::from(form.age))
    .bind(form.location.as_deref())
    .bind(&form.do_you_exercise)
    .bind(&form.hours_sleep)
    .bind(&form.liters_water)
    .bind(&form.loss_of_energy)
    .bind(form.veg_nonveg.as_deref())
    .bind(history)
    .bind(&form.transformation_targets)
    .bind(form.tried_diet_programs)
    .bind(&form.surveyed_by)
    .bind(&form.available_time)
    .bind(form.number_of_days.map(i64::from))
    .bind(plan_total.minor_units())
    .bind(form.initial_amount_paid.minor_units())
    .bind(&now)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite the survey fields of an existing registration
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` if the registration no longer exists
pub async fn update_registration(
    conn: &mut SqliteConnection,
    id: i64,
    form: &RegistrationForm,
    plan_total: Money,
) -> AppResult<()> {
    let history = encode_history(form)?;

    let result = sqlx::query(
        r"
        UPDATE registrations SET
            guest_name = ?2, mobile_number = ?3, invited_by = ?4, gender = ?5,
            membership = ?6, occupation = ?7, age = ?8, location = ?9, do_you_exercise = ?10,
            hours_sleep = ?11, liters_water = ?12, loss_of_energy = ?13, veg_nonveg = ?14,
            personal_health_history = ?15, transformation_targets = ?16,
            tried_diet_programs = ?17, surveyed_by = ?18, available_time = ?19,
            number_of_days = ?20, plan_total_amount = ?21, initial_amount_paid = ?22,
            updated_at = ?23
        WHERE id = ?1
        ",
    )
    .bind(id)
    .bind(&form.guest_name)
    .bind(&form.mobile_number)
    .bind(&form.invited_by)
    .bind(form.gender.as_str())
    .bind(form.membership.as_str())
    .bind(&form.occupation)
    .bind(i64::from(form.age))
    .bind(form.location.as_deref())
    .bind(&form.do_you_exercise)
    .bind(&form.hours_sleep)
    .bind(&form.liters_water)
    .bind(&form.loss_of_energy)
    .bind(form.veg_nonveg.as_deref())
    .bind(history)
    .bind(&form.transformation_targets)
    .bind(form.tried_diet_programs)
    .bind(&form.surveyed_by)
    .bind(&form.available_time)
    .bind(form.number_of_days.map(i64::from))
    .bind(plan_total.minor_units())
    .bind(form.initial_amount_paid.minor_units())
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to update registration: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("Registration {id}")));
    }
    Ok(())
}

fn encode_history(form: &RegistrationForm) -> AppResult<Option<String>> {
    form.personal_health_history
        .as_ref()
        .filter(|value| !value.is_null())
        .map(serde_json::to_string)
        .transpose()
        .map_err(AppError::from)
}

/// Registration survey database operations manager
pub struct RegistrationsManager {
    pool: SqlitePool,
}

impl RegistrationsManager {
    /// Create a new registrations manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a registration by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Registration>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_registration(&mut conn, id).await
    }

    /// Get the survey linked to a member
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn for_member(&self, member_id: i64) -> AppResult<Option<Registration>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_member_registration(&mut conn, member_id).await
    }
}

fn row_to_registration(row: &SqliteRow) -> AppResult<Registration> {
    let gender: String = row.get("gender");
    let membership: String = row.get("membership");
    let number_of_days: Option<i64> = row.get("number_of_days");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Registration {
        id: row.get("id"),
        member_id: row.get("member_id"),
        guest_name: row.get("guest_name"),
        mobile_number: row.get("mobile_number"),
        invited_by: row.get("invited_by"),
        gender: Gender::from_str_lossy(&gender),
        membership: MembershipPlan::parse(&membership).ok_or_else(|| {
            AppError::internal(format!("Invalid stored membership: {membership}"))
        })?,
        occupation: row.get("occupation"),
        age: to_count(row.get("age"), "age")?,
        location: row.get("location"),
        do_you_exercise: row.get("do_you_exercise"),
        hours_sleep: row.get("hours_sleep"),
        liters_water: row.get("liters_water"),
        loss_of_energy: row.get("loss_of_energy"),
        veg_nonveg: row.get("veg_nonveg"),
        personal_health_history: parse_json(row.get("personal_health_history"))?,
        transformation_targets: row.get("transformation_targets"),
        tried_diet_programs: row.get("tried_diet_programs"),
        surveyed_by: row.get("surveyed_by"),
        available_time: row.get("available_time"),
        number_of_days: number_of_days
            .map(|days| to_count(days, "number_of_days"))
            .transpose()?,
        plan_total_amount: Money::from_minor(row.get("plan_total_amount")),
        initial_amount_paid: Money::from_minor(row.get("initial_amount_paid")),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
