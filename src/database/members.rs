// ABOUTME: Database operations for studio members
// ABOUTME: Member CRUD plus the connection-level helpers shared by the workflows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{
    acquire, fetch_member_registration, format_date, list_member_evaluations, parse_date,
    parse_optional_date, parse_timestamp, to_count,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, Member, MemberDetail, MemberInput, MembershipPlan, Money};

const MEMBER_COLUMNS: &str = r"
    id, member_code, full_name, phone, gender, invited_by, registration_date,
    membership, membership_total_sessions, ums_count, balance, total_paid,
    latest_weight, latest_height, next_checkup_date, created_at, updated_at
";

/// Load a member by id
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be decoded
pub async fn fetch_member(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Member>> {
    let row = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch member: {e}")))?;

    row.as_ref().map(row_to_member).transpose()
}

/// Find the first member registered with `phone`
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn find_member_by_phone(
    conn: &mut SqliteConnection,
    phone: &str,
) -> AppResult<Option<Member>> {
    let row = sqlx::query(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members WHERE phone = ?1 ORDER BY id LIMIT 1"
    ))
    .bind(phone)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to look up member by phone: {e}")))?;

    row.as_ref().map(row_to_member).transpose()
}

/// Whether a member already uses `member_code`
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn member_code_exists(conn: &mut SqliteConnection, member_code: &str) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE member_code = ?1")
        .bind(member_code)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check member code: {e}")))?;

    Ok(count > 0)
}

/// Insert a member and return its id
///
/// # Errors
///
/// Returns `RESOURCE_ALREADY_EXISTS` when the member code is taken
pub async fn insert_member(
    conn: &mut SqliteConnection,
    input: &MemberInput,
    registration_date: NaiveDate,
) -> AppResult<i64> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r"
        INSERT INTO members (
            member_code, full_name, phone, gender, invited_by, registration_date,
            membership, membership_total_sessions, ums_count, balance, total_paid,
            latest_weight, latest_height, next_checkup_date, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)
        ",
    )
    .bind(input.member_code.trim())
    .bind(input.full_name.trim())
    .bind(input.phone.as_deref())
    .bind(input.gender.map(Gender::as_str))
    .bind(input.invited_by.as_deref())
    .bind(format_date(registration_date))
    .bind(input.membership.map(MembershipPlan::as_str))
    .bind(i64::from(input.membership_total_sessions))
    .bind(i64::from(input.ums_count))
    .bind(input.balance.minor_units())
    .bind(input.total_paid.minor_units())
    .bind(input.latest_weight)
    .bind(input.latest_height)
    .bind(input.next_checkup_date.map(format_date))
    .bind(&now)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Write every mutable column of `member` back to its row
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` if the row no longer exists
pub async fn save_member(conn: &mut SqliteConnection, member: &Member) -> AppResult<()> {
    let result = sqlx::query(
        r"
        UPDATE members SET
            member_code = ?2, full_name = ?3, phone = ?4, gender = ?5, invited_by = ?6,
            registration_date = ?7, membership = ?8, membership_total_sessions = ?9,
            ums_count = ?10, balance = ?11, total_paid = ?12, latest_weight = ?13,
            latest_height = ?14, next_checkup_date = ?15, updated_at = ?16
        WHERE id = ?1
        ",
    )
    .bind(member.id)
    .bind(&member.member_code)
    .bind(&member.full_name)
    .bind(member.phone.as_deref())
    .bind(member.gender.map(Gender::as_str))
    .bind(member.invited_by.as_deref())
    .bind(format_date(member.registration_date))
    .bind(member.membership.map(MembershipPlan::as_str))
    .bind(i64::from(member.membership_total_sessions))
    .bind(i64::from(member.ums_count))
    .bind(member.balance.minor_units())
    .bind(member.total_paid.minor_units())
    .bind(member.latest_weight)
    .bind(member.latest_height)
    .bind(member.next_checkup_date.map(format_date))
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("Member {}", member.id)));
    }
    Ok(())
}

/// Delete a member; related rows go with it
///
/// # Errors
///
/// Returns an error if the statement fails
pub async fn delete_member(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM members WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete member: {e}")))?;

    Ok(result.rows_affected() > 0)
}

/// Member database operations manager
pub struct MembersManager {
    pool: SqlitePool,
}

impl MembersManager {
    /// Create a new members manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All members ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY full_name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list members: {e}")))?;

        rows.iter().map(row_to_member).collect()
    }

    /// Get a member by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Member>> {
        let mut conn = acquire(&self.pool).await?;
        fetch_member(&mut conn, id).await
    }

    /// Member with registration survey and body evaluations
    ///
    /// # Errors
    ///
    /// Returns an error if any of the queries fail
    pub async fn get_detail(&self, id: i64) -> AppResult<Option<MemberDetail>> {
        let mut conn = acquire(&self.pool).await?;
        let Some(member) = fetch_member(&mut conn, id).await? else {
            return Ok(None);
        };
        let registration = fetch_member_registration(&mut conn, id).await?;
        let evaluations = list_member_evaluations(&mut conn, id).await?;
        Ok(Some(MemberDetail::new(member, registration, evaluations)))
    }

    /// Create a member from a validated payload
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank fields or a conflict for a taken code
    pub async fn create(&self, input: &MemberInput) -> AppResult<Member> {
        input.validate()?;
        let registration_date = input
            .registration_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut conn = acquire(&self.pool).await?;
        let id = insert_member(&mut conn, input, registration_date).await?;
        fetch_member(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::internal("Inserted member could not be read back"))
    }

    /// Replace every field of a member; omitted registration date keeps the stored one
    ///
    /// # Errors
    ///
    /// Returns a validation error or a conflict for a taken code
    pub async fn replace(&self, id: i64, input: &MemberInput) -> AppResult<Option<Member>> {
        input.validate()?;
        let mut conn = acquire(&self.pool).await?;
        let Some(existing) = fetch_member(&mut conn, id).await? else {
            return Ok(None);
        };

        let member = Member {
            member_code: input.member_code.trim().to_owned(),
            full_name: input.full_name.trim().to_owned(),
            phone: input.phone.clone(),
            gender: input.gender,
            invited_by: input.invited_by.clone(),
            registration_date: input
                .registration_date
                .unwrap_or(existing.registration_date),
            membership: input.membership,
            membership_total_sessions: input.membership_total_sessions,
            ums_count: input.ums_count,
            balance: input.balance,
            total_paid: input.total_paid,
            latest_weight: input.latest_weight,
            latest_height: input.latest_height,
            next_checkup_date: input.next_checkup_date,
            ..existing
        };
        save_member(&mut conn, &member).await?;
        fetch_member(&mut conn, id).await
    }

    /// Delete a member by id
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut conn = acquire(&self.pool).await?;
        delete_member(&mut conn, id).await
    }
}

/// Convert database row to Member
fn row_to_member(row: &SqliteRow) -> AppResult<Member> {
    let gender: Option<String> = row.get("gender");
    let membership: Option<String> = row.get("membership");
    let registration_date: String = row.get("registration_date");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Member {
        id: row.get("id"),
        member_code: row.get("member_code"),
        full_name: row.get("full_name"),
        phone: row.get("phone"),
        gender: gender.as_deref().map(Gender::from_str_lossy),
        invited_by: row.get("invited_by"),
        registration_date: parse_date(&registration_date)?,
        membership: membership.as_deref().and_then(MembershipPlan::parse),
        membership_total_sessions: to_count(
            row.get("membership_total_sessions"),
            "membership_total_sessions",
        )?,
        ums_count: to_count(row.get("ums_count"), "ums_count")?,
        balance: Money::from_minor(row.get("balance")),
        total_paid: Money::from_minor(row.get("total_paid")),
        latest_weight: row.get("latest_weight"),
        latest_height: row.get("latest_height"),
        next_checkup_date: parse_optional_date(row.get("next_checkup_date"))?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
