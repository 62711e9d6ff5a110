// ABOUTME: Database management for the studio backend over a SQLite pool
// ABOUTME: Connection setup, table creation and shared row decoding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Database Management
//!
//! One manager per table, each holding a clone of the pool. Every manager
//! module also exposes free functions over `&mut SqliteConnection` so that the
//! multi-table workflows in `services` can compose them inside a single
//! transaction.

mod attendance;
mod checkups;
mod evaluations;
mod members;
mod payments;
mod registrations;
mod reports;

pub use attendance::{
    fetch_attendance, find_attendance, insert_attendance, update_attendance, AttendanceManager,
};
pub use checkups::{
    fetch_checkup, find_checkup_on, insert_checkup, list_member_checkups, update_checkup,
    CheckupsManager,
};
pub use evaluations::{
    insert_evaluation, latest_evaluation, list_member_evaluations, record_analysis,
    EvaluationsManager,
};
pub use members::{
    delete_member, fetch_member, find_member_by_phone, insert_member, member_code_exists,
    save_member, MembersManager,
};
pub use payments::{fetch_payment, insert_payment, NewPayment, PaymentsManager};
pub use registrations::{
    fetch_member_registration, fetch_registration, insert_registration, update_registration,
    RegistrationsManager,
};
pub use reports::{DailySummary, DashboardStats, ReportsManager};

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use crate::config::environment::DatabaseUrl;
use crate::constants::database::MAX_CONNECTIONS;
use crate::errors::{AppError, AppResult};

/// Database handle shared across the server
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database at `database_url` and create missing tables
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the file cannot be created or a
    /// table cannot be created
    pub async fn new(database_url: &str) -> Result<Self> {
        let url = DatabaseUrl::parse_url(database_url)?;
        Self::connect(&url, MAX_CONNECTIONS).await
    }

    /// Open a database from a parsed URL
    ///
    /// In-memory databases are pinned to a single long-lived connection so
    /// that every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or table creation fails
    pub async fn connect(url: &DatabaseUrl, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .context("Invalid SQLite connection string")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let DatabaseUrl::SQLite { path } = url {
                ensure_parent_dir(path)?;
            }
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {url}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Member records
    #[must_use]
    pub fn members(&self) -> MembersManager {
        MembersManager::new(self.pool.clone())
    }

    /// Attendance records
    #[must_use]
    pub fn attendance(&self) -> AttendanceManager {
        AttendanceManager::new(self.pool.clone())
    }

    /// Payment records
    #[must_use]
    pub fn payments(&self) -> PaymentsManager {
        PaymentsManager::new(self.pool.clone())
    }

    /// Checkup records
    #[must_use]
    pub fn checkups(&self) -> CheckupsManager {
        CheckupsManager::new(self.pool.clone())
    }

    /// Registration surveys
    #[must_use]
    pub fn registrations(&self) -> RegistrationsManager {
        RegistrationsManager::new(self.pool.clone())
    }

    /// Body evaluations
    #[must_use]
    pub fn evaluations(&self) -> EvaluationsManager {
        EvaluationsManager::new(self.pool.clone())
    }

    /// Dashboard and daily report aggregates
    #[must_use]
    pub fn reports(&self) -> ReportsManager {
        ReportsManager::new(self.pool.clone())
    }

    /// Create tables and indexes that do not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_members().await?;
        self.migrate_activity().await?;
        self.migrate_onboarding().await?;
        Ok(())
    }

    async fn migrate_members(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS members (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_code TEXT NOT NULL UNIQUE,
                full_name TEXT NOT NULL,
                phone TEXT,
                gender TEXT,
                invited_by TEXT,
                registration_date TEXT NOT NULL,
                membership TEXT,
                membership_total_sessions INTEGER NOT NULL DEFAULT 0,
                ums_count INTEGER NOT NULL DEFAULT 0,
                balance INTEGER NOT NULL DEFAULT 0,
                total_paid INTEGER NOT NULL DEFAULT 0,
                latest_weight REAL,
                latest_height REAL,
                next_checkup_date TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_members_phone ON members(phone)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_members_full_name ON members(full_name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn migrate_activity(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS attendances (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                present INTEGER NOT NULL DEFAULT 0,
                paid_amount INTEGER NOT NULL DEFAULT 0,
                submitted_at TEXT,
                notes TEXT,
                UNIQUE(member_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendances_date ON attendances(date)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS payments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL,
                method TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_payments_member ON payments(member_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS checkups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
                checkup_date TEXT NOT NULL,
                weight REAL,
                height REAL,
                category_data TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_checkups_member_date ON checkups(member_id, checkup_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_onboarding(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS registrations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_id INTEGER UNIQUE REFERENCES members(id) ON DELETE CASCADE,
                guest_name TEXT NOT NULL,
                mobile_number TEXT NOT NULL,
                invited_by TEXT NOT NULL DEFAULT '',
                gender TEXT NOT NULL DEFAULT 'Other',
                membership TEXT NOT NULL DEFAULT 'UMS',
                occupation TEXT NOT NULL,
                age INTEGER NOT NULL DEFAULT 0,
                location TEXT,
                do_you_exercise TEXT NOT NULL,
                hours_sleep TEXT NOT NULL,
                liters_water TEXT NOT NULL,
                loss_of_energy TEXT NOT NULL,
                veg_nonveg TEXT,
                personal_health_history TEXT,
                transformation_targets TEXT NOT NULL,
                tried_diet_programs INTEGER NOT NULL DEFAULT 0,
                surveyed_by TEXT NOT NULL,
                available_time TEXT NOT NULL,
                number_of_days INTEGER,
                plan_total_amount INTEGER NOT NULL DEFAULT 0,
                initial_amount_paid INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS body_evaluations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                visceral_fat REAL NOT NULL,
                trunk_subcutaneous_fat REAL,
                body_fat_men REAL,
                body_fat_women REAL,
                body_age REAL,
                bmi REAL,
                bmr_rm REAL,
                skeletal_muscle_men REAL,
                skeletal_muscle_women REAL,
                fat REAL,
                fluids REAL,
                analysis_data TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_body_evaluations_member ON body_evaluations(member_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
    }
    Ok(())
}

/// Check a connection out of the pool
pub(crate) async fn acquire(pool: &SqlitePool) -> AppResult<PoolConnection<Sqlite>> {
    pool.acquire()
        .await
        .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))
}

/// Decode a `YYYY-MM-DD` column
pub(crate) fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::internal(format!("Invalid date {value:?}: {e}")))
}

/// Decode a nullable `YYYY-MM-DD` column
pub(crate) fn parse_optional_date(value: Option<String>) -> AppResult<Option<NaiveDate>> {
    value.as_deref().map(parse_date).transpose()
}

/// Decode an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime {value:?}: {e}")))
}

/// Decode a nullable JSON text column
pub(crate) fn parse_json(value: Option<String>) -> AppResult<Option<Value>> {
    value
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(AppError::from)
}

/// Decode a non-negative integer column
pub(crate) fn to_count(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::internal(format!("Column {column} out of range: {value}")))
}

/// Encode a date for storage
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
