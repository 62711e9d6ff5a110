// ABOUTME: Business workflows that span several tables in one transaction
// ABOUTME: Registration onboarding, desk attendance submission and weekly body checkups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Service layer
//!
//! Route handlers stay thin and delegate here. Each workflow opens a single
//! `sqlx` transaction, composes the connection-level helpers from
//! [`crate::database`], commits, and only then reads its response through the
//! pool.

/// Weekly body checkup sheet read and save
pub mod body_checkup;
/// Desk attendance submission
pub mod attendance;
/// Guest registration and onboarding evaluation
pub mod registration;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::errors::{AppError, AppResult};

async fn begin(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    pool.begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
}

async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))
}
