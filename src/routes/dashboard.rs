// ABOUTME: Dashboard route handlers for front desk statistics and the daily report
// ABOUTME: Member totals, today's attendance, outstanding balances and daily attendance summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Dashboard routes
//!
//! The daily report is the JSON form of the printed attendance sheet.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::resources::ServerResources;

/// Query parameters for the daily report
#[derive(Debug, Deserialize)]
struct DailyReportQuery {
    /// Reported day, today when omitted
    date: Option<NaiveDate>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard/stats", get(Self::handle_stats))
            .route("/api/report/daily", get(Self::handle_daily_report))
            .with_state(resources)
    }

    /// Handle GET /api/dashboard/stats
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let today = Utc::now().date_naive();
        let stats = resources.database.reports().dashboard_stats(today).await?;
        Ok((StatusCode::OK, Json(stats)).into_response())
    }

    /// Handle GET /api/report/daily
    async fn handle_daily_report(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<DailyReportQuery>,
    ) -> Result<Response, AppError> {
        let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
        let summary = resources.database.reports().daily_summary(date).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
