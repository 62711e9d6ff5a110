// ABOUTME: Route handlers for attendance rows and the daily desk submission
// ABOUTME: Attendance CRUD plus the batch submit endpoint that moves sessions and balances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Attendance routes
//!
//! Plain CRUD on `/api/attendances` edits rows without side effects. The desk
//! uses `/api/attendance/submit`, which also counts sessions and books payments.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::errors::AppError;
use crate::models::{AttendanceInput, AttendanceSubmission};
use crate::resources::ServerResources;
use crate::services::attendance;

/// Attendance routes handler
pub struct AttendanceRoutes;

impl AttendanceRoutes {
    /// Create all attendance routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/attendances",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/attendances/:id",
                get(Self::handle_get)
                    .put(Self::handle_replace)
                    .delete(Self::handle_delete),
            )
            .route("/api/attendance/submit", post(Self::handle_submit))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let rows = resources.database.attendance().list().await?;
        Ok((StatusCode::OK, Json(rows)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<AttendanceInput>,
    ) -> Result<Response, AppError> {
        let row = resources.database.attendance().create(&body).await?;
        Ok((StatusCode::CREATED, Json(row)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let row = resources
            .database
            .attendance()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attendance {id}")))?;
        Ok((StatusCode::OK, Json(row)).into_response())
    }

    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<AttendanceInput>,
    ) -> Result<Response, AppError> {
        let row = resources
            .database
            .attendance()
            .replace(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attendance {id}")))?;
        Ok((StatusCode::OK, Json(row)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.attendance().delete(id).await? {
            return Err(AppError::not_found(format!("Attendance {id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /api/attendance/submit
    async fn handle_submit(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<AttendanceSubmission>,
    ) -> Result<Response, AppError> {
        let summary = attendance::submit(&resources.database, &body).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
