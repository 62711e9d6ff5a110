// ABOUTME: Route handlers for the weekly body checkup sheet
// ABOUTME: Reads the sixteen week sheet of a member and saves edited weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::body_checkup::{self, CheckupSaveRequest};

/// Body checkup sheet routes handler
pub struct BodyCheckupRoutes;

impl BodyCheckupRoutes {
    /// Create all body checkup routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/body-checkup/:member_id", get(Self::handle_sheet))
            .route("/api/body-checkup/:member_id/save", post(Self::handle_save))
            .with_state(resources)
    }

    /// Handle GET /api/body-checkup/:member_id
    async fn handle_sheet(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let sheet = body_checkup::load_sheet(&resources.database, member_id).await?;
        Ok((StatusCode::OK, Json(sheet)).into_response())
    }

    /// Handle POST /api/body-checkup/:member_id/save
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        Path(member_id): Path<i64>,
        Json(body): Json<CheckupSaveRequest>,
    ) -> Result<Response, AppError> {
        let result = body_checkup::save_sheet(&resources.database, member_id, &body).await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
