// ABOUTME: Route handlers for the checkups REST API
// ABOUTME: CRUD on dated measurement snapshots outside the weekly sheet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::AppError;
use crate::models::CheckupInput;
use crate::resources::ServerResources;

/// Checkup routes handler
pub struct CheckupRoutes;

impl CheckupRoutes {
    /// Create all checkup routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/checkups",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/checkups/:id",
                get(Self::handle_get)
                    .put(Self::handle_replace)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let checkups = resources.database.checkups().list().await?;
        Ok((StatusCode::OK, Json(checkups)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CheckupInput>,
    ) -> Result<Response, AppError> {
        let checkup = resources.database.checkups().create(&body).await?;
        Ok((StatusCode::CREATED, Json(checkup)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let checkup = resources
            .database
            .checkups()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Checkup {id}")))?;
        Ok((StatusCode::OK, Json(checkup)).into_response())
    }

    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<CheckupInput>,
    ) -> Result<Response, AppError> {
        let checkup = resources
            .database
            .checkups()
            .replace(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Checkup {id}")))?;
        Ok((StatusCode::OK, Json(checkup)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.checkups().delete(id).await? {
            return Err(AppError::not_found(format!("Checkup {id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
