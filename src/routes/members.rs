// ABOUTME: Route handlers for the members REST API
// ABOUTME: List, detail, create, full replace and delete of studio members
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Member routes
//!
//! The list returns the compact summary view; the detail view adds the
//! onboarding survey and every body evaluation, newest first.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::AppError;
use crate::models::{MemberInput, MemberSummary};
use crate::resources::ServerResources;

/// Member routes handler
pub struct MemberRoutes;

impl MemberRoutes {
    /// Create all member routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/members",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/members/:id",
                get(Self::handle_get)
                    .put(Self::handle_replace)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/members
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let members = resources.database.members().list().await?;
        let summaries: Vec<MemberSummary> = members.iter().map(MemberSummary::from).collect();
        Ok((StatusCode::OK, Json(summaries)).into_response())
    }

    /// Handle POST /api/members
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<MemberInput>,
    ) -> Result<Response, AppError> {
        let member = resources.database.members().create(&body).await?;
        Ok((StatusCode::CREATED, Json(member)).into_response())
    }

    /// Handle GET /api/members/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .members()
            .get_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {id}")))?;
        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle PUT /api/members/:id
    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<MemberInput>,
    ) -> Result<Response, AppError> {
        let member = resources
            .database
            .members()
            .replace(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {id}")))?;
        Ok((StatusCode::OK, Json(member)).into_response())
    }

    /// Handle DELETE /api/members/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.members().delete(id).await? {
            return Err(AppError::not_found(format!("Member {id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
