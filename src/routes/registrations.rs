// ABOUTME: Route handlers for guest registration
// ABOUTME: Submits the onboarding form with its body evaluation and reads stored surveys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Registration routes
//!
//! `POST /api/registrations` expects `{"registration": {...}, "body_evaluation": {...}}`
//! and answers 201 with the member detail, the stored survey and the analysed
//! evaluation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::registration::{self, RegistrationRequest};

/// Registration routes handler
pub struct RegistrationRoutes;

impl RegistrationRoutes {
    /// Create all registration routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/registrations", post(Self::handle_register))
            .route("/api/registrations/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle POST /api/registrations
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegistrationRequest>,
    ) -> Result<Response, AppError> {
        let outcome = registration::register(&resources.database, &body).await?;
        Ok((StatusCode::CREATED, Json(outcome)).into_response())
    }

    /// Handle GET /api/registrations/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let registration = resources
            .database
            .registrations()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Registration {id}")))?;
        Ok((StatusCode::OK, Json(registration)).into_response())
    }
}
