// ABOUTME: Route handlers for the payments REST API
// ABOUTME: Payment CRUD with the member name joined into each record
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
use crate::models::PaymentInput;
use crate::resources::ServerResources;

/// Payment routes handler
pub struct PaymentRoutes;

impl PaymentRoutes {
    /// Create all payment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/payments",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/payments/:id",
                get(Self::handle_get)
                    .put(Self::handle_replace)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let payments = resources.database.payments().list().await?;
        Ok((StatusCode::OK, Json(payments)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<PaymentInput>,
    ) -> Result<Response, AppError> {
        let payment = resources.database.payments().create(&body).await?;
        Ok((StatusCode::CREATED, Json(payment)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let payment = resources
            .database
            .payments()
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {id}")))?;
        Ok((StatusCode::OK, Json(payment)).into_response())
    }

    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<PaymentInput>,
    ) -> Result<Response, AppError> {
        let payment = resources
            .database
            .payments()
            .replace(id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {id}")))?;
        Ok((StatusCode::OK, Json(payment)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.payments().delete(id).await? {
            return Err(AppError::not_found(format!("Payment {id}")));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
