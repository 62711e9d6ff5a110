// ABOUTME: HTTP server assembly for the studio backend
// ABOUTME: Merges domain routers, applies tower-http layers and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # HTTP Server
//!
//! Request flow, outermost first: request ID assignment, tracing span,
//! request ID propagation to the response, CORS, body size limit, timeout and
//! the completion log line.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::Uri;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::constants::network::MAX_REQUEST_BODY_BYTES;
use crate::errors::AppError;
use crate::middleware::{log_requests, request_span, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{
    AttendanceRoutes, BodyCheckupRoutes, CheckupRoutes, DashboardRoutes, HealthRoutes,
    MemberRoutes, PaymentRoutes, RegistrationRoutes,
};

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let config = &resources.config;

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(MemberRoutes::routes(Arc::clone(resources)))
        .merge(AttendanceRoutes::routes(Arc::clone(resources)))
        .merge(PaymentRoutes::routes(Arc::clone(resources)))
        .merge(CheckupRoutes::routes(Arc::clone(resources)))
        .merge(RegistrationRoutes::routes(Arc::clone(resources)))
        .merge(BodyCheckupRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)))
        .fallback(handle_unknown_route)
        .layer(middleware::from_fn(log_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(setup_cors(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn handle_unknown_route(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Bind the configured address and serve until SIGINT or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let bind_address = resources.config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    info!(address = %bind_address, "HTTP server listening");

    let app = build_router(&resources);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match (
            unix_signal(SignalKind::terminate()),
            unix_signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                    _ = sigint.recv() => info!("Received SIGINT, shutting down"),
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to register signal handlers, waiting for Ctrl-C");
            }
        }
    }

    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    info!("Received Ctrl-C, shutting down");
}
