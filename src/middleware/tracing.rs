// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates a span per HTTP request carrying its request ID and logs completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info_span, Span};

use crate::logging::AppLogger;

/// Header carrying the request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID of a request, or `"unknown"` when the header is absent
#[must_use]
pub fn request_id<B>(request: &http::Request<B>) -> &str {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}

/// Span for one HTTP request, used as the `TraceLayer` span factory
pub fn request_span<B>(request: &http::Request<B>) -> Span {
    info_span!(
        "http_request",
        request_id = %request_id(request),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Log every completed request with its status and duration
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    AppLogger::log_api_request(
        &method,
        &path,
        response.status().as_u16(),
        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    );
    response
}
