// ABOUTME: HTTP middleware for the studio server
// ABOUTME: CORS configuration and per-request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

/// CORS middleware configuration
pub mod cors;
/// Request tracing and request logging
pub mod tracing;

pub use self::cors::setup_cors;
pub use self::tracing::{log_requests, request_id, request_span, REQUEST_ID_HEADER};
