// ABOUTME: Error types for the studio server, re-exported from wellstudio-core
// ABOUTME: AppError with HTTP status mapping and JSON error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Unified Error Handling System
//!
//! The error vocabulary lives in `wellstudio_core::errors` so that the models
//! can report validation failures without depending on the server. The server
//! enables the core crate's `http-response` and `database-errors` features,
//! which make [`AppError`] an axum response and convertible from `sqlx::Error`.

pub use wellstudio_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
};
