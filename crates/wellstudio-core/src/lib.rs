// ABOUTME: Core types and constants for the Wellstudio studio management platform
// ABOUTME: Foundation crate with error handling, domain records and membership constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![deny(unsafe_code)]

//! # Wellstudio Core
//!
//! Foundation crate providing shared types and constants for the Wellstudio
//! membership backend. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Membership plan terms, payment methods and checkup tracking values
//! - **models**: Member, attendance, payment, checkup, registration and body evaluation records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models and validated input payloads
pub mod models;
