// ABOUTME: System-wide constants and configuration defaults for the Wellstudio server
// ABOUTME: Service names, network defaults and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Constants Module
//!
//! Server-level constants. Domain constants (plan terms, payment methods,
//! tracked weeks) live in `wellstudio_core::constants`.

pub use wellstudio_core::constants::{checkups, member_codes, membership, payment_methods};

/// Service identification
pub mod service_names {
    /// Default service name for logs and health output
    pub const WELLSTUDIO_SERVER: &str = "wellstudio-server";
    /// Default studio display name
    pub const DEFAULT_STUDIO_NAME: &str = "Wellstudio";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted request body in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
}

/// Database defaults
pub mod database {
    /// Default SQLite database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/wellstudio.db";
    /// Maximum pooled connections for file databases
    pub const MAX_CONNECTIONS: u32 = 5;
}

/// Environment variable names read at startup
pub mod env_vars {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Studio display name
    pub const STUDIO_NAME: &str = "STUDIO_NAME";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}
