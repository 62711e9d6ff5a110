// ABOUTME: Main library entry point for the Wellstudio fitness studio backend
// ABOUTME: Membership, attendance, payments, weekly checkups and body composition analysis over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Wellstudio Server
//!
//! Backend for a fitness studio front desk. Guests register through an
//! onboarding survey and a body composition evaluation, become members with a
//! session plan and balance, attend daily sessions, pay at the desk and are
//! measured weekly for sixteen weeks.
//!
//! ## Architecture
//!
//! - **Models** (`wellstudio-core`): records, payloads, money and errors
//! - **Analysis** (`wellstudio-analysis`): the body composition analyzer and
//!   the weekly checkup timeline, both pure
//! - **Database**: SQLite through `sqlx`, one manager per table
//! - **Services**: transactional workflows spanning several tables
//! - **Routes**: axum handlers delegating to managers and services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wellstudio_server::config::environment::ServerConfig;
//! use wellstudio_server::database::Database;
//! use wellstudio_server::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::connect(&config.database.url, config.database.max_connections).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     wellstudio_server::server::run(resources).await
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database managers and schema
pub mod database;

/// Unified error handling system
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for CORS and request tracing
pub mod middleware;

/// Domain models
pub mod models;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers organized by domain
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Transactional business workflows
pub mod services;
