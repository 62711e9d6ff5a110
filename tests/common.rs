// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, server resources, router and registration fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `wellstudio_server`
//!
//! Every test gets its own in-memory database so tests never share state.

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use serde_json::{json, Value};
use tracing::Level;
use wellstudio_server::config::environment::ServerConfig;
use wellstudio_server::database::Database;
use wellstudio_server::models::{Member, MemberInput};
use wellstudio_server::resources::ServerResources;
use wellstudio_server::server::build_router;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Server resources over a fresh in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        ServerConfig::default(),
    )))
}

/// Fully layered router plus the resources behind it
pub async fn create_test_router() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_server_resources().await?;
    Ok((build_router(&resources), resources))
}

/// Insert a member directly through the manager
pub async fn create_test_member(database: &Database, code: &str, name: &str) -> Result<Member> {
    let input = MemberInput {
        member_code: code.to_owned(),
        full_name: name.to_owned(),
        phone: Some(format!("98{:08}", code.len() * 1_000 + name.len())),
        ..MemberInput::default()
    };
    Ok(database.members().create(&input).await?)
}

/// Complete onboarding survey for a male guest on the UMS plan
pub fn registration_form(name: &str, mobile: &str) -> Value {
    json!({
        "guest_name": name,
        "mobile_number": mobile,
        "invited_by": "Referral 4",
        "gender": "Male",
        "membership": "UMS",
        "occupation": "Teacher",
        "age": 25,
        "location": "Koramangala",
        "do_you_exercise": "No",
        "hours_sleep": "6",
        "liters_water": "2",
        "loss_of_energy": "Afternoon",
        "veg_nonveg": "Veg",
        "transformation_targets": "Lose weight",
        "tried_diet_programs": false,
        "surveyed_by": "Anita",
        "available_time": "Morning",
        "initial_amount_paid": 2000
    })
}

/// Readings of a male guest under the healthy weight band
pub fn lean_evaluation() -> Value {
    json!({
        "date": "2025-01-06",
        "height_cm": "170",
        "weight_kg": "60",
        "visceral_fat": "8",
        "body_fat_men": "15",
        "skeletal_muscle_men": "33",
        "body_age": "27",
        "bmi": "20.8",
        "bmr_rm": "1480"
    })
}

/// Full registration request body
pub fn registration_request(name: &str, mobile: &str) -> Value {
    json!({
        "registration": registration_form(name, mobile),
        "body_evaluation": lean_evaluation(),
    })
}
