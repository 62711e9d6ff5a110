// ABOUTME: Unit tests for environment driven server and logging configuration
// ABOUTME: Defaults, overrides, invalid values and database URL handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use serial_test::serial;
use wellstudio_server::config::environment::{DatabaseUrl, Environment, ServerConfig};
use wellstudio_server::database::Database;
use wellstudio_server::logging::{LogFormat, LoggingConfig};

const SERVER_VARS: [&str; 7] = [
    "HTTP_PORT",
    "HOST",
    "DATABASE_URL",
    "ENVIRONMENT",
    "CORS_ALLOWED_ORIGINS",
    "STUDIO_NAME",
    "REQUEST_TIMEOUT_SECS",
];

fn clear_server_vars() {
    for key in SERVER_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_server_vars();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.database.url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/wellstudio.db")
        }
    );
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.studio_name, "Wellstudio");
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_server_vars();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://desk.example.com");
    env::set_var("STUDIO_NAME", "Sunrise Fitness");
    env::set_var("REQUEST_TIMEOUT_SECS", "5");

    let config = ServerConfig::from_env().unwrap();
    clear_server_vars();

    assert_eq!(config.bind_address(), "0.0.0.0:9090");
    assert!(config.environment.is_production());
    assert!(config.database.url.is_memory());
    assert_eq!(config.cors.allowed_origins, "https://desk.example.com");
    assert_eq!(config.request_timeout_secs, 5);
    assert!(config.summary().starts_with("Sunrise Fitness Server Configuration"));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_server_vars();
    env::set_var("HTTP_PORT", "eighty");
    assert!(ServerConfig::from_env().is_err());

    clear_server_vars();
    env::set_var("REQUEST_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_server_vars();
    env::set_var("DATABASE_URL", "postgres://localhost/studio");
    assert!(ServerConfig::from_env().is_err());
    clear_server_vars();
}

#[test]
fn test_database_url_round_trip() {
    let url = DatabaseUrl::parse_url("sqlite://relative/studio.db").unwrap();
    assert_eq!(url.to_connection_string(), "sqlite:relative/studio.db");
    assert_eq!(
        DatabaseUrl::parse_url("data/studio.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("data/studio.db")
        }
    );
    assert_eq!(DatabaseUrl::Memory.to_string(), "sqlite::memory:");
}

#[tokio::test]
async fn test_file_database_created_with_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("studio.db");
    let url = DatabaseUrl::SQLite { path: path.clone() };

    let database = Database::connect(&url, 2).await.unwrap();
    assert!(database.members().list().await.unwrap().is_empty());
    assert!(path.exists());
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.service_name, "wellstudio-server");
    assert!(!config.include_location);

    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_spans);
}
