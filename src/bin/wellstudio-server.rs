// ABOUTME: Server binary for the Wellstudio studio backend
// ABOUTME: Loads configuration, initializes logging, opens the database and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Wellstudio Server Binary
//!
//! ```bash
//! DATABASE_URL=sqlite:./data/wellstudio.db wellstudio-server --http-port 8081
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use wellstudio_server::config::environment::ServerConfig;
use wellstudio_server::database::Database;
use wellstudio_server::logging;
use wellstudio_server::resources::ServerResources;
use wellstudio_server::server;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "wellstudio-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wellstudio - membership, attendance and body composition backend")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    info!("{}", config.summary());

    let database =
        Database::connect(&config.database.url, config.database.max_connections).await?;
    info!("Database initialized: {}", config.database.url);

    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(database, config));
    server::run(resources).await
}

fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}", config.bind_address());
    info!("=== Available API Endpoints ===");
    info!("  Health:        GET  {base}/health");
    info!("  Members:       GET  {base}/api/members");
    info!("  Registration:  POST {base}/api/registrations");
    info!("  Attendance:    POST {base}/api/attendance/submit");
    info!("  Body checkup:  GET  {base}/api/body-checkup/:member_id");
    info!("  Dashboard:     GET  {base}/api/dashboard/stats");
    info!("  Daily report:  GET  {base}/api/report/daily?date=YYYY-MM-DD");
    info!("=== End of Endpoint List ===");
}
