// ABOUTME: Demo data loader creating sample members for local testing
// ABOUTME: Generates members M001.. with random phone, gender, balance and session counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Usage:
//! ```bash
//! # Create the default 20 sample members
//! cargo run --bin seed-demo-data
//!
//! # Create 50 members in a specific database
//! cargo run --bin seed-demo-data -- --count 50 --database-url sqlite:./data/demo.db
//! ```

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tracing::{info, warn};
use wellstudio_server::config::environment::{DatabaseUrl, ServerConfig};
use wellstudio_server::database::Database;
use wellstudio_server::errors::ErrorCode;
use wellstudio_server::logging::{LogFormat, LoggingConfig};
use wellstudio_server::models::{Gender, MemberInput, Money};

const SAMPLE_NAMES: [&str; 20] = [
    "Rajesh Kumar",
    "Priya Sharma",
    "Amit Singh",
    "Sneha Patel",
    "Vikram Rao",
    "Anita Gupta",
    "Rahul Verma",
    "Kavita Jain",
    "Suresh Reddy",
    "Meera Shah",
    "Arun Kumar",
    "Deepika Singh",
    "Sanjay Agarwal",
    "Pooja Tiwari",
    "Manoj Yadav",
    "Ritu Malhotra",
    "Kiran Dubey",
    "Nikhil Chopra",
    "Swati Bansal",
    "Rohit Saxena",
];

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Wellstudio demo data loader",
    long_about = "Create sample members for local testing. Existing member codes are left untouched."
)]
struct SeedArgs {
    /// Number of sample members to create
    #[arg(long, default_value = "20")]
    count: usize,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    LoggingConfig {
        level: if args.verbose { "debug" } else { "info" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let url = match args.database_url.as_deref() {
        Some(url) => DatabaseUrl::parse_url(url)?,
        None => ServerConfig::from_env()?.database.url,
    };
    let database = Database::connect(&url, 1).await?;
    let members = database.members();

    let mut rng = rand::thread_rng();
    let mut created = 0_usize;

    for index in 0..args.count {
        let input = sample_member(index, &mut rng);
        match members.create(&input).await {
            Ok(member) => {
                info!(code = %member.member_code, name = %member.full_name, "Created member");
                created += 1;
            }
            Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                warn!(code = %input.member_code, "Member code already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let total = members.list().await?.len();
    info!("Successfully created {created} members");
    info!("Total members in database: {total}");
    Ok(())
}

fn sample_member<R: Rng>(index: usize, rng: &mut R) -> MemberInput {
    let base = SAMPLE_NAMES[index % SAMPLE_NAMES.len()];
    let round = index / SAMPLE_NAMES.len();
    let full_name = if round == 0 {
        base.to_owned()
    } else {
        format!("{base} {round}")
    };

    let gender = if rng.gen_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };

    MemberInput {
        member_code: format!("M{:03}", index + 1),
        full_name,
        phone: Some(format!("9{}", rng.gen_range(100_000_000..=999_999_999_u32))),
        gender: Some(gender),
        invited_by: Some(format!("Referral {}", rng.gen_range(1..=10))),
        ums_count: rng.gen_range(0..=50),
        balance: Money::from_minor(rng.gen_range(0..=1_000_i64) * 100),
        ..MemberInput::default()
    }
}
