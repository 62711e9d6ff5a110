// ABOUTME: Criterion benchmarks for body composition analysis and desk workflows
// ABOUTME: Measures the analyzer, checkup week bucketing and attendance submission throughput
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Criterion benchmarks for the analysis crate and the attendance workflow.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokio::runtime::Runtime;
use wellstudio_analysis::{analyze_measurements, week_number, SubjectProfile};
use wellstudio_server::database::Database;
use wellstudio_server::models::{
    AttendanceEntry, AttendanceSubmission, BodyMeasurements, Gender, MemberInput, Money,
};
use wellstudio_server::services::attendance::submit;

/// Deterministic spread of readings covering both sides of the healthy band
fn generate_measurements(count: usize) -> Vec<(BodyMeasurements, SubjectProfile)> {
    (0..count)
        .map(|index| {
            let gender = match index % 3 {
                0 => Gender::Male,
                1 => Gender::Female,
                _ => Gender::Other,
            };
            let body_fat = Some(12.0 + (index % 30) as f64);
            let skeletal = Some(22.0 + (index % 15) as f64);
            let (men, women) = match gender {
                Gender::Female => ((None, None), (body_fat, skeletal)),
                _ => ((body_fat, skeletal), (None, None)),
            };
            let measurements = BodyMeasurements {
                height_cm: 145.0 + (index % 45) as f64,
                weight_kg: 48.0 + (index % 60) as f64 * 0.9,
                visceral_fat: 4.0 + (index % 18) as f64,
                trunk_subcutaneous_fat: Some(10.0 + (index % 25) as f64),
                body_fat_men: men.0,
                body_fat_women: women.0,
                body_age: Some(20.0 + (index % 50) as f64),
                bmi: Some(18.0 + (index % 20) as f64),
                bmr_rm: Some(1200.0 + (index % 600) as f64),
                skeletal_muscle_men: men.1,
                skeletal_muscle_women: women.1,
            };
            let subject = SubjectProfile {
                gender,
                age: 18 + (index % 50) as u32,
            };
            (measurements, subject)
        })
        .collect()
}

fn bench_body_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_analysis");

    for count in [1_usize, 100, 1_000] {
        let readings = generate_measurements(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze_measurements", count),
            &readings,
            |b, readings| {
                b.iter(|| {
                    black_box(readings)
                        .iter()
                        .map(|(measurements, subject)| {
                            analyze_measurements(measurements, *subject).fluids
                        })
                        .sum::<f64>()
                });
            },
        );
    }

    group.finish();
}

fn bench_week_bucketing(c: &mut Criterion) {
    let registered = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default();
    let dates: Vec<NaiveDate> = (0..200_u64)
        .filter_map(|offset| registered.checked_add_days(Days::new(offset)))
        .collect();

    c.bench_function("week_number_200_days", |b| {
        b.iter(|| {
            black_box(&dates)
                .iter()
                .filter_map(|date| week_number(registered, *date))
                .count()
        });
    });
}

fn bench_attendance_submission(c: &mut Criterion) {
    let Ok(runtime) = Runtime::new() else {
        return;
    };
    let setup = runtime.block_on(async {
        let database = Database::new("sqlite::memory:").await.ok()?;
        let mut ids = Vec::new();
        for index in 0..25 {
            let input = MemberInput {
                member_code: format!("B{index:03}"),
                full_name: format!("Bench Member {index}"),
                ..MemberInput::default()
            };
            ids.push(database.members().create(&input).await.ok()?.id);
        }
        Some((database, ids))
    });
    let Some((database, ids)) = setup else {
        return;
    };

    let mut group = c.benchmark_group("attendance_submission");
    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function("submit_25_members", |b| {
        b.to_async(&runtime).iter(|| async {
            let submission = AttendanceSubmission {
                date: NaiveDate::from_ymd_opt(2025, 3, 10),
                entries: ids
                    .iter()
                    .map(|id| AttendanceEntry {
                        member_id: *id,
                        present: true,
                        paid_amount: Some(Money::from_minor(10_000)),
                        method: None,
                        notes: None,
                    })
                    .collect(),
            };
            black_box(submit(&database, &submission).await.is_ok())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_body_analysis,
    bench_week_bucketing,
    bench_attendance_submission,
);
criterion_main!(benches);
