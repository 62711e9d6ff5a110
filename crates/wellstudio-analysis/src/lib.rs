// ABOUTME: Body composition analysis engine for the Wellstudio platform
// ABOUTME: Pure calculators for registration-time analysis and weekly checkup tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![deny(unsafe_code)]

//! # Wellstudio Analysis
//!
//! Stateless, synchronous calculators. Nothing here touches the database or
//! performs I/O, so every function can be called from request handlers,
//! batch jobs and benchmarks alike.

/// Body composition analyzer (targets, rounding, fat and fluid estimates)
pub mod body_composition;

/// Weekly checkup timeline and measurement sheets
pub mod checkup_timeline;

pub use body_composition::{
    analyze, analyze_measurements, round_tenth, AnalysisData, BodyAnalysis, BodyCompositionInput,
    CompositionTargets, FatMass, FatOutcome, SubjectProfile,
};
pub use checkup_timeline::{week_number, week_start, WeeklyMeasurements};
