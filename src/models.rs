// ABOUTME: Domain models for members, attendance, payments, checkups and registrations
// ABOUTME: Re-exported from wellstudio-core for use across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Data Models
//!
//! Records mirror the database tables one to one. Input payloads are separate
//! types so that partially filled forms can be deserialized and then validated.

pub use wellstudio_core::models::{
    deserialize_optional_decimal, parse_decimal, Attendance, AttendanceEntry, AttendanceInput,
    AttendanceSubmission, BodyEvaluation, BodyEvaluationInput, BodyMeasurements, Checkup,
    CheckupInput, DecimalLimits, Gender, Member, MemberDetail, MemberInput, MemberSummary,
    MembershipPlan, Money, Payment, PaymentInput, PlanTerms, Registration, RegistrationForm,
    RegistrationInput, SubmissionSummary,
};
