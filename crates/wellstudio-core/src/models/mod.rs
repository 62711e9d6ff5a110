// ABOUTME: Core data models for the Wellstudio membership backend
// ABOUTME: Re-exports Member, Attendance, Payment, Checkup, Registration and BodyEvaluation records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! # Data Models
//!
//! Records persisted by the studio backend together with the input payloads
//! accepted by its HTTP surface. Input types own their validation so that the
//! persistence layer only ever receives well-formed values.
//!
//! ## Core Models
//!
//! - `Member`: A studio member with plan, session and balance bookkeeping
//! - `Attendance`: Daily presence and desk payment per member
//! - `Payment`: Money received from a member
//! - `Checkup`: Weekly measurement snapshot
//! - `Registration`: Onboarding survey, one per member
//! - `BodyEvaluation`: Body composition measurements and their analysis

// Domain modules
mod attendance;
mod body_evaluation;
mod checkup;
mod gender;
mod member;
mod membership;
mod money;
mod numeric;
mod payment;
mod registration;

// Re-export all public types for convenience
pub use attendance::{
    Attendance, AttendanceEntry, AttendanceInput, AttendanceSubmission, SubmissionSummary,
};
pub use body_evaluation::{BodyEvaluation, BodyEvaluationInput, BodyMeasurements};
pub use checkup::{Checkup, CheckupInput};
pub use gender::Gender;
pub use member::{Member, MemberDetail, MemberInput, MemberSummary};
pub use membership::{MembershipPlan, PlanTerms};
pub use money::Money;
pub use numeric::{deserialize_optional_decimal, parse_decimal, DecimalLimits};
pub use payment::{Payment, PaymentInput};
pub use registration::{Registration, RegistrationForm, RegistrationInput};
