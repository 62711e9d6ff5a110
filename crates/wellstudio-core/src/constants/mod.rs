// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Membership plan terms, payment methods and checkup tracking constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Constants module
//!
//! Application constants grouped by domain.

/// Membership plan terms (session allowances and prices in hundredths)
pub mod membership;

/// Payment method labels written by the workflows
pub mod payment_methods {
    /// Default method for attendance desk payments
    pub const CASH: &str = "cash";
    /// Method used for the amount collected during onboarding
    pub const REGISTRATION: &str = "registration";
    /// Note attached to the onboarding payment
    pub const REGISTRATION_NOTE: &str = "Initial amount paid at registration";
}

/// Weekly body checkup tracking
pub mod checkups {
    /// Number of weekly checkups tracked after registration
    pub const TRACKED_WEEKS: u8 = 16;
    /// Length of a tracking week in days
    pub const DAYS_PER_WEEK: i64 = 7;
}

/// Member code generation
pub mod member_codes {
    /// Prefix for every generated member code
    pub const PREFIX: &str = "M";
}
