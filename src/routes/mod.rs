// ABOUTME: Route module organization for the studio HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers over services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Route module
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the database managers or the service layer.

/// Attendance CRUD and desk submission routes
pub mod attendance;
/// Weekly body checkup sheet routes
pub mod body_checkup;
/// Checkup CRUD routes
pub mod checkups;
/// Dashboard statistics and daily report routes
pub mod dashboard;
/// Health check routes
pub mod health;
/// Member routes
pub mod members;
/// Payment CRUD routes
pub mod payments;
/// Guest registration routes
pub mod registrations;

pub use attendance::AttendanceRoutes;
pub use body_checkup::BodyCheckupRoutes;
pub use checkups::CheckupRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use members::MemberRoutes;
pub use payments::PaymentRoutes;
pub use registrations::RegistrationRoutes;
