// ABOUTME: Membership plan terms for the fixed-price studio plans
// ABOUTME: Session allowances and plan prices expressed in hundredths of the currency unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

/// Sessions included in the trial plan
pub const TRIAL_SESSIONS: u32 = 3;

/// Trial plan price (700.00)
pub const TRIAL_PRICE_MINOR: i64 = 70_000;

/// Sessions included in the unlimited monthly sessions plan
pub const UMS_SESSIONS: u32 = 26;

/// UMS plan price (5400.00)
pub const UMS_PRICE_MINOR: i64 = 540_000;

/// Sessions included in a complimentary pass
pub const COMPLEMENT_SESSIONS: u32 = 1;

/// Complimentary passes are free
pub const COMPLEMENT_PRICE_MINOR: i64 = 0;
