// ABOUTME: Membership plans offered by the studio and the terms they grant
// ABOUTME: Resolves session allowance and plan price for fixed and custom plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::constants::membership::{
    COMPLEMENT_PRICE_MINOR, COMPLEMENT_SESSIONS, TRIAL_PRICE_MINOR, TRIAL_SESSIONS,
    UMS_PRICE_MINOR, UMS_SESSIONS,
};

/// Membership plan chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipPlan {
    /// Three-session trial
    Trial,
    /// Unlimited monthly sessions
    Ums,
    /// Complimentary single session
    Complement,
    /// Custom plan with operator-supplied day count and price
    Others,
}

/// Session allowance and total price of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTerms {
    /// Sessions the member may attend
    pub total_sessions: u32,
    /// Total amount payable for the plan
    pub total_amount: Money,
}

impl MembershipPlan {
    /// Canonical string stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "TRIAL",
            Self::Ums => "UMS",
            Self::Complement => "COMPLEMENT",
            Self::Others => "OTHERS",
        }
    }

    /// Parse a plan code, case-insensitive
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRIAL" => Some(Self::Trial),
            "UMS" => Some(Self::Ums),
            "COMPLEMENT" => Some(Self::Complement),
            "OTHERS" => Some(Self::Others),
            _ => None,
        }
    }

    /// Human readable plan name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Trial => "Trial",
            Self::Ums => "UMS",
            Self::Complement => "Complement",
            Self::Others => "Others",
        }
    }

    /// Resolve the plan terms
    ///
    /// Fixed plans ignore the custom arguments. `Others` takes its session
    /// count from `number_of_days` and its price from `custom_total`, both
    /// defaulting to zero.
    #[must_use]
    pub fn terms(self, number_of_days: Option<u32>, custom_total: Option<Money>) -> PlanTerms {
        match self {
            Self::Trial => PlanTerms {
                total_sessions: TRIAL_SESSIONS,
                total_amount: Money::from_minor(TRIAL_PRICE_MINOR),
            },
            Self::Ums => PlanTerms {
                total_sessions: UMS_SESSIONS,
                total_amount: Money::from_minor(UMS_PRICE_MINOR),
            },
            Self::Complement => PlanTerms {
                total_sessions: COMPLEMENT_SESSIONS,
                total_amount: Money::from_minor(COMPLEMENT_PRICE_MINOR),
            },
            Self::Others => PlanTerms {
                total_sessions: number_of_days.unwrap_or(0),
                total_amount: custom_total.unwrap_or(Money::ZERO),
            },
        }
    }
}

impl fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_plan_terms() {
        let trial = MembershipPlan::Trial.terms(Some(99), Some(Money::from_minor(1)));
        assert_eq!(trial.total_sessions, 3);
        assert_eq!(trial.total_amount, Money::from_minor(70_000));

        let ums = MembershipPlan::Ums.terms(None, None);
        assert_eq!(ums.total_sessions, 26);
        assert_eq!(ums.total_amount.to_string(), "5400.00");

        let complement = MembershipPlan::Complement.terms(None, None);
        assert_eq!(complement.total_sessions, 1);
        assert_eq!(complement.total_amount, Money::ZERO);
    }

    #[test]
    fn test_custom_plan_terms() {
        let terms = MembershipPlan::Others.terms(Some(12), Money::parse("2500"));
        assert_eq!(terms.total_sessions, 12);
        assert_eq!(terms.total_amount, Money::from_minor(250_000));
        assert_eq!(MembershipPlan::Others.terms(None, None).total_amount, Money::ZERO);
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!(MembershipPlan::parse("ums"), Some(MembershipPlan::Ums));
        assert_eq!(MembershipPlan::parse("GOLD"), None);
        assert_eq!(
            serde_json::to_string(&MembershipPlan::Complement).unwrap(),
            "\"COMPLEMENT\""
        );
    }
}
