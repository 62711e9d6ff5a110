// ABOUTME: Studio member record with plan, session and balance bookkeeping
// ABOUTME: Member, summary and detail views plus the create/replace payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::body_evaluation::BodyEvaluation;
use super::gender::Gender;
use super::membership::MembershipPlan;
use super::money::Money;
use super::numeric::{deserialize_optional_decimal, DecimalLimits};
use super::registration::Registration;
use crate::errors::{AppError, AppResult};

/// A studio member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Database identifier
    pub id: i64,
    /// Unique member code such as `M1718000000`
    pub member_code: String,
    /// Full name
    pub full_name: String,
    /// Contact phone, also used to match returning registrants
    pub phone: Option<String>,
    /// Gender
    pub gender: Option<Gender>,
    /// Who referred the member
    pub invited_by: Option<String>,
    /// Day the member registered
    pub registration_date: NaiveDate,
    /// Current plan
    pub membership: Option<MembershipPlan>,
    /// Sessions granted by the plan
    pub membership_total_sessions: u32,
    /// Sessions used so far
    pub ums_count: u32,
    /// Outstanding amount
    pub balance: Money,
    /// Amount paid to date
    pub total_paid: Money,
    /// Most recent recorded weight
    pub latest_weight: Option<f64>,
    /// Most recent recorded height
    pub latest_height: Option<f64>,
    /// Planned next checkup
    pub next_checkup_date: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Session usage label, `"{used} / {total}"`, or empty without a plan allowance
    #[must_use]
    pub fn membership_label(&self) -> String {
        if self.membership_total_sessions > 0 {
            format!("{} / {}", self.ums_count, self.membership_total_sessions)
        } else {
            String::new()
        }
    }
}

/// Compact member view used by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Database identifier
    pub id: i64,
    /// Unique member code
    pub member_code: String,
    /// Full name
    pub full_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Sessions used
    pub ums_count: u32,
    /// Outstanding amount
    pub balance: Money,
    /// Most recent weight
    pub latest_weight: Option<f64>,
    /// Most recent height
    pub latest_height: Option<f64>,
    /// Planned next checkup
    pub next_checkup_date: Option<NaiveDate>,
    /// Current plan
    pub membership: Option<MembershipPlan>,
    /// Sessions granted by the plan
    pub membership_total_sessions: u32,
    /// Session usage label
    pub membership_label: String,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            member_code: member.member_code.clone(),
            full_name: member.full_name.clone(),
            phone: member.phone.clone(),
            ums_count: member.ums_count,
            balance: member.balance,
            latest_weight: member.latest_weight,
            latest_height: member.latest_height,
            next_checkup_date: member.next_checkup_date,
            membership: member.membership,
            membership_total_sessions: member.membership_total_sessions,
            membership_label: member.membership_label(),
        }
    }
}

/// Full member view with onboarding survey and body evaluations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetail {
    /// Member record
    #[serde(flatten)]
    pub member: Member,
    /// Session usage label
    pub membership_label: String,
    /// Onboarding survey, if the member registered through it
    pub registration: Option<Registration>,
    /// Body evaluations, newest first
    pub body_evaluations: Vec<BodyEvaluation>,
}

impl MemberDetail {
    /// Assemble the detail view
    #[must_use]
    pub fn new(
        member: Member,
        registration: Option<Registration>,
        body_evaluations: Vec<BodyEvaluation>,
    ) -> Self {
        let membership_label = member.membership_label();
        Self {
            member,
            membership_label,
            registration,
            body_evaluations,
        }
    }
}

/// Payload for creating or fully replacing a member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberInput {
    /// Unique member code
    #[serde(default)]
    pub member_code: String,
    /// Full name
    #[serde(default)]
    pub full_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Gender
    pub gender: Option<Gender>,
    /// Referrer
    pub invited_by: Option<String>,
    /// Registration day, today when omitted
    pub registration_date: Option<NaiveDate>,
    /// Plan
    pub membership: Option<MembershipPlan>,
    /// Sessions granted
    #[serde(default)]
    pub membership_total_sessions: u32,
    /// Sessions used
    #[serde(default)]
    pub ums_count: u32,
    /// Outstanding amount
    #[serde(default)]
    pub balance: Money,
    /// Amount paid to date
    #[serde(default)]
    pub total_paid: Money,
    /// Latest weight
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub latest_weight: Option<f64>,
    /// Latest height
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub latest_height: Option<f64>,
    /// Planned next checkup
    pub next_checkup_date: Option<NaiveDate>,
}

impl MemberInput {
    /// Check required fields and measurement precision
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when the code or name is blank and
    /// `INVALID_INPUT` when a latest measurement does not fit its column.
    pub fn validate(&self) -> AppResult<()> {
        let mut missing = Vec::new();
        if self.member_code.trim().is_empty() {
            missing.push("member_code");
        }
        if self.full_name.trim().is_empty() {
            missing.push("full_name");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        DecimalLimits::MEASUREMENT.check("latest_weight", self.latest_weight)?;
        DecimalLimits::MEASUREMENT.check("latest_height", self.latest_height)
    }
}
