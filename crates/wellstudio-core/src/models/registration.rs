// ABOUTME: Onboarding survey captured when a guest registers as a member
// ABOUTME: Raw input, validated form and persisted registration record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::gender::Gender;
use super::membership::{MembershipPlan, PlanTerms};
use super::money::Money;
use crate::errors::{AppError, AppResult};

/// Persisted onboarding survey, one per member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Database identifier
    pub id: i64,
    /// Linked member
    pub member_id: Option<i64>,
    /// Guest name as written on the form
    pub guest_name: String,
    /// Mobile number, used to find returning members
    pub mobile_number: String,
    /// Referrer
    pub invited_by: String,
    /// Gender
    pub gender: Gender,
    /// Plan chosen
    pub membership: MembershipPlan,
    /// Occupation
    pub occupation: String,
    /// Age in years
    pub age: u32,
    /// Location
    pub location: Option<String>,
    /// Current exercise habit
    pub do_you_exercise: String,
    /// Hours of sleep
    pub hours_sleep: String,
    /// Litres of water per day
    pub liters_water: String,
    /// Loss of energy during the day
    pub loss_of_energy: String,
    /// Dietary preference
    pub veg_nonveg: Option<String>,
    /// Health history answers
    pub personal_health_history: Option<Value>,
    /// Transformation goals
    pub transformation_targets: String,
    /// Whether diet programs were tried before
    pub tried_diet_programs: bool,
    /// Staff member who ran the survey
    pub surveyed_by: String,
    /// Preferred training time
    pub available_time: String,
    /// Day count for custom plans
    pub number_of_days: Option<u32>,
    /// Total payable for the plan
    pub plan_total_amount: Money,
    /// Amount collected at registration
    pub initial_amount_paid: Money,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Survey payload as submitted by the front desk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationInput {
    /// Guest name
    pub guest_name: Option<String>,
    /// Mobile number
    pub mobile_number: Option<String>,
    /// Referrer
    pub invited_by: Option<String>,
    /// Gender text
    pub gender: Option<String>,
    /// Plan code
    pub membership: Option<String>,
    /// Occupation
    pub occupation: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Location
    pub location: Option<String>,
    /// Exercise habit
    pub do_you_exercise: Option<String>,
    /// Hours of sleep
    pub hours_sleep: Option<String>,
    /// Litres of water
    pub liters_water: Option<String>,
    /// Loss of energy
    pub loss_of_energy: Option<String>,
    /// Dietary preference
    pub veg_nonveg: Option<String>,
    /// Health history answers
    pub personal_health_history: Option<Value>,
    /// Transformation goals
    pub transformation_targets: Option<String>,
    /// Diet programs tried
    #[serde(default)]
    pub tried_diet_programs: bool,
    /// Surveying staff member
    pub surveyed_by: Option<String>,
    /// Preferred training time
    pub available_time: Option<String>,
    /// Day count for custom plans
    pub number_of_days: Option<i64>,
    /// Custom plan price
    pub plan_total_amount: Option<Money>,
    /// Amount collected now
    pub initial_amount_paid: Option<Money>,
}

/// Registration survey that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    /// Guest name
    pub guest_name: String,
    /// Mobile number
    pub mobile_number: String,
    /// Referrer
    pub invited_by: String,
    /// Gender
    pub gender: Gender,
    /// Plan
    pub membership: MembershipPlan,
    /// Occupation
    pub occupation: String,
    /// Age in years
    pub age: u32,
    /// Location
    pub location: Option<String>,
    /// Exercise habit
    pub do_you_exercise: String,
    /// Hours of sleep
    pub hours_sleep: String,
    /// Litres of water
    pub liters_water: String,
    /// Loss of energy
    pub loss_of_energy: String,
    /// Dietary preference
    pub veg_nonveg: Option<String>,
    /// Health history answers
    pub personal_health_history: Option<Value>,
    /// Transformation goals
    pub transformation_targets: String,
    /// Diet programs tried
    pub tried_diet_programs: bool,
    /// Surveying staff member
    pub surveyed_by: String,
    /// Preferred training time
    pub available_time: String,
    /// Day count for custom plans
    pub number_of_days: Option<u32>,
    /// Custom plan price as submitted
    pub plan_total_amount: Option<Money>,
    /// Amount collected now
    pub initial_amount_paid: Money,
}

fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl RegistrationInput {
    /// Names of required fields that are absent or blank, in form order
    ///
    /// An age of zero counts as missing.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let filled = |value: &Option<String>| present(value.as_ref()).is_some();
        let checks: [(&'static str, bool); 14] = [
            ("guest_name", filled(&self.guest_name)),
            ("mobile_number", filled(&self.mobile_number)),
            ("invited_by", filled(&self.invited_by)),
            ("gender", filled(&self.gender)),
            ("membership", filled(&self.membership)),
            ("occupation", filled(&self.occupation)),
            ("age", self.age.unwrap_or(0) != 0),
            ("do_you_exercise", filled(&self.do_you_exercise)),
            ("hours_sleep", filled(&self.hours_sleep)),
            ("liters_water", filled(&self.liters_water)),
            ("loss_of_energy", filled(&self.loss_of_energy)),
            ("transformation_targets", filled(&self.transformation_targets)),
            ("surveyed_by", filled(&self.surveyed_by)),
            ("available_time", filled(&self.available_time)),
        ];
        checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Validate the survey and resolve typed values
    ///
    /// # Errors
    ///
    /// - `MISSING_REQUIRED_FIELD` with `details.missing_fields` for blank required fields
    /// - `INVALID_INPUT` for an unknown plan, a negative age or amount, or a custom
    ///   plan without a positive `number_of_days`
    pub fn validate(&self) -> AppResult<RegistrationForm> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let membership_text = self.membership.as_deref().unwrap_or_default();
        let membership = MembershipPlan::parse(membership_text).ok_or_else(|| {
            AppError::invalid_input(format!(
                "\"{}\" is not a valid membership",
                membership_text.trim()
            ))
            .with_details(json!({ "membership": membership_text.trim() }))
        })?;

        let age = u32::try_from(self.age.unwrap_or(0))
            .map_err(|_| AppError::invalid_input("age must be a positive number of years"))?;

        let number_of_days = match (membership, self.number_of_days) {
            (MembershipPlan::Others, None | Some(0)) => {
                return Err(AppError::invalid_input(
                    "Number of days is required when membership is 'Others'",
                )
                .with_details(json!({ "field": "number_of_days" })));
            }
            (_, Some(days)) => Some(u32::try_from(days).map_err(|_| {
                AppError::invalid_input("Number of days must be greater than 0")
                    .with_details(json!({ "field": "number_of_days" }))
            })?),
            (_, None) => None,
        };

        let initial_amount_paid = self.initial_amount_paid.unwrap_or(Money::ZERO);
        if initial_amount_paid < Money::ZERO {
            return Err(AppError::invalid_input(
                "initial_amount_paid cannot be negative",
            ));
        }

        Ok(RegistrationForm {
            guest_name: present(self.guest_name.as_ref()).unwrap_or_default(),
            mobile_number: present(self.mobile_number.as_ref()).unwrap_or_default(),
            invited_by: present(self.invited_by.as_ref()).unwrap_or_default(),
            gender: Gender::from_str_lossy(self.gender.as_deref().unwrap_or_default()),
            membership,
            occupation: present(self.occupation.as_ref()).unwrap_or_default(),
            age,
            location: present(self.location.as_ref()),
            do_you_exercise: present(self.do_you_exercise.as_ref()).unwrap_or_default(),
            hours_sleep: present(self.hours_sleep.as_ref()).unwrap_or_default(),
            liters_water: present(self.liters_water.as_ref()).unwrap_or_default(),
            loss_of_energy: present(self.loss_of_energy.as_ref()).unwrap_or_default(),
            veg_nonveg: present(self.veg_nonveg.as_ref()),
            personal_health_history: self.personal_health_history.clone(),
            transformation_targets: present(self.transformation_targets.as_ref())
                .unwrap_or_default(),
            tried_diet_programs: self.tried_diet_programs,
            surveyed_by: present(self.surveyed_by.as_ref()).unwrap_or_default(),
            available_time: present(self.available_time.as_ref()).unwrap_or_default(),
            number_of_days,
            plan_total_amount: self.plan_total_amount,
            initial_amount_paid,
        })
    }
}

impl RegistrationForm {
    /// Session allowance and price for the chosen plan
    #[must_use]
    pub fn plan_terms(&self) -> PlanTerms {
        self.membership
            .terms(self.number_of_days, self.plan_total_amount)
    }
}
