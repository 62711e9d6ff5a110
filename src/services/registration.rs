// ABOUTME: Guest registration workflow creating or updating a member with survey and evaluation
// ABOUTME: Resolves plan terms, books the initial payment and runs the body composition analyzer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use wellstudio_analysis::{analyze_measurements, SubjectProfile};

use super::{begin, commit};
use crate::constants::{member_codes, payment_methods};
use crate::database::{
    fetch_member, fetch_member_registration, find_member_by_phone, insert_evaluation,
    insert_member, insert_payment, insert_registration, member_code_exists, record_analysis,
    save_member, update_registration, Database, NewPayment,
};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    BodyEvaluation, BodyEvaluationInput, Member, MemberDetail, MemberInput, PlanTerms,
    Registration, RegistrationForm, RegistrationInput,
};

/// Highest numeric suffix tried when the timestamp code is already taken
const MAX_CODE_SUFFIX: u32 = 1_000;

/// Registration form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Survey answers and plan choice
    pub registration: Option<RegistrationInput>,
    /// Readings taken during onboarding
    pub body_evaluation: Option<BodyEvaluationInput>,
}

/// Records written by a registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    /// Member detail view after the registration
    pub member: MemberDetail,
    /// Stored survey
    pub registration: Registration,
    /// Stored evaluation with its analysis
    pub body_evaluation: BodyEvaluation,
}

/// Register a guest, or re-register a returning member matched by phone
///
/// Every write happens in one transaction; any failure leaves the database
/// untouched.
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` or `INVALID_INPUT` for incomplete or
/// inconsistent forms, and database errors from the underlying writes
pub async fn register(
    database: &Database,
    request: &RegistrationRequest,
) -> AppResult<RegistrationOutcome> {
    let (Some(registration), Some(evaluation)) =
        (&request.registration, &request.body_evaluation)
    else {
        let missing: Vec<&str> = [
            ("registration", request.registration.is_none()),
            ("body_evaluation", request.body_evaluation.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();
        return Err(AppError::missing_fields(&missing));
    };

    let form = registration.validate()?;
    let measurements = evaluation.validate(form.gender)?;
    let terms = form.plan_terms();
    let now = Utc::now();
    let today = now.date_naive();
    let started = Instant::now();

    let mut tx = begin(database.pool()).await?;

    let (mut member, created) = upsert_member(&mut tx, &form, terms, now).await?;
    let registration_id = upsert_registration(&mut tx, member.id, &form, terms).await?;

    member.total_paid += form.initial_amount_paid;
    member.balance = terms.total_amount - member.total_paid;

    let evaluation_date = evaluation.date.unwrap_or(today);
    let evaluation_id = insert_evaluation(
        &mut tx,
        member.id,
        evaluation_date,
        &measurements,
        evaluation.notes.as_deref(),
    )
    .await?;

    let analysis = analyze_measurements(
        &measurements,
        SubjectProfile {
            gender: form.gender,
            age: form.age,
        },
    );
    record_analysis(
        &mut tx,
        evaluation_id,
        analysis.fat.recorded_value(),
        analysis.fluids,
        &serde_json::to_value(&analysis.data)?,
    )
    .await?;

    member.latest_weight = Some(measurements.weight_kg);
    member.latest_height = Some(measurements.height_cm);
    save_member(&mut tx, &member).await?;

    if form.initial_amount_paid.is_positive() {
        insert_payment(
            &mut tx,
            NewPayment {
                member_id: member.id,
                amount: form.initial_amount_paid,
                date: today,
                method: Some(payment_methods::REGISTRATION),
                notes: Some(payment_methods::REGISTRATION_NOTE),
            },
        )
        .await?;
    }

    commit(tx).await?;
    AppLogger::log_database_operation(
        "register",
        "members",
        true,
        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    );
    AppLogger::log_registration(
        member.id,
        &member.member_code,
        created,
        &form.initial_amount_paid.to_string(),
    );
    AppLogger::log_body_analysis(
        member.id,
        analysis.fat.status(),
        analysis.fat.recorded_value(),
        analysis.fluids,
    );

    let detail = database
        .members()
        .get_detail(member.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", member.id)))?;
    let registration = database
        .registrations()
        .get(registration_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Registration {registration_id}")))?;
    let body_evaluation = database
        .evaluations()
        .get(evaluation_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Body evaluation {evaluation_id}")))?;

    Ok(RegistrationOutcome {
        member: detail,
        registration,
        body_evaluation,
    })
}

/// Match the registrant by phone, creating a member when none exists
async fn upsert_member(
    conn: &mut SqliteConnection,
    form: &RegistrationForm,
    terms: PlanTerms,
    now: DateTime<Utc>,
) -> AppResult<(Member, bool)> {
    if let Some(mut member) = find_member_by_phone(conn, &form.mobile_number).await? {
        member.gender = Some(form.gender);
        member.invited_by = Some(form.invited_by.clone());
        member.membership = Some(form.membership);
        member.membership_total_sessions = terms.total_sessions;
        if member.ums_count == 0 {
            member.ums_count = 1;
        }
        return Ok((member, false));
    }

    let input = MemberInput {
        member_code: allocate_member_code(conn, now).await?,
        full_name: form.guest_name.clone(),
        phone: Some(form.mobile_number.clone()),
        gender: Some(form.gender),
        invited_by: Some(form.invited_by.clone()),
        membership: Some(form.membership),
        membership_total_sessions: terms.total_sessions,
        ums_count: 1,
        ..MemberInput::default()
    };
    let registration_date: NaiveDate = now.date_naive();
    let id = insert_member(conn, &input, registration_date).await?;
    let member = fetch_member(conn, id)
        .await?
        .ok_or_else(|| AppError::internal("Inserted member could not be read back"))?;
    Ok((member, true))
}

async fn upsert_registration(
    conn: &mut SqliteConnection,
    member_id: i64,
    form: &RegistrationForm,
    terms: PlanTerms,
) -> AppResult<i64> {
    if let Some(existing) = fetch_member_registration(conn, member_id).await? {
        update_registration(conn, existing.id, form, terms.total_amount).await?;
        return Ok(existing.id);
    }
    insert_registration(conn, member_id, form, terms.total_amount).await
}

/// `M{unix seconds}`, suffixed with `-N` when that code is taken
async fn allocate_member_code(conn: &mut SqliteConnection, now: DateTime<Utc>) -> AppResult<String> {
    let base = format!("{}{}", member_codes::PREFIX, now.timestamp());
    if !member_code_exists(conn, &base).await? {
        return Ok(base);
    }
    for suffix in 1..=MAX_CODE_SUFFIX {
        let candidate = format!("{base}-{suffix}");
        if !member_code_exists(conn, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::internal(format!(
        "Could not allocate a unique member code from {base}"
    )))
}
