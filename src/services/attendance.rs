// ABOUTME: Desk attendance submission for one day across many members
// ABOUTME: Upserts attendance, counts sessions once per day and books cash payments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::Utc;

use super::{begin, commit};
use crate::constants::payment_methods;
use crate::database::{
    fetch_member, find_attendance, insert_attendance, insert_payment, save_member,
    update_attendance, Database, NewPayment,
};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AttendanceInput, AttendanceSubmission, Money, SubmissionSummary};

/// Record a day's attendance sheet
///
/// A member's session count goes up when they are marked present and were not
/// already counted present that day, so resubmitting a sheet is idempotent.
/// Positive amounts are booked as payments and reduce the member's balance.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for an unknown member; nothing from the batch
/// is written in that case
pub async fn submit(
    database: &Database,
    submission: &AttendanceSubmission,
) -> AppResult<SubmissionSummary> {
    let now = Utc::now();
    let date = submission.date.unwrap_or_else(|| now.date_naive());
    let mut total_received = Money::ZERO;

    let mut tx = begin(database.pool()).await?;

    for entry in &submission.entries {
        let mut member = fetch_member(&mut tx, entry.member_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member {}", entry.member_id)))?;

        let paid = entry.paid_amount.unwrap_or(Money::ZERO);
        let input = AttendanceInput {
            member_id: member.id,
            date,
            present: entry.present,
            paid_amount: paid,
            notes: entry.notes.clone(),
        };

        let already_counted = match find_attendance(&mut tx, member.id, date).await? {
            Some(existing) => {
                update_attendance(&mut tx, existing.id, &input, Some(now)).await?;
                existing.present
            }
            None => {
                insert_attendance(&mut tx, &input, Some(now)).await?;
                false
            }
        };

        if entry.present && !already_counted {
            member.ums_count = member.ums_count.saturating_add(1);
        }

        if paid.is_positive() {
            let method = entry
                .method
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(payment_methods::CASH);
            insert_payment(
                &mut tx,
                NewPayment {
                    member_id: member.id,
                    amount: paid,
                    date,
                    method: Some(method),
                    notes: entry.notes.as_deref(),
                },
            )
            .await?;
            member.balance -= paid;
            member.total_paid += paid;
            total_received += paid;
        }

        save_member(&mut tx, &member).await?;
    }

    commit(tx).await?;

    let submitted = submission.entries.len();
    AppLogger::log_attendance_submission(
        &date.to_string(),
        submitted,
        &total_received.to_string(),
    );
    Ok(SubmissionSummary::ok(submitted, total_received))
}
