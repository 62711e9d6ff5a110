// ABOUTME: Weekly body checkup sheet for the sixteen weeks after registration
// ABOUTME: Buckets stored checkups into weeks, prefills week 1 and saves edited weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wellstudio_analysis::{week_number, week_start, WeeklyMeasurements};

use super::{begin, commit};
use crate::database::{
    acquire, fetch_member, fetch_member_registration, find_checkup_on, insert_checkup,
    latest_evaluation, list_member_checkups, save_member, update_checkup, Database,
};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{parse_decimal, CheckupInput, DecimalLimits, Member};

/// Member header shown above the sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetMember {
    /// Member id
    pub id: i64,
    /// Full name
    pub full_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Anchor of the weekly timeline
    pub registration_date: NaiveDate,
    /// Referrer, empty when unknown
    pub invited_by: String,
    /// Gender, empty when unknown
    pub gender: String,
}

impl From<&Member> for SheetMember {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name.clone(),
            phone: member.phone.clone(),
            registration_date: member.registration_date,
            invited_by: member.invited_by.clone().unwrap_or_default(),
            gender: member
                .gender
                .map(|g| g.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}

/// One week of the sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekEntry {
    /// Day the week's measurements were (or will be) taken
    pub date: NaiveDate,
    /// Measurements
    pub data: WeeklyMeasurements,
}

/// The sixteen week checkup sheet of a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckupSheet {
    /// Member header
    pub member: SheetMember,
    /// Filled weeks keyed by week number
    pub weeks: BTreeMap<u8, WeekEntry>,
    /// Weeks that can no longer be edited, ascending
    pub locked_weeks: Vec<u8>,
}

/// One edited week as posted by the sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekSubmission {
    /// Week number
    pub week: Option<i64>,
    /// Explicit ISO date overriding the week's start date
    pub date: Option<String>,
    /// Measurements
    pub data: Option<Value>,
}

/// Sheet save request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckupSaveRequest {
    /// Edited weeks
    #[serde(default)]
    pub checkup_data: Vec<WeekSubmission>,
}

/// Sheet save result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckupSaveResult {
    /// Always `"success"`
    pub status: String,
    /// Human readable confirmation
    pub message: String,
    /// Weeks written
    pub saved: usize,
}

/// Build the checkup sheet of a member
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for an unknown member
pub async fn load_sheet(database: &Database, member_id: i64) -> AppResult<CheckupSheet> {
    let mut conn = acquire(database.pool()).await?;
    let member = fetch_member(&mut conn, member_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {member_id}")))?;
    let registered = member.registration_date;

    let mut weeks = BTreeMap::new();
    let mut locked: BTreeSet<u8> = BTreeSet::from([1]);

    for checkup in list_member_checkups(&mut conn, member_id).await? {
        let Some(week) = week_number(registered, checkup.checkup_date) else {
            continue;
        };
        locked.insert(week);
        weeks.insert(
            week,
            WeekEntry {
                date: checkup.checkup_date,
                data: WeeklyMeasurements::from_checkup(
                    checkup.height,
                    checkup.weight,
                    checkup.category_data.as_ref(),
                ),
            },
        );
    }

    if !weeks.contains_key(&1) {
        let registration = fetch_member_registration(&mut conn, member_id).await?;
        let evaluation = latest_evaluation(&mut conn, member_id).await?;
        weeks.insert(
            1,
            WeekEntry {
                date: registered,
                data: WeeklyMeasurements::baseline(
                    registration.map(|r| r.age),
                    evaluation.as_ref().map(|e| &e.measurements),
                ),
            },
        );
    }

    Ok(CheckupSheet {
        member: SheetMember::from(&member),
        weeks,
        locked_weeks: locked.into_iter().collect(),
    })
}

/// Save edited weeks of a member's sheet
///
/// Each week is stored as one checkup keyed by member and date. Weeks without
/// a number or without data are ignored.
///
/// # Errors
///
/// Returns `INVALID_INPUT` for an empty request, `INVALID_FORMAT` for an
/// unparseable date or number, and `RESOURCE_NOT_FOUND` for an unknown
/// member; nothing is written on error
pub async fn save_sheet(
    database: &Database,
    member_id: i64,
    request: &CheckupSaveRequest,
) -> AppResult<CheckupSaveResult> {
    if request.checkup_data.is_empty() {
        return Err(AppError::invalid_input("No checkup data provided"));
    }

    let mut tx = begin(database.pool()).await?;
    let mut member = fetch_member(&mut tx, member_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {member_id}")))?;

    let mut saved = 0;
    for entry in &request.checkup_data {
        let Some(week) = entry.week.filter(|w| *w != 0) else {
            continue;
        };
        let Some(data) = entry.data.as_ref().filter(|d| has_content(d)) else {
            continue;
        };
        let sheet: WeeklyMeasurements = serde_json::from_value(data.clone())
            .map_err(|e| AppError::invalid_format(format!("Invalid data for week {week}: {e}")))?;

        let date = match entry.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(text) => parse_iso_date(text)?,
            None => week_start(member.registration_date, week_index(week)?).ok_or_else(|| {
                AppError::invalid_input(format!("Week {week} is outside the calendar"))
            })?,
        };

        let weight = parse_reading("weight", &sheet.weight)?;
        let height = parse_reading("height", &sheet.height)?;

        let mut input = CheckupInput {
            member_id,
            checkup_date: Some(date),
            weight,
            height,
            category_data: Some(sheet.category_data()),
            notes: None,
        };
        match find_checkup_on(&mut tx, member_id, date).await? {
            Some(existing) => {
                input.notes = existing.notes;
                update_checkup(&mut tx, existing.id, &input, date).await?;
            }
            None => {
                insert_checkup(&mut tx, &input, date).await?;
            }
        }

        if weight.is_some() {
            member.latest_weight = weight;
        }
        if height.is_some() {
            member.latest_height = height;
        }
        saved += 1;
    }

    save_member(&mut tx, &member).await?;
    commit(tx).await?;
    AppLogger::log_checkups_saved(member_id, saved);

    Ok(CheckupSaveResult {
        status: "success".to_owned(),
        message: "Checkup data saved successfully".to_owned(),
        saved,
    })
}

fn has_content(data: &Value) -> bool {
    match data {
        Value::Object(map) => !map.is_empty(),
        Value::Null => false,
        _ => true,
    }
}

fn week_index(week: i64) -> AppResult<u8> {
    u8::try_from(week)
        .map_err(|_| AppError::invalid_input(format!("Week {week} is not a valid week number")))
}

fn parse_reading(field: &str, text: &str) -> AppResult<Option<f64>> {
    let value = parse_decimal(text)
        .map_err(|e| AppError::invalid_format(format!("Invalid {field}: {e}")))?;
    DecimalLimits::MEASUREMENT.check(field, value)?;
    Ok(value)
}

/// Accept `YYYY-MM-DD` as well as full ISO date-times
fn parse_iso_date(text: &str) -> AppResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|datetime| datetime.date())
        .map_err(|_| AppError::invalid_format(format!("Invalid checkup date: {text}")))
}
