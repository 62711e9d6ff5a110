// ABOUTME: Weekly checkup timeline anchored on the registration date
// ABOUTME: Week bucketing, week start dates and the free-text weekly measurement sheet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Members are measured once a week for the first sixteen weeks after they
//! register. Week 1 starts on the registration date; a checkup on day `d`
//! after registration belongs to week `d / 7 + 1`.

use chrono::{Days, NaiveDate};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wellstudio_core::constants::checkups::{DAYS_PER_WEEK, TRACKED_WEEKS};
use wellstudio_core::models::BodyMeasurements;

/// Week a checkup falls into, or `None` outside the tracked weeks
#[must_use]
pub fn week_number(registration_date: NaiveDate, checkup_date: NaiveDate) -> Option<u8> {
    let days = checkup_date
        .signed_duration_since(registration_date)
        .num_days();
    let week = days.div_euclid(DAYS_PER_WEEK) + 1;
    if (1..=i64::from(TRACKED_WEEKS)).contains(&week) {
        u8::try_from(week).ok()
    } else {
        None
    }
}

/// First day of a week; `None` for week 0
#[must_use]
pub fn week_start(registration_date: NaiveDate, week: u8) -> Option<NaiveDate> {
    let offset = u64::from(week.checked_sub(1)?) * DAYS_PER_WEEK.unsigned_abs();
    registration_date.checked_add_days(Days::new(offset))
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

fn format_reading(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One week's measurement sheet as entered by the operator
///
/// Values are free text; blank means not measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMeasurements {
    /// Age in years
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: String,
    /// Height in centimetres
    #[serde(default, deserialize_with = "text_or_number")]
    pub height: String,
    /// Weight in kilograms
    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: String,
    /// Body fat percentage
    #[serde(default, deserialize_with = "text_or_number")]
    pub body_fat: String,
    /// Metabolic body age
    #[serde(default, deserialize_with = "text_or_number")]
    pub bma: String,
    /// Body mass index
    #[serde(default, deserialize_with = "text_or_number")]
    pub bmi: String,
    /// Resting metabolic rate
    #[serde(default, deserialize_with = "text_or_number")]
    pub bmr: String,
    /// Visceral fat level
    #[serde(default, deserialize_with = "text_or_number")]
    pub visceral_fat: String,
    /// Subcutaneous fat
    #[serde(default, deserialize_with = "text_or_number")]
    pub subcutaneous_fat: String,
    /// Muscle mass
    #[serde(default, deserialize_with = "text_or_number")]
    pub muscle_mass: String,
}

impl WeeklyMeasurements {
    /// Week 1 sheet prefilled from the registration survey and evaluation
    #[must_use]
    pub fn baseline(age: Option<u32>, evaluation: Option<&BodyMeasurements>) -> Self {
        let age = age.map(|a| a.to_string()).unwrap_or_default();
        let Some(m) = evaluation else {
            return Self {
                age,
                ..Self::default()
            };
        };
        Self {
            age,
            height: format_reading(Some(m.height_cm)),
            weight: format_reading(Some(m.weight_kg)),
            body_fat: format_reading(m.body_fat_any()),
            bma: format_reading(m.body_age),
            bmi: format_reading(m.bmi),
            bmr: format_reading(m.bmr_rm),
            visceral_fat: format_reading(Some(m.visceral_fat)),
            subcutaneous_fat: format_reading(m.trunk_subcutaneous_fat),
            muscle_mass: format_reading(m.skeletal_muscle_any()),
        }
    }

    /// Rebuild a sheet from a stored checkup
    #[must_use]
    pub fn from_checkup(
        height: Option<f64>,
        weight: Option<f64>,
        category_data: Option<&Value>,
    ) -> Self {
        let field = |key: &str| -> String {
            match category_data.and_then(|data| data.get(key)) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            }
        };
        Self {
            age: field("age"),
            height: format_reading(height.filter(|v| *v != 0.0)),
            weight: format_reading(weight.filter(|v| *v != 0.0)),
            body_fat: field("body_fat"),
            bma: field("bma"),
            bmi: field("bmi"),
            bmr: field("bmr"),
            visceral_fat: field("visceral_fat"),
            subcutaneous_fat: field("subcutaneous_fat"),
            muscle_mass: field("muscle_mass"),
        }
    }

    /// Everything except height and weight, stored as the checkup's `category_data`
    #[must_use]
    pub fn category_data(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in [
            ("age", &self.age),
            ("body_fat", &self.body_fat),
            ("bma", &self.bma),
            ("bmi", &self.bmi),
            ("bmr", &self.bmr),
            ("visceral_fat", &self.visceral_fat),
            ("subcutaneous_fat", &self.subcutaneous_fat),
            ("muscle_mass", &self.muscle_mass),
        ] {
            map.insert(key.to_owned(), Value::String(value.clone()));
        }
        Value::Object(map)
    }

    /// Whether every field is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.age,
            &self.height,
            &self.weight,
            &self.body_fat,
            &self.bma,
            &self.bmi,
            &self.bmr,
            &self.visceral_fat,
            &self.subcutaneous_fat,
            &self.muscle_mass,
        ]
        .iter()
        .all(|value| value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_bucketing() {
        let registered = date(2025, 1, 6);
        assert_eq!(week_number(registered, registered), Some(1));
        assert_eq!(week_number(registered, date(2025, 1, 12)), Some(1));
        assert_eq!(week_number(registered, date(2025, 1, 13)), Some(2));
        assert_eq!(week_number(registered, date(2025, 4, 27)), Some(16));
        assert_eq!(week_number(registered, date(2025, 4, 28)), None);
        assert_eq!(week_number(registered, date(2025, 1, 5)), None);
    }

    #[test]
    fn test_week_start() {
        let registered = date(2025, 1, 6);
        assert_eq!(week_start(registered, 1), Some(registered));
        assert_eq!(week_start(registered, 3), Some(date(2025, 1, 20)));
        assert_eq!(week_start(registered, 0), None);
    }

    #[test]
    fn test_sheet_accepts_numbers_and_text() {
        let sheet: WeeklyMeasurements =
            serde_json::from_str(r#"{"weight": 70.5, "height": "170", "bmi": null}"#).unwrap();
        assert_eq!(sheet.weight, "70.5");
        assert_eq!(sheet.height, "170");
        assert_eq!(sheet.bmi, "");
        assert!(!sheet.is_empty());
        assert!(WeeklyMeasurements::default().is_empty());
    }

    #[test]
    fn test_category_data_excludes_height_and_weight() {
        let sheet = WeeklyMeasurements {
            weight: "70".to_owned(),
            body_fat: "22".to_owned(),
            ..WeeklyMeasurements::default()
        };
        let data = sheet.category_data();
        assert_eq!(data["body_fat"], "22");
        assert!(data.get("weight").is_none());
        assert!(data.get("height").is_none());

        let rebuilt = WeeklyMeasurements::from_checkup(None, Some(70.0), Some(&data));
        assert_eq!(rebuilt, sheet);
    }

    #[test]
    fn test_baseline_prefill() {
        let evaluation = BodyMeasurements {
            height_cm: 144.0,
            weight_kg: 76.3,
            visceral_fat: 22.0,
            trunk_subcutaneous_fat: Some(41.4),
            body_fat_women: Some(42.4),
            body_age: Some(65.0),
            skeletal_muscle_women: Some(20.0),
            ..BodyMeasurements::default()
        };
        let sheet = WeeklyMeasurements::baseline(Some(45), Some(&evaluation));
        assert_eq!(sheet.age, "45");
        assert_eq!(sheet.height, "144");
        assert_eq!(sheet.weight, "76.3");
        assert_eq!(sheet.body_fat, "42.4");
        assert_eq!(sheet.bma, "65");
        assert_eq!(sheet.subcutaneous_fat, "41.4");
        assert_eq!(sheet.muscle_mass, "20");
        assert_eq!(sheet.bmr, "");

        let bare = WeeklyMeasurements::baseline(None, None);
        assert!(bare.is_empty());
    }
}
