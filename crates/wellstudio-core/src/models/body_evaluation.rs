// ABOUTME: Body composition evaluation records and their measurement payload
// ABOUTME: Validates required readings and gender-specific column exclusivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::gender::Gender;
use super::numeric::{deserialize_optional_decimal, DecimalLimits};
use crate::errors::{AppError, AppResult};

/// Readings taken on a body composition scale
///
/// Body fat and skeletal muscle are recorded in gender-specific columns:
/// men's readings for male subjects, women's readings for female subjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    /// Height in centimetres
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Visceral fat level
    pub visceral_fat: f64,
    /// Trunk subcutaneous fat percentage
    pub trunk_subcutaneous_fat: Option<f64>,
    /// Body fat percentage for male subjects
    pub body_fat_men: Option<f64>,
    /// Body fat percentage for female subjects
    pub body_fat_women: Option<f64>,
    /// Metabolic body age in years
    pub body_age: Option<f64>,
    /// Body mass index as measured
    pub bmi: Option<f64>,
    /// Resting metabolic rate
    pub bmr_rm: Option<f64>,
    /// Skeletal muscle percentage for male subjects
    pub skeletal_muscle_men: Option<f64>,
    /// Skeletal muscle percentage for female subjects
    pub skeletal_muscle_women: Option<f64>,
}

impl BodyMeasurements {
    /// Body fat reading, men's column first
    #[must_use]
    pub fn body_fat_any(&self) -> Option<f64> {
        self.body_fat_men.or(self.body_fat_women)
    }

    /// Skeletal muscle reading, men's column first
    #[must_use]
    pub fn skeletal_muscle_any(&self) -> Option<f64> {
        self.skeletal_muscle_men.or(self.skeletal_muscle_women)
    }
}

/// A stored evaluation with its computed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyEvaluation {
    /// Database identifier
    pub id: i64,
    /// Evaluated member
    pub member_id: i64,
    /// Day of the evaluation
    pub date: NaiveDate,
    /// Scale readings
    #[serde(flatten)]
    pub measurements: BodyMeasurements,
    /// Fat surplus in kg, `1` when there is no surplus
    pub fat: Option<f64>,
    /// Fluid weight estimate in kg
    pub fluids: Option<f64>,
    /// Full analysis breakdown
    pub analysis_data: Option<Value>,
    /// Free text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Evaluation payload as submitted with a registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyEvaluationInput {
    /// Evaluation day, today when omitted
    pub date: Option<NaiveDate>,
    /// Height in centimetres
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub weight_kg: Option<f64>,
    /// Visceral fat level
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub visceral_fat: Option<f64>,
    /// Trunk subcutaneous fat
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub trunk_subcutaneous_fat: Option<f64>,
    /// Body fat, men's column
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub body_fat_men: Option<f64>,
    /// Body fat, women's column
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub body_fat_women: Option<f64>,
    /// Body age
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub body_age: Option<f64>,
    /// BMI
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub bmi: Option<f64>,
    /// Resting metabolic rate
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub bmr_rm: Option<f64>,
    /// Skeletal muscle, men's column
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub skeletal_muscle_men: Option<f64>,
    /// Skeletal muscle, women's column
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub skeletal_muscle_women: Option<f64>,
    /// Free text notes
    pub notes: Option<String>,
}

fn has_value(reading: Option<f64>) -> bool {
    reading.is_some_and(|v| v != 0.0)
}

impl BodyEvaluationInput {
    /// Validate the readings for a subject of the given gender
    ///
    /// # Errors
    ///
    /// - `MISSING_REQUIRED_FIELD` when height, weight or visceral fat is absent
    /// - `INVALID_INPUT` when a reading has more digits than its column holds
    /// - `INVALID_INPUT` when a male subject has women's readings or a female
    ///   subject has men's readings
    pub fn validate(&self, gender: Gender) -> AppResult<BodyMeasurements> {
        let (Some(height_cm), Some(weight_kg), Some(visceral_fat)) =
            (self.height_cm, self.weight_kg, self.visceral_fat)
        else {
            let missing: Vec<&str> = [
                ("height_cm", self.height_cm),
                ("weight_kg", self.weight_kg),
                ("visceral_fat", self.visceral_fat),
            ]
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
            return Err(AppError::missing_fields(&missing));
        };

        let columns = [
            ("height_cm", Some(height_cm), DecimalLimits::MEASUREMENT),
            ("weight_kg", Some(weight_kg), DecimalLimits::MEASUREMENT),
            ("visceral_fat", Some(visceral_fat), DecimalLimits::READING),
            ("trunk_subcutaneous_fat", self.trunk_subcutaneous_fat, DecimalLimits::READING),
            ("body_fat_men", self.body_fat_men, DecimalLimits::READING),
            ("body_fat_women", self.body_fat_women, DecimalLimits::READING),
            ("body_age", self.body_age, DecimalLimits::READING),
            ("bmi", self.bmi, DecimalLimits::READING),
            ("bmr_rm", self.bmr_rm, DecimalLimits::METABOLIC_RATE),
            ("skeletal_muscle_men", self.skeletal_muscle_men, DecimalLimits::READING),
            ("skeletal_muscle_women", self.skeletal_muscle_women, DecimalLimits::READING),
        ];
        for (field, value, limits) in columns {
            limits.check(field, value)?;
        }

        match gender {
            Gender::Male
                if has_value(self.body_fat_women) || has_value(self.skeletal_muscle_women) =>
            {
                return Err(AppError::invalid_input(
                    "For male gender, only men columns (body_fat_men, skeletal_muscle_men) can have values.",
                ));
            }
            Gender::Female
                if has_value(self.body_fat_men) || has_value(self.skeletal_muscle_men) =>
            {
                return Err(AppError::invalid_input(
                    "For female gender, only women columns (body_fat_women, skeletal_muscle_women) can have values.",
                ));
            }
            _ => {}
        }

        Ok(BodyMeasurements {
            height_cm,
            weight_kg,
            visceral_fat,
            trunk_subcutaneous_fat: self.trunk_subcutaneous_fat,
            body_fat_men: self.body_fat_men,
            body_fat_women: self.body_fat_women,
            body_age: self.body_age,
            bmi: self.bmi,
            bmr_rm: self.bmr_rm,
            skeletal_muscle_men: self.skeletal_muscle_men,
            skeletal_muscle_women: self.skeletal_muscle_women,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn input(json: &str) -> BodyEvaluationInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_required_readings() {
        let error = input(r#"{"height_cm": "170", "visceral_fat": ""}"#)
            .validate(Gender::Male)
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert_eq!(
            error.context.details["missing_fields"],
            serde_json::json!(["weight_kg", "visceral_fat"])
        );
    }

    #[test]
    fn test_male_rejects_women_columns() {
        let payload = r#"{"height_cm": 170, "weight_kg": 60, "visceral_fat": 8, "body_fat_women": 22}"#;
        let error = input(payload).validate(Gender::Male).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);

        // zero is treated as blank
        let payload = r#"{"height_cm": 170, "weight_kg": 60, "visceral_fat": 8, "body_fat_women": 0}"#;
        assert!(input(payload).validate(Gender::Male).is_ok());
    }

    #[test]
    fn test_female_rejects_men_columns() {
        let payload = r#"{"height_cm": 144, "weight_kg": 76.3, "visceral_fat": 22, "skeletal_muscle_men": 30}"#;
        assert!(input(payload).validate(Gender::Female).is_err());
    }

    #[test]
    fn test_other_accepts_either_column() {
        let payload = r#"{"height_cm": 160, "weight_kg": 70, "visceral_fat": 12, "body_fat_women": 31, "skeletal_muscle_men": 28}"#;
        let measurements = input(payload).validate(Gender::Other).unwrap();
        assert_eq!(measurements.body_fat_any(), Some(31.0));
        assert_eq!(measurements.skeletal_muscle_any(), Some(28.0));
    }

    #[test]
    fn test_readings_must_fit_their_columns() {
        let payload = r#"{"height_cm": 170, "weight_kg": 70.123, "visceral_fat": 8}"#;
        let error = input(payload).validate(Gender::Male).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.context.details["field"], "weight_kg");

        let payload = r#"{"height_cm": "12345678", "weight_kg": 70, "visceral_fat": 8}"#;
        let error = input(payload).validate(Gender::Male).unwrap_err();
        assert_eq!(error.context.details["field"], "height_cm");

        let payload = r#"{"height_cm": 170, "weight_kg": 70, "visceral_fat": 8, "bmr_rm": "12345.5", "bmi": 24.22}"#;
        assert!(input(payload).validate(Gender::Male).is_ok());

        let payload = r#"{"height_cm": 170, "weight_kg": 70, "visceral_fat": 1000}"#;
        let error = input(payload).validate(Gender::Male).unwrap_err();
        assert_eq!(error.context.details["field"], "visceral_fat");
    }
}
