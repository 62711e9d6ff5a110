// ABOUTME: Body composition analyzer deriving fat surplus, fluid excess and target gaps
// ABOUTME: Pure, deterministic computation over scale readings and subject context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

//! Body Composition Analyzer
//!
//! Turns a set of body composition scale readings into:
//!
//! - a healthy weight band derived from height (BMI 21 to 23),
//! - the gap between each reading and its gender specific target,
//! - an estimate of how much of any excess weight is fat and how much is fluid.
//!
//! Every derived value is rounded to one decimal place as soon as it is
//! computed, and later steps consume the rounded values. Rounding looks at the
//! exact binary value and sends ties to the even tenth (`14.35` becomes `14.3`).
//!
//! The analyzer is total over finite input: it never fails, missing optional
//! readings count as zero, and unknown genders use the `Other` targets.

use serde::{Deserialize, Serialize};
use wellstudio_core::models::{BodyMeasurements, Gender};

/// BMI defining the lower end of the healthy weight band
pub const HEALTHY_BMI_LOWER: f64 = 21.0;

/// BMI defining the upper end of the healthy weight band
pub const HEALTHY_BMI_UPPER: f64 = 23.0;

/// Target visceral fat level for every subject
pub const VISCERAL_FAT_TARGET: u32 = 9;

/// Target BMI for every subject
pub const BMI_TARGET: u32 = 23;

/// Female subjects younger than this get the higher skeletal muscle target
pub const FEMALE_MUSCLE_AGE_THRESHOLD: u32 = 30;

/// Magnitude from which every `f64` is already a whole number
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Round to one decimal place on the exact binary value, ties to even
///
/// The decision is made on the value the `f64` actually holds rather than on
/// its shortest decimal spelling: `14.35` is stored just below the tie and
/// becomes `14.3`, while `2.25` is an exact tie and goes to the even `2.2`.
/// Negative zero is normalised so that serialised output never shows `-0.0`.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }

    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased_exponent - 1075)
    };

    // value == mantissa * 2^exponent with exponent < 0 below the limit
    let shift = exponent.unsigned_abs();
    let scaled = u128::from(mantissa) * 10;
    let tenths = if shift > 64 {
        0
    } else {
        let whole = scaled >> shift;
        let remainder = scaled & ((1_u128 << shift) - 1);
        let half = 1_u128 << (shift - 1);
        let round_up = remainder > half || (remainder == half && (whole & 1) == 1);
        whole + u128::from(round_up)
    };

    let magnitude = tenths as f64 / 10.0;
    let rounded = if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Target readings for a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionTargets {
    /// Body fat percentage target
    pub body_fat: u32,
    /// Trunk subcutaneous fat target
    pub trunk_fat: u32,
    /// Skeletal muscle percentage target
    pub skeletal_muscle: u32,
    /// Visceral fat level target
    pub visceral_fat: u32,
    /// BMI target
    pub bmi: u32,
}

impl CompositionTargets {
    /// Targets for the given gender and age
    #[must_use]
    pub const fn for_subject(gender: Gender, age: u32) -> Self {
        let (body_fat, trunk_fat, skeletal_muscle) = match gender {
            Gender::Male => (20, 15, 36),
            Gender::Female if age < FEMALE_MUSCLE_AGE_THRESHOLD => (30, 30, 27),
            Gender::Female => (30, 30, 25),
            Gender::Other => (25, 15, 30),
        };
        Self {
            body_fat,
            trunk_fat,
            skeletal_muscle,
            visceral_fat: VISCERAL_FAT_TARGET,
            bmi: BMI_TARGET,
        }
    }
}

/// Who is being analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectProfile {
    /// Subject gender
    pub gender: Gender,
    /// Age in whole years
    pub age: u32,
}

/// Readings after gender-specific columns have been resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCompositionInput {
    /// Height in centimetres
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Visceral fat level
    pub visceral_fat: f64,
    /// Trunk subcutaneous fat, zero when not measured
    pub trunk_subcutaneous_fat: f64,
    /// Body fat percentage, zero when not measured
    pub body_fat: f64,
    /// Skeletal muscle percentage, zero when not measured
    pub skeletal_muscle: f64,
    /// Metabolic body age, `None` when not measured
    pub body_age: Option<f64>,
    /// Measured BMI, zero when not measured
    pub bmi: f64,
}

fn reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl BodyCompositionInput {
    /// Resolve stored readings for a subject of the given gender
    ///
    /// Male subjects read the men's columns and female subjects the women's.
    /// Any other gender takes the men's reading when present, else the women's.
    /// Zero readings count as not measured.
    #[must_use]
    pub fn from_measurements(measurements: &BodyMeasurements, gender: Gender) -> Self {
        let (body_fat, skeletal_muscle) = match gender {
            Gender::Male => (
                reading(measurements.body_fat_men),
                reading(measurements.skeletal_muscle_men),
            ),
            Gender::Female => (
                reading(measurements.body_fat_women),
                reading(measurements.skeletal_muscle_women),
            ),
            Gender::Other => (
                reading(measurements.body_fat_men).or(reading(measurements.body_fat_women)),
                reading(measurements.skeletal_muscle_men)
                    .or(reading(measurements.skeletal_muscle_women)),
            ),
        };

        Self {
            height_cm: measurements.height_cm,
            weight_kg: measurements.weight_kg,
            visceral_fat: measurements.visceral_fat,
            trunk_subcutaneous_fat: reading(measurements.trunk_subcutaneous_fat).unwrap_or(0.0),
            body_fat: body_fat.unwrap_or(0.0),
            skeletal_muscle: skeletal_muscle.unwrap_or(0.0),
            body_age: reading(measurements.body_age),
            bmi: reading(measurements.bmi).unwrap_or(0.0),
        }
    }
}

/// Whether the subject carries fat above the ideal fat mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FatOutcome {
    /// Weight is below the healthy band's upper bound
    NoSurplus,
    /// Weight is at or above the upper bound; `kg` may be negative
    Surplus {
        /// Actual minus ideal fat mass
        kg: f64,
    },
}

impl FatOutcome {
    /// Value written to the evaluation record's `fat` column
    ///
    /// `NoSurplus` is stored as `1` so existing records stay readable.
    #[must_use]
    pub const fn recorded_value(self) -> f64 {
        match self {
            Self::NoSurplus => 1.0,
            Self::Surplus { kg } => kg,
        }
    }

    /// Status label stored alongside the analysis
    #[must_use]
    pub const fn status(self) -> &'static str {
        match self {
            Self::NoSurplus => "no_surplus",
            Self::Surplus { .. } => "surplus",
        }
    }
}

/// Actual versus ideal fat mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatMass {
    /// Fat mass implied by the body fat reading
    pub actual: f64,
    /// Fat mass at the target body fat percentage
    pub ideal: f64,
    /// Actual minus ideal
    pub excess: f64,
}

/// Breakdown persisted as the evaluation's `analysis_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    /// Lower bound of the healthy weight band
    pub min_weight: f64,
    /// Upper bound of the healthy weight band
    pub max_weight: f64,
    /// Upper bound minus weight; negative when over the band
    pub excess_weight: f64,
    /// Visceral fat target minus reading
    pub visceral_diff: f64,
    /// Trunk fat target minus reading
    pub trunk_diff: f64,
    /// Body fat target minus reading
    pub body_fat_diff: f64,
    /// Age minus body age
    pub body_age_diff: f64,
    /// BMI target minus reading
    pub bmi_diff: f64,
    /// Skeletal muscle target minus reading
    pub skeletal_diff: f64,
    /// Targets used
    pub targets: CompositionTargets,
    /// `no_surplus` or `surplus`
    pub fat_status: String,
    /// Whether a body age reading was available
    pub body_age_measured: bool,
}

/// Analyzer result
#[derive(Debug, Clone, PartialEq)]
pub struct BodyAnalysis {
    /// Fat surplus outcome
    pub fat: FatOutcome,
    /// Estimated excess fluid in kg, never negative
    pub fluids: f64,
    /// Fat mass figures behind the outcome
    pub fat_mass: FatMass,
    /// Full breakdown
    pub data: AnalysisData,
}

/// Analyse resolved readings for a subject
///
/// Deterministic: identical input always yields identical output.
#[must_use]
pub fn analyze(input: &BodyCompositionInput, subject: SubjectProfile) -> BodyAnalysis {
    let targets = CompositionTargets::for_subject(subject.gender, subject.age);
    let age = f64::from(subject.age);
    let body_fat_target = f64::from(targets.body_fat);

    let height_m = input.height_cm / 100.0;
    let min_weight = round_tenth(HEALTHY_BMI_LOWER * height_m * height_m);
    let max_weight = round_tenth(HEALTHY_BMI_UPPER * height_m * height_m);

    let excess_weight = round_tenth(max_weight - input.weight_kg);
    let excess_weight_abs = excess_weight.abs();

    let visceral_diff = round_tenth(f64::from(targets.visceral_fat) - input.visceral_fat);
    let trunk_diff = round_tenth(f64::from(targets.trunk_fat) - input.trunk_subcutaneous_fat);
    let body_fat_diff = round_tenth(body_fat_target - input.body_fat);
    let body_age_diff = round_tenth(age - input.body_age.unwrap_or(age));
    let bmi_diff = round_tenth(f64::from(targets.bmi) - input.bmi);
    let skeletal_diff = round_tenth(f64::from(targets.skeletal_muscle) - input.skeletal_muscle);

    let actual = round_tenth(input.weight_kg * input.body_fat / 100.0);
    let ideal = round_tenth(input.weight_kg * body_fat_target / 100.0);
    let fat_mass = FatMass {
        actual,
        ideal,
        excess: round_tenth(actual - ideal),
    };

    let (fat, fluids) = if excess_weight > 0.0 {
        (FatOutcome::NoSurplus, 0.0)
    } else {
        let fluids = round_tenth(excess_weight_abs - fat_mass.excess).max(0.0);
        (FatOutcome::Surplus { kg: fat_mass.excess }, fluids)
    };

    BodyAnalysis {
        fat,
        fluids,
        fat_mass,
        data: AnalysisData {
            min_weight,
            max_weight,
            excess_weight,
            visceral_diff,
            trunk_diff,
            body_fat_diff,
            body_age_diff,
            bmi_diff,
            skeletal_diff,
            targets,
            fat_status: fat.status().to_owned(),
            body_age_measured: input.body_age.is_some(),
        },
    }
}

/// Resolve stored measurements and analyse them in one step
#[must_use]
pub fn analyze_measurements(
    measurements: &BodyMeasurements,
    subject: SubjectProfile,
) -> BodyAnalysis {
    let input = BodyCompositionInput::from_measurements(measurements, subject.gender);
    analyze(&input, subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn male(age: u32) -> SubjectProfile {
        SubjectProfile {
            gender: Gender::Male,
            age,
        }
    }

    fn input(height_cm: f64, weight_kg: f64, visceral_fat: f64) -> BodyCompositionInput {
        BodyCompositionInput {
            height_cm,
            weight_kg,
            visceral_fat,
            trunk_subcutaneous_fat: 0.0,
            body_fat: 0.0,
            skeletal_muscle: 0.0,
            body_age: None,
            bmi: 0.0,
        }
    }

    #[test]
    fn test_round_tenth_uses_exact_value_and_even_ties() {
        let cases = [
            (14.35, 14.3),
            (-2.25, -2.2),
            (0.25, 0.2),
            (0.75, 0.8),
            (0.35, 0.3),
            (1.45, 1.4),
            (0.05, 0.1),
            (2.675, 2.7),
            (60.69, 60.7),
            (-28.649, -28.6),
        ];
        for (value, expected) in cases {
            assert!(
                (round_tenth(value) - expected).abs() < 1e-12,
                "round_tenth({value}) = {}",
                round_tenth(value)
            );
        }
        assert!(round_tenth(-0.04).is_sign_positive());
        assert!(round_tenth(f64::MIN_POSITIVE / 4.0).abs() < f64::EPSILON);
        assert!((round_tenth(1.0e17) - 1.0e17).abs() < f64::EPSILON);
        assert!(round_tenth(f64::NAN).is_nan());
    }

    #[test]
    fn test_targets_table() {
        assert_eq!(CompositionTargets::for_subject(Gender::Male, 25).skeletal_muscle, 36);
        assert_eq!(CompositionTargets::for_subject(Gender::Male, 55).skeletal_muscle, 36);
        assert_eq!(CompositionTargets::for_subject(Gender::Female, 29).skeletal_muscle, 27);
        assert_eq!(CompositionTargets::for_subject(Gender::Female, 30).skeletal_muscle, 25);

        let other = CompositionTargets::for_subject(Gender::Other, 40);
        assert_eq!((other.body_fat, other.trunk_fat, other.skeletal_muscle), (25, 15, 30));
        assert_eq!((other.visceral_fat, other.bmi), (9, 23));
    }

    #[test]
    fn test_under_band_has_no_surplus() {
        let mut reading = input(170.0, 60.0, 8.0);
        reading.body_fat = 15.0;
        let analysis = analyze(&reading, male(25));

        assert_eq!(analysis.fat, FatOutcome::NoSurplus);
        assert!((analysis.fat.recorded_value() - 1.0).abs() < f64::EPSILON);
        assert!(analysis.fluids.abs() < f64::EPSILON);
        assert!((analysis.data.excess_weight - 6.5).abs() < 1e-9);
        assert_eq!(analysis.data.fat_status, "no_surplus");
    }

    #[test]
    fn test_weight_at_upper_bound_is_over_branch() {
        let analysis = analyze(&input(170.0, 66.5, 9.0), male(40));
        assert!(analysis.data.excess_weight.abs() < f64::EPSILON);
        assert!(matches!(analysis.fat, FatOutcome::Surplus { .. }));
    }

    #[test]
    fn test_fluids_never_negative() {
        for weight in [40.0, 55.5, 66.5, 80.0, 120.0] {
            for body_fat in [0.0, 10.0, 25.0, 45.0, 60.0] {
                let mut reading = input(165.0, weight, 10.0);
                reading.body_fat = body_fat;
                let analysis = analyze(&reading, male(30));
                assert!(analysis.fluids >= 0.0, "weight {weight} body fat {body_fat}");
            }
        }
    }

    #[test]
    fn test_other_gender_prefers_men_reading() {
        let measurements = BodyMeasurements {
            height_cm: 160.0,
            weight_kg: 70.0,
            visceral_fat: 12.0,
            body_fat_men: Some(0.0),
            body_fat_women: Some(33.0),
            skeletal_muscle_men: Some(27.0),
            skeletal_muscle_women: Some(24.0),
            ..BodyMeasurements::default()
        };
        let resolved = BodyCompositionInput::from_measurements(&measurements, Gender::Other);
        assert!((resolved.body_fat - 33.0).abs() < f64::EPSILON);
        assert!((resolved.skeletal_muscle - 27.0).abs() < f64::EPSILON);

        let female = BodyCompositionInput::from_measurements(&measurements, Gender::Female);
        assert!((female.skeletal_muscle - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_body_age_zero_counts_as_unmeasured() {
        let measurements = BodyMeasurements {
            height_cm: 170.0,
            weight_kg: 60.0,
            visceral_fat: 8.0,
            body_age: Some(0.0),
            ..BodyMeasurements::default()
        };
        let analysis = analyze_measurements(&measurements, male(25));
        assert!(analysis.data.body_age_diff.abs() < f64::EPSILON);
        assert!(!analysis.data.body_age_measured);
    }
}
