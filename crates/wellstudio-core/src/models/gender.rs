// ABOUTME: Gender of a member or survey subject
// ABOUTME: Lossy parsing where unrecognised values resolve to Other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender recorded on registrations and members
///
/// Deserialization never fails: any value other than exactly `Male` or
/// `Female` becomes [`Gender::Other`], including `male` and ` Female `.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    /// Male subject
    Male,
    /// Female subject
    Female,
    /// Any other or unspecified gender
    #[default]
    Other,
}

impl Gender {
    /// Canonical string stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Parse gender from string, falling back to `Other`
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "Male" => Self::Male,
            "Female" => Self::Female,
            _ => Self::Other,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_parse() {
        assert_eq!(Gender::from_str_lossy("Male"), Gender::Male);
        assert_eq!(Gender::from_str_lossy("Female"), Gender::Female);
        assert_eq!(Gender::from_str_lossy(" Female "), Gender::Other);
        assert_eq!(Gender::from_str_lossy("male"), Gender::Other);
        assert_eq!(Gender::from_str_lossy("FEMALE"), Gender::Other);
        assert_eq!(Gender::from_str_lossy("nonbinary"), Gender::Other);
        assert_eq!(Gender::from_str_lossy(""), Gender::Other);
    }

    #[test]
    fn test_deserialize_unknown_is_other() {
        let gender: Gender = serde_json::from_str("\"X\"").unwrap();
        assert_eq!(gender, Gender::Other);
        let lowercase: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(lowercase, Gender::Other);
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
    }
}
