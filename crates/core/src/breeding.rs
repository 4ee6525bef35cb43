//! Breeding-cycle date arithmetic and classification rules.
//!
//! Everything downstream of "a sow was bred on date X" is computed here:
//! the expected farrowing date, pregnancy-check eligibility, and the
//! gilt/sow parity classification. All functions take dates explicitly so
//! tests never depend on the wall clock.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fixed swine gestation length in days. Not configurable.
pub const GESTATION_DAYS: i64 = 114;

/// Minimum days after breeding before a pregnancy check is due.
pub const PREGNANCY_CHECK_MIN_DAYS: i64 = 18;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a breeding was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingMethod {
    Natural,
    Ai,
}

impl BreedingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Ai => "ai",
        }
    }

    /// Parse the database/API string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "natural" => Ok(Self::Natural),
            "ai" => Ok(Self::Ai),
            other => Err(CoreError::validation(format!(
                "Invalid breeding method '{other}'. Must be one of: natural, ai"
            ))),
        }
    }
}

/// Outcome of a breeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingOutcome {
    Pending,
    Pregnant,
    NotPregnant,
}

impl BreedingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pregnant => "pregnant",
            Self::NotPregnant => "not_pregnant",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "pregnant" => Ok(Self::Pregnant),
            "not_pregnant" => Ok(Self::NotPregnant),
            other => Err(CoreError::validation(format!(
                "Invalid breeding outcome '{other}'. Must be one of: pending, pregnant, not_pregnant"
            ))),
        }
    }
}

/// Parity classification of a female animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityClass {
    /// Has never farrowed.
    Gilt,
    /// Has farrowed at least once.
    Sow,
}

impl ParityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gilt => "gilt",
            Self::Sow => "sow",
        }
    }
}

// ---------------------------------------------------------------------------
// Date arithmetic
// ---------------------------------------------------------------------------

/// Expected farrowing date: breeding date + [`GESTATION_DAYS`].
pub fn expected_farrowing_date(bred_on: NaiveDate) -> NaiveDate {
    bred_on + Duration::days(GESTATION_DAYS)
}

/// Days elapsed since breeding (negative if `bred_on` is in the future).
pub fn days_since_breeding(bred_on: NaiveDate, today: NaiveDate) -> i64 {
    (today - bred_on).num_days()
}

/// A pregnancy check is due once [`PREGNANCY_CHECK_MIN_DAYS`] have elapsed
/// and the outcome is still pending.
pub fn needs_pregnancy_check(
    bred_on: NaiveDate,
    today: NaiveDate,
    outcome: BreedingOutcome,
) -> bool {
    outcome == BreedingOutcome::Pending
        && days_since_breeding(bred_on, today) >= PREGNANCY_CHECK_MIN_DAYS
}

/// Zero farrowings classifies as gilt; one or more as sow.
pub fn classify_parity(farrowing_count: i64) -> ParityClass {
    if farrowing_count == 0 {
        ParityClass::Gilt
    } else {
        ParityClass::Sow
    }
}

/// Breeding dates cannot lie in the future.
pub fn validate_breeding_date(bred_on: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if bred_on > today {
        return Err(CoreError::validation(format!(
            "Breeding date {bred_on} cannot be in the future"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // -- expected_farrowing_date --

    #[test]
    fn farrowing_date_is_plus_114_days() {
        assert_eq!(expected_farrowing_date(d(2025, 1, 1)), d(2025, 4, 25));
    }

    #[test]
    fn farrowing_date_crosses_year_boundary() {
        assert_eq!(expected_farrowing_date(d(2025, 10, 1)), d(2026, 1, 23));
    }

    #[test]
    fn farrowing_date_handles_leap_february() {
        // 2024 is a leap year; the offset must count Feb 29.
        assert_eq!(expected_farrowing_date(d(2023, 11, 15)), d(2024, 3, 8));
    }

    // -- needs_pregnancy_check --

    #[test]
    fn check_not_due_before_18_days() {
        let bred = d(2025, 3, 1);
        assert!(!needs_pregnancy_check(
            bred,
            d(2025, 3, 18),
            BreedingOutcome::Pending
        ));
    }

    #[test]
    fn check_due_at_exactly_18_days() {
        let bred = d(2025, 3, 1);
        assert!(needs_pregnancy_check(
            bred,
            d(2025, 3, 19),
            BreedingOutcome::Pending
        ));
    }

    #[test]
    fn confirmed_pregnancy_never_needs_check() {
        let bred = d(2025, 3, 1);
        assert!(!needs_pregnancy_check(
            bred,
            d(2025, 5, 1),
            BreedingOutcome::Pregnant
        ));
        assert!(!needs_pregnancy_check(
            bred,
            d(2025, 5, 1),
            BreedingOutcome::NotPregnant
        ));
    }

    // -- classify_parity --

    #[test]
    fn zero_farrowings_is_gilt() {
        assert_eq!(classify_parity(0), ParityClass::Gilt);
    }

    #[test]
    fn any_farrowing_is_sow() {
        assert_eq!(classify_parity(1), ParityClass::Sow);
        assert_eq!(classify_parity(7), ParityClass::Sow);
    }

    // -- validate_breeding_date --

    #[test]
    fn today_is_a_valid_breeding_date() {
        assert!(validate_breeding_date(d(2025, 6, 1), d(2025, 6, 1)).is_ok());
    }

    #[test]
    fn future_breeding_date_rejected() {
        let err = validate_breeding_date(d(2025, 6, 2), d(2025, 6, 1)).unwrap_err();
        assert!(err.to_string().contains("future"));
    }

    // -- enum round trips --

    #[test]
    fn method_parse_round_trip() {
        for m in [BreedingMethod::Natural, BreedingMethod::Ai] {
            assert_eq!(BreedingMethod::parse(m.as_str()).unwrap(), m);
        }
    }

    #[test]
    fn method_parse_rejects_unknown() {
        assert!(BreedingMethod::parse("telepathy").is_err());
    }

    #[test]
    fn outcome_parse_round_trip() {
        for o in [
            BreedingOutcome::Pending,
            BreedingOutcome::Pregnant,
            BreedingOutcome::NotPregnant,
        ] {
            assert_eq!(BreedingOutcome::parse(o.as_str()).unwrap(), o);
        }
    }
}
