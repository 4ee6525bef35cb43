//! Matrix (altrenogest) synchronization date arithmetic.
//!
//! A Matrix course aligns heat cycles across a batch of sows: after the
//! last daily dose, heat is expected within a 4-9 day window. The batch
//! view displays each sow's offset to her expected heat date; breeding is
//! recorded against that window.

use chrono::{Duration, NaiveDate};

use crate::error::CoreError;

/// Days from the last dose to the midpoint of the expected heat window.
pub const HEAT_ONSET_DAYS: i64 = 5;

/// Earliest day of the post-withdrawal heat window.
pub const HEAT_WINDOW_START_DAYS: i64 = 4;

/// Latest day of the post-withdrawal heat window.
pub const HEAT_WINDOW_END_DAYS: i64 = 9;

/// Default expected heat date when none was recorded explicitly:
/// last dose + [`HEAT_ONSET_DAYS`].
pub fn expected_heat_date(last_dose: NaiveDate) -> NaiveDate {
    last_dose + Duration::days(HEAT_ONSET_DAYS)
}

/// Days from `today` until the expected heat date.
///
/// Zero means heat is expected today; negative values mean the window has
/// passed without a recorded heat.
pub fn days_until_heat(expected: NaiveDate, today: NaiveDate) -> i64 {
    (expected - today).num_days()
}

/// Returns `true` if `date` falls inside the post-withdrawal heat window.
pub fn in_heat_window(last_dose: NaiveDate, date: NaiveDate) -> bool {
    let offset = (date - last_dose).num_days();
    (HEAT_WINDOW_START_DAYS..=HEAT_WINDOW_END_DAYS).contains(&offset)
}

/// The last dose cannot precede the course start.
pub fn validate_course_dates(start: NaiveDate, last_dose: NaiveDate) -> Result<(), CoreError> {
    if last_dose < start {
        return Err(CoreError::validation(format!(
            "Last dose date {last_dose} cannot be before the course start {start}"
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

    #[test]
    fn expected_heat_is_five_days_after_last_dose() {
        assert_eq!(expected_heat_date(d(2025, 2, 10)), d(2025, 2, 15));
    }

    #[test]
    fn days_until_heat_counts_down() {
        let expected = d(2025, 2, 15);
        assert_eq!(days_until_heat(expected, d(2025, 2, 12)), 3);
        assert_eq!(days_until_heat(expected, d(2025, 2, 15)), 0);
        assert_eq!(days_until_heat(expected, d(2025, 2, 17)), -2);
    }

    #[test]
    fn heat_window_bounds_are_inclusive() {
        let last_dose = d(2025, 2, 10);
        assert!(!in_heat_window(last_dose, d(2025, 2, 13))); // day 3
        assert!(in_heat_window(last_dose, d(2025, 2, 14))); // day 4
        assert!(in_heat_window(last_dose, d(2025, 2, 19))); // day 9
        assert!(!in_heat_window(last_dose, d(2025, 2, 20))); // day 10
    }

    #[test]
    fn last_dose_before_start_rejected() {
        assert!(validate_course_dates(d(2025, 2, 10), d(2025, 2, 9)).is_err());
        assert!(validate_course_dates(d(2025, 2, 10), d(2025, 2, 10)).is_ok());
    }
}
