//! Housing unit types and occupancy rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a housing unit is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Gestation,
    Farrowing,
    Nursery,
    Finishing,
    BoarPen,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gestation => "gestation",
            Self::Farrowing => "farrowing",
            Self::Nursery => "nursery",
            Self::Finishing => "finishing",
            Self::BoarPen => "boar_pen",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "gestation" => Ok(Self::Gestation),
            "farrowing" => Ok(Self::Farrowing),
            "nursery" => Ok(Self::Nursery),
            "finishing" => Ok(Self::Finishing),
            "boar_pen" => Ok(Self::BoarPen),
            other => Err(CoreError::validation(format!(
                "Invalid unit type '{other}'. Must be one of: gestation, farrowing, nursery, finishing, boar_pen"
            ))),
        }
    }
}

/// A transfer into a full unit is rejected before any write happens.
pub fn validate_capacity(occupants: i64, capacity: i32) -> Result<(), CoreError> {
    if occupants >= i64::from(capacity) {
        return Err(CoreError::Conflict(format!(
            "Housing unit is at capacity ({capacity})"
        )));
    }
    Ok(())
}

/// Occupancy as a percentage for the occupancy view.
pub fn occupancy_percent(occupants: i64, capacity: i32) -> f64 {
    if capacity <= 0 {
        return 0.0;
    }
    (occupants as f64 / f64::from(capacity)) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_round_trip() {
        for t in [
            UnitType::Gestation,
            UnitType::Farrowing,
            UnitType::Nursery,
            UnitType::Finishing,
            UnitType::BoarPen,
        ] {
            assert_eq!(UnitType::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn capacity_check_blocks_full_unit() {
        assert!(validate_capacity(10, 10).is_err());
        assert!(validate_capacity(9, 10).is_ok());
    }

    #[test]
    fn occupancy_percent_handles_zero_capacity() {
        assert_eq!(occupancy_percent(3, 0), 0.0);
        assert!((occupancy_percent(5, 10) - 50.0).abs() < f64::EPSILON);
    }
}
