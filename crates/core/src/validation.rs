//! Animal status enums and field validation shared by the API and importer.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a sow or boar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    Active,
    Culled,
    Sold,
}

impl AnimalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Culled => "culled",
            Self::Sold => "sold",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "culled" => Ok(Self::Culled),
            "sold" => Ok(Self::Sold),
            other => Err(CoreError::validation(format!(
                "Invalid status '{other}'. Must be one of: active, culled, sold"
            ))),
        }
    }
}

/// Lifecycle status of a piglet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PigletStatus {
    Nursing,
    Weaned,
    Dead,
    Sold,
}

impl PigletStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nursing => "nursing",
            Self::Weaned => "weaned",
            Self::Dead => "dead",
            Self::Sold => "sold",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "nursing" => Ok(Self::Nursing),
            "weaned" => Ok(Self::Weaned),
            "dead" => Ok(Self::Dead),
            "sold" => Ok(Self::Sold),
            other => Err(CoreError::validation(format!(
                "Invalid piglet status '{other}'. Must be one of: nursing, weaned, dead, sold"
            ))),
        }
    }
}

/// Maximum ear tag length (physical tags are short).
pub const MAX_EAR_TAG_LEN: usize = 32;

fn ear_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Letters, digits, dash, underscore. No whitespace.
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex"))
}

/// Validate an ear tag's format (uniqueness is checked against the store).
pub fn validate_ear_tag(tag: &str) -> Result<(), CoreError> {
    if tag.is_empty() {
        return Err(CoreError::validation("Ear tag cannot be empty"));
    }
    if tag.len() > MAX_EAR_TAG_LEN {
        return Err(CoreError::validation(format!(
            "Ear tag exceeds {MAX_EAR_TAG_LEN} characters"
        )));
    }
    if !ear_tag_pattern().is_match(tag) {
        return Err(CoreError::validation(format!(
            "Ear tag '{tag}' may only contain letters, digits, dashes, and underscores"
        )));
    }
    Ok(())
}

/// Generic "date must not be in the future" guard.
pub fn validate_not_future(
    date: chrono::NaiveDate,
    today: chrono::NaiveDate,
    field: &str,
) -> Result<(), CoreError> {
    if date > today {
        return Err(CoreError::validation(format!(
            "{field} {date} cannot be in the future"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animal_status_round_trip() {
        for s in [AnimalStatus::Active, AnimalStatus::Culled, AnimalStatus::Sold] {
            assert_eq!(AnimalStatus::parse(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn animal_status_rejects_unknown() {
        assert!(AnimalStatus::parse("retired").is_err());
        assert!(AnimalStatus::parse("").is_err());
    }

    #[test]
    fn piglet_status_round_trip() {
        for s in [
            PigletStatus::Nursing,
            PigletStatus::Weaned,
            PigletStatus::Dead,
            PigletStatus::Sold,
        ] {
            assert_eq!(PigletStatus::parse(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn ear_tag_accepts_typical_tags() {
        for tag in ["S-1042", "B07", "yorkshire_12", "204"] {
            assert!(validate_ear_tag(tag).is_ok(), "tag: {tag}");
        }
    }

    #[test]
    fn ear_tag_rejects_empty_and_whitespace() {
        assert!(validate_ear_tag("").is_err());
        assert!(validate_ear_tag("S 1042").is_err());
        assert!(validate_ear_tag("tag!").is_err());
    }

    #[test]
    fn ear_tag_rejects_overlong() {
        let long = "A".repeat(MAX_EAR_TAG_LEN + 1);
        assert!(validate_ear_tag(&long).is_err());
    }
}
