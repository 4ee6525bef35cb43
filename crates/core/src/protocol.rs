//! Protocol trigger events and task expansion.
//!
//! A protocol is a named template of tasks, each carrying a day offset
//! relative to a trigger event (breeding, farrowing, or weaning). When the
//! trigger fires, every task of every active matching protocol is expanded
//! into a concrete scheduled task with an absolute due date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The farm event a protocol is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    Breeding,
    Farrowing,
    Weaning,
}

impl TriggerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breeding => "breeding",
            Self::Farrowing => "farrowing",
            Self::Weaning => "weaning",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "breeding" => Ok(Self::Breeding),
            "farrowing" => Ok(Self::Farrowing),
            "weaning" => Ok(Self::Weaning),
            other => Err(CoreError::validation(format!(
                "Invalid trigger event '{other}'. Must be one of: breeding, farrowing, weaning"
            ))),
        }
    }
}

/// Absolute due date for a task `days_offset` days after the trigger.
///
/// Negative offsets are allowed (e.g. "move to farrowing crate 5 days
/// before the expected farrowing date" on a breeding-triggered protocol).
pub fn due_date(trigger_date: NaiveDate, days_offset: i32) -> NaiveDate {
    trigger_date + Duration::days(i64::from(days_offset))
}

/// A protocol task template, as needed for expansion.
#[derive(Debug, Clone)]
pub struct TaskTemplate {
    pub title: String,
    pub description: Option<String>,
    pub days_offset: i32,
}

/// An expanded task ready for insertion as a scheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
}

/// Expand task templates against a trigger date, preserving order.
pub fn expand_tasks(trigger_date: NaiveDate, templates: &[TaskTemplate]) -> Vec<ExpandedTask> {
    templates
        .iter()
        .map(|t| ExpandedTask {
            title: t.title.clone(),
            description: t.description.clone(),
            due_date: due_date(trigger_date, t.days_offset),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn template(title: &str, offset: i32) -> TaskTemplate {
        TaskTemplate {
            title: title.to_string(),
            description: None,
            days_offset: offset,
        }
    }

    #[test]
    fn due_date_applies_positive_offset() {
        assert_eq!(due_date(d(2025, 3, 1), 21), d(2025, 3, 22));
    }

    #[test]
    fn due_date_applies_negative_offset() {
        assert_eq!(due_date(d(2025, 3, 1), -5), d(2025, 2, 24));
    }

    #[test]
    fn due_date_zero_offset_is_trigger_date() {
        assert_eq!(due_date(d(2025, 3, 1), 0), d(2025, 3, 1));
    }

    #[test]
    fn expand_preserves_order_and_offsets() {
        let templates = vec![
            template("Iron injection", 3),
            template("Castration", 7),
            template("Vaccination", 21),
        ];
        let expanded = expand_tasks(d(2025, 4, 1), &templates);

        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].title, "Iron injection");
        assert_eq!(expanded[0].due_date, d(2025, 4, 4));
        assert_eq!(expanded[1].due_date, d(2025, 4, 8));
        assert_eq!(expanded[2].due_date, d(2025, 4, 22));
    }

    #[test]
    fn expand_empty_template_list() {
        assert!(expand_tasks(d(2025, 4, 1), &[]).is_empty());
    }

    #[test]
    fn trigger_event_parse_round_trip() {
        for t in [
            TriggerEvent::Breeding,
            TriggerEvent::Farrowing,
            TriggerEvent::Weaning,
        ] {
            assert_eq!(TriggerEvent::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn trigger_event_parse_rejects_unknown() {
        assert!(TriggerEvent::parse("culling").is_err());
    }
}
