//! Ear-notch identity assignment.
//!
//! Piglets are identified by a notch pair: the right ear carries the litter
//! number (allocated from the farm-settings counter), the left ear carries
//! the 1-based sequence of the piglet within its litter.

use serde::Serialize;

use crate::error::CoreError;

/// A physical ear-notch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EarNotch {
    /// Right ear: litter number.
    pub right: i32,
    /// Left ear: sequence within the litter, starting at 1.
    pub left: i32,
}

/// Assign notches for `count` piglets of litter `litter_number`, starting
/// the left-ear sequence at `start_sequence` (1 for a fresh litter; higher
/// when piglet rows already exist from a partial recording).
pub fn assign_notches(litter_number: i32, start_sequence: i32, count: usize) -> Vec<EarNotch> {
    (0..count as i32)
        .map(|i| EarNotch {
            right: litter_number,
            left: start_sequence + i,
        })
        .collect()
}

/// Notch values are physical marks; negatives are impossible.
pub fn validate_notch(value: i32, side: &str) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::validation(format!(
            "{side} ear notch cannot be negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_litter_sequences_from_one() {
        let notches = assign_notches(42, 1, 3);
        assert_eq!(
            notches,
            vec![
                EarNotch { right: 42, left: 1 },
                EarNotch { right: 42, left: 2 },
                EarNotch { right: 42, left: 3 },
            ]
        );
    }

    #[test]
    fn continuation_starts_at_given_sequence() {
        let notches = assign_notches(42, 5, 2);
        assert_eq!(notches[0].left, 5);
        assert_eq!(notches[1].left, 6);
    }

    #[test]
    fn zero_count_yields_empty() {
        assert!(assign_notches(1, 1, 0).is_empty());
    }

    #[test]
    fn negative_notch_rejected() {
        assert!(validate_notch(-1, "Right").is_err());
        assert!(validate_notch(0, "Right").is_ok());
    }
}
