//! Atomic value predicates.
//!
//! Pure boolean checks against a single value. These are the building
//! blocks the validation pass and the cross-field rules compose; none of
//! them reads session state.

use rust_decimal::Decimal;

use crate::value::Value;

/// Character count meets the minimum.
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Character count within the maximum.
pub fn max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Exactly `len` ASCII digits, nothing else. The check a conditionally
/// required phone field runs when its trigger is active.
pub fn exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Regex match over the whole value. An unparsable pattern is a schema
/// authoring mistake, handled fail open: warn and pass.
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            log::warn!("unparsable constraint pattern '{}' ({}), skipping", pattern, e);
            true
        }
    }
}

/// Numeric bounds, inclusive on both ends.
pub fn in_range(value: &Decimal, min: Option<i64>, max: Option<i64>) -> bool {
    if let Some(min) = min {
        if *value < Decimal::from(min) {
            return false;
        }
    }
    if let Some(max) = max {
        if *value > Decimal::from(max) {
            return false;
        }
    }
    true
}

/// Requiredness check; see [`Value::is_filled`].
pub fn non_empty(value: &Value) -> bool {
    value.is_filled()
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds() {
        assert!(min_length("123456", 6));
        assert!(!min_length("1234", 6));
        assert!(max_length("1234", 6));
        assert!(!max_length("1234567", 6));
        // Counted in characters, not bytes.
        assert!(min_length("héllo", 5));
    }

    #[test]
    fn digits_check() {
        assert!(exact_digits("0123456789", 10));
        assert!(!exact_digits("012345678", 10));
        assert!(!exact_digits("01234567x9", 10));
        assert!(!exact_digits("", 10));
    }

    #[test]
    fn pattern_match() {
        assert!(matches_pattern("5550100999", "^[0-9]{10}$"));
        assert!(!matches_pattern("555-0100", "^[0-9]{10}$"));
    }

    #[test]
    fn bad_pattern_fails_open() {
        assert!(matches_pattern("anything", "([unclosed"));
    }

    #[test]
    fn range_bounds_inclusive() {
        let v = Decimal::from(18);
        assert!(in_range(&v, Some(18), Some(99)));
        assert!(in_range(&v, None, None));
        assert!(!in_range(&v, Some(21), None));
        assert!(!in_range(&v, None, Some(17)));
    }
}
