//! Normalized edit-distance similarity.

use crate::normalize::char_len;

/// Minimum similarity a fuzzy candidate needs to be accepted.
pub const FUZZY_THRESHOLD: f64 = 0.75;

/// Inputs shorter than this (in characters) never fuzzy-match.
pub const MIN_FUZZY_LEN: usize = 3;

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, in `[0, 1]`.
///
/// Inputs must already be normalized; see [`crate::normalize::normalize_guess`].
/// Two empty strings are identical (similarity 1).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = char_len(a).max(char_len(b));
    if max_len == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_strings_are_identical() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_single_substitution() {
        let score = similarity("germani", "germany");
        assert!((score - 6.0 / 7.0).abs() < 1e-9);
        assert!(score >= FUZZY_THRESHOLD);
    }

    #[test]
    fn test_far_strings_fall_below_threshold() {
        assert!(similarity("frxxxxxxxxx", "france") < FUZZY_THRESHOLD);
        assert!(similarity("atlantis", "antarctica") < FUZZY_THRESHOLD);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // One substitution over 7 characters, though "é" is two bytes
        let score = similarity("reunion", "réunion");
        assert!((score - 6.0 / 7.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn identical_strings_score_one(s in "\\PC{0,20}") {
            prop_assert_eq!(similarity(&s, &s), 1.0);
        }

        #[test]
        fn score_stays_in_unit_interval(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
