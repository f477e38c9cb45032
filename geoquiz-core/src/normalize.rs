//! Text normalization for guess matching
//!
//! Every registry key and every guess goes through the same fold:
//! - Unicode NFKC normalization
//! - Lowercase conversion
//! - Leading/trailing whitespace trimmed
//! - Internal whitespace collapsed to single spaces
//!
//! Punctuation and diacritics are preserved, so "Côte d'Ivoire" and
//! "Cote d'Ivoire" stay distinct keys and each needs its own alias.

use unicode_normalization::UnicodeNormalization;

/// Normalize a guess or a table key for matching.
///
/// # Examples
///
/// ```
/// use geoquiz_core::normalize::normalize_guess;
///
/// assert_eq!(normalize_guess("  FrAnCe "), "france");
/// assert_eq!(normalize_guess("New   Zealand"), "new zealand");
/// ```
pub fn normalize_guess(s: &str) -> String {
    let folded: String = s.nfkc().collect();
    let lowered = folded.to_lowercase();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in Unicode scalar values, the unit every threshold is expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
