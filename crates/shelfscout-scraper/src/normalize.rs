//! Field-level normalization applied to every candidate before it becomes a
//! record.
//!
//! Nothing in here fails: each parser has a documented default (absent for
//! ratings, `0` for counts, empty string for text) so one bad field never
//! costs the whole record.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d(?:[\d,]*\d)?").expect("valid regex"));

/// Highest value a rating average may take.
pub const MAX_RATING: f64 = 5.0;

/// Collapses every whitespace run (newlines included) to one space and trims
/// the ends, so each record stays on one output row.
///
/// Idempotent: normalizing an already-normalized string returns it unchanged.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Extracts the first decimal number in `text` as a rating average.
///
/// Returns `None` when no number is present or the number falls outside
/// `[0, 5]`; an absent rating stays distinguishable from a zero rating.
#[must_use]
pub fn parse_rating_average(text: &str) -> Option<f64> {
    let matched = DECIMAL_RE.find(text)?;
    matched.as_str().parse::<f64>().ok().and_then(rating_in_range)
}

/// Accepts a numeric rating only when it is finite and within `[0, 5]`.
#[must_use]
pub fn rating_in_range(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=MAX_RATING).contains(&value)).then_some(value)
}

/// Extracts a review count from text such as `"(120)"`, `"1,024 reviews"` or
/// `"120"`.
///
/// Surrounding parentheses are stripped, thousands separators inside the
/// first digit run are ignored, and anything unparseable yields `0`.
#[must_use]
pub fn parse_rating_count(text: &str) -> u32 {
    let stripped = strip_parentheses(text.trim());
    INTEGER_RE
        .find(stripped)
        .and_then(|m| m.as_str().replace(',', "").parse::<u32>().ok())
        .unwrap_or(0)
}

/// Clamps a numeric count from structured data into the record's range.
///
/// Negative, non-finite and fractional inputs degrade the way the text parser
/// would: negatives and garbage become `0`, fractions are truncated.
#[must_use]
// Bounds are checked above the cast, so truncation only drops the fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count_from_number(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    value.trunc() as u32
}

/// Removes one pair of enclosing parentheses: `"(120)"` → `"120"`.
#[must_use]
pub fn strip_parentheses(text: &str) -> &str {
    text.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(text)
}

/// The last whitespace-separated token, e.g. `"SAVE $20"` → `"$20"`.
#[must_use]
pub fn last_token(text: &str) -> String {
    text.split_whitespace()
        .next_back()
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
