use super::*;

// -----------------------------------------------------------------------
// collapse_whitespace
// -----------------------------------------------------------------------

#[test]
fn collapse_whitespace_joins_lines() {
    assert_eq!(
        collapse_whitespace("Great\n  camera   quality"),
        "Great camera quality"
    );
}

#[test]
fn collapse_whitespace_trims_ends() {
    assert_eq!(collapse_whitespace("  \t Cam A \r\n"), "Cam A");
}

#[test]
fn collapse_whitespace_is_idempotent() {
    let samples = [
        "Great\n  camera   quality",
        "  leading",
        "trailing\n\n",
        "",
        "already normal",
        "tabs\tand\u{a0}nbsp",
    ];
    for sample in samples {
        let once = collapse_whitespace(sample);
        assert_eq!(collapse_whitespace(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn collapse_whitespace_empty_stays_empty() {
    assert_eq!(collapse_whitespace("   \n "), "");
}

// -----------------------------------------------------------------------
// parse_rating_average
// -----------------------------------------------------------------------

#[test]
fn rating_average_plain_decimal() {
    assert_eq!(parse_rating_average("4.5"), Some(4.5));
}

#[test]
fn rating_average_from_free_text() {
    assert_eq!(parse_rating_average("Rated 3.8 out of 5 stars"), Some(3.8));
}

#[test]
fn rating_average_integer() {
    assert_eq!(parse_rating_average("4"), Some(4.0));
}

#[test]
fn rating_average_zero_is_present() {
    assert_eq!(parse_rating_average("0"), Some(0.0));
}

#[test]
fn rating_average_missing_is_absent() {
    assert_eq!(parse_rating_average("No reviews yet"), None);
    assert_eq!(parse_rating_average(""), None);
}

#[test]
fn rating_average_out_of_range_is_absent() {
    assert_eq!(parse_rating_average("47 reviews"), None);
}

#[test]
fn rating_in_range_rejects_nan_and_negative() {
    assert_eq!(rating_in_range(f64::NAN), None);
    assert_eq!(rating_in_range(-0.5), None);
    assert_eq!(rating_in_range(5.0), Some(5.0));
}

// -----------------------------------------------------------------------
// parse_rating_count
// -----------------------------------------------------------------------

#[test]
fn rating_count_parenthesized() {
    assert_eq!(parse_rating_count("(120)"), 120);
}

#[test]
fn rating_count_with_label() {
    assert_eq!(parse_rating_count("(57 Reviews)"), 57);
}

#[test]
fn rating_count_with_thousands_separator() {
    assert_eq!(parse_rating_count("1,024 reviews"), 1024);
}

#[test]
fn rating_count_unparseable_is_zero() {
    assert_eq!(parse_rating_count("Be the first to review"), 0);
    assert_eq!(parse_rating_count(""), 0);
}

#[test]
fn rating_count_overflow_is_zero() {
    assert_eq!(parse_rating_count("99999999999999"), 0);
}

#[test]
fn count_from_number_clamps() {
    assert_eq!(count_from_number(12.0), 12);
    assert_eq!(count_from_number(12.9), 12);
    assert_eq!(count_from_number(-3.0), 0);
    assert_eq!(count_from_number(f64::NAN), 0);
    assert_eq!(count_from_number(1e12), u32::MAX);
}

// -----------------------------------------------------------------------
// small helpers
// -----------------------------------------------------------------------

#[test]
fn strip_parentheses_only_strips_enclosing_pair() {
    assert_eq!(strip_parentheses("(120)"), "120");
    assert_eq!(strip_parentheses("120)"), "120)");
    assert_eq!(strip_parentheses("(a) (b)"), "a) (b");
}

#[test]
fn last_token_takes_savings_amount() {
    assert_eq!(last_token("SAVE $20"), "$20");
    assert_eq!(last_token(""), "");
}
