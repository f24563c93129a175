//! Locale-tolerant parsing of OCR number tokens.
//!
//! Both parsers scan characters by hand instead of reaching for `regex`: the
//! inputs are tiny and the rules (leading-prefix parse, separator stripping)
//! are easier to state as a scan.

/// Parses an integer token such as `"1,234"`, `"12 345"` or `"1.234.567"`.
///
/// Thousands separators and whitespace are stripped, then the leading
/// integer prefix is parsed. Returns `0` for empty or unparsable input.
#[must_use]
pub fn parse_number(text: &str) -> i64 {
    try_parse_number(text).unwrap_or(0)
}

/// Like [`parse_number`] but distinguishes "no number" from a literal zero.
///
/// Accepts an optional leading sign (`+`, `-` or the Unicode minus `−`).
/// Dots are treated as thousands separators only when every group after the
/// first has exactly three digits (`"1.234"`); otherwise parsing stops at the
/// first dot, so `"12.5"` yields `12`.
#[must_use]
pub fn try_parse_number(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| if c == '−' { '-' } else { c })
        .collect();

    let (negative, unsigned) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let digits: String = if is_dotted_thousands(unsigned) {
        unsigned.chars().filter(char::is_ascii_digit).collect()
    } else {
        unsigned.chars().take_while(char::is_ascii_digit).collect()
    };

    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses a non-negative count, e.g. a follower total.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    try_parse_number(text).and_then(|v| u64::try_from(v).ok())
}

/// Parses a percentage token such as `"12,5"`, `"45.2 %"` or `"100"`.
///
/// A comma decimal separator is normalized to `.` and whitespace is removed
/// before the leading numeric prefix is parsed. Returns `None` when nothing
/// parses or the value falls outside `[0, 100]`.
#[must_use]
pub fn parse_percent(text: &str) -> Option<f64> {
    let value = parse_decimal_prefix(text)?;
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return None;
    }
    Some(value)
}

/// Parses the leading decimal number of `text` with no range check.
pub(crate) fn parse_decimal_prefix(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '−' => '-',
            other => other,
        })
        .collect();

    let bytes = cleaned.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let mut has_dot = false;
    let mut has_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => has_digit = true,
            b'.' if !has_dot => has_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !has_digit {
        return None;
    }
    // A trailing dot ("12.") still parses as 12 in Rust's float grammar.
    cleaned[..end].parse::<f64>().ok()
}

/// `true` for `"1.234"` / `"12.345.678"`: a 1-3 digit head followed by one
/// or more `.ddd` groups and nothing else.
fn is_dotted_thousands(s: &str) -> bool {
    let mut groups = s.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut saw_group = false;
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        saw_group = true;
    }
    saw_group
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_number
    // -----------------------------------------------------------------------

    #[test]
    fn number_with_comma_separator() {
        assert_eq!(parse_number("1,234"), 1234);
    }

    #[test]
    fn number_empty_is_zero() {
        assert_eq!(parse_number(""), 0);
    }

    #[test]
    fn number_garbage_is_zero() {
        assert_eq!(parse_number("abc"), 0);
    }

    #[test]
    fn number_with_spaces_and_nbsp() {
        assert_eq!(parse_number("12 345"), 12_345);
        assert_eq!(parse_number("12\u{a0}345"), 12_345);
    }

    #[test]
    fn number_dotted_thousands() {
        assert_eq!(parse_number("1.234.567"), 1_234_567);
    }

    #[test]
    fn number_decimal_truncates() {
        assert_eq!(parse_number("12.5"), 12);
    }

    #[test]
    fn number_stops_at_trailing_text() {
        assert_eq!(parse_number("842 accounts"), 842);
    }

    #[test]
    fn number_signed() {
        assert_eq!(parse_number("+12"), 12);
        assert_eq!(parse_number("-7"), -7);
        assert_eq!(parse_number("−3"), -3);
    }

    #[test]
    fn number_overflow_is_zero() {
        assert_eq!(parse_number("99999999999999999999999"), 0);
    }

    #[test]
    fn try_number_distinguishes_zero() {
        assert_eq!(try_parse_number("0"), Some(0));
        assert_eq!(try_parse_number("-"), None);
    }

    #[test]
    fn count_rejects_negative() {
        assert_eq!(parse_count("-5"), None);
        assert_eq!(parse_count("5"), Some(5));
    }

    // -----------------------------------------------------------------------
    // parse_percent
    // -----------------------------------------------------------------------

    #[test]
    fn percent_comma_decimal() {
        assert_eq!(parse_percent("12,5"), Some(12.5));
    }

    #[test]
    fn percent_out_of_range_is_none() {
        assert_eq!(parse_percent("150"), None);
        assert_eq!(parse_percent("-1"), None);
    }

    #[test]
    fn percent_bounds_are_inclusive() {
        assert_eq!(parse_percent("0"), Some(0.0));
        assert_eq!(parse_percent("100"), Some(100.0));
    }

    #[test]
    fn percent_ignores_whitespace_and_sign_suffix() {
        assert_eq!(parse_percent(" 45 .2 %"), Some(45.2));
    }

    #[test]
    fn percent_garbage_is_none() {
        assert_eq!(parse_percent("n/a"), None);
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("NaN"), None);
    }
}
