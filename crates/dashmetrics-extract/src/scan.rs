//! Internal regex-scanning primitives shared by the field extractors.
//!
//! The `regex` crate has no look-around, so patterns express "must not be
//! preceded/followed by X" with optional named groups instead:
//!
//! - `num`: the value to parse.
//! - `skip`: matched when the label is a look-alike (e.g. `non-followers`
//!   when searching for `followers`).
//! - `tail`: matched when the number is really a fragment of a decimal or a
//!   percentage.
//!
//! A capture where `skip` or `tail` participated is discarded and scanning
//! moves on to the next match.

use regex::{Captures, Regex};

/// Integer token: comma/dot grouped thousands, or a bare digit run.
pub(crate) const NUMBER: &str = r"\d{1,3}(?:[,.]\d{3})+|\d+";

/// Decimal percentage value (the `%` sign is matched by the caller).
pub(crate) const PERCENT: &str = r"\d{1,3}(?:[.,]\d+)?";

/// Optional fragment after a count that disqualifies it.
pub(crate) const COUNT_TAIL: &str = r"(?P<tail>[.,]\d|\s*%)?";

/// Returns the first value, across `patterns` in order, whose capture is not
/// disqualified and whose `num` group passes `accept`.
pub(crate) fn first_valid<T>(
    patterns: &[Regex],
    text: &str,
    accept: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    patterns.iter().find_map(|re| {
        re.captures_iter(text)
            .filter(|caps| !is_disqualified(caps))
            .find_map(|caps| caps.name("num").and_then(|m| accept(m.as_str())))
    })
}

fn is_disqualified(caps: &Captures<'_>) -> bool {
    caps.name("skip").is_some() || caps.name("tail").is_some()
}

/// Builds the "label then count" and "count then label" pattern pair.
pub(crate) fn count_patterns(label: &str) -> [Regex; 2] {
    [
        compile(&format!(
            r"(?i){label}\s*:?\s*(?P<num>{NUMBER}){COUNT_TAIL}"
        )),
        compile(&format!(r"(?i)(?P<num>{NUMBER}){COUNT_TAIL}\s*{label}")),
    ]
}

/// Builds the "label then percent" and "percent then label" pattern pair.
pub(crate) fn percent_patterns(label: &str) -> [Regex; 2] {
    [
        compile(&format!(r"(?i){label}\s*:?\s*(?P<num>{PERCENT})\s*%")),
        compile(&format!(r"(?i)(?P<num>{PERCENT})\s*%\s*{label}")),
    ]
}

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}
