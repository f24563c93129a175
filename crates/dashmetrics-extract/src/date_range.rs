//! Reporting period shown on the dashboard, as a normalized display string.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use dashmetrics_core::ExtractionLimits;
use regex::{Captures, Regex};

use crate::scan::compile;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter prefix captured; the rest of a full month name is absorbed.
const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)";

static EXPLICIT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b(?P<m1>{MONTH})[a-z]*\.?\s+(?P<d1>\d{{1,2}})\s*[-–]\s*(?P<m2>{MONTH})[a-z]*\.?\s+(?P<d2>\d{{1,2}})(?:\s*,?\s*(?P<year>\d{{4}}))?\b"
    ))
});

static RELATIVE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\blast\s+(?P<days>\d{1,3})\s+days?\b"));

/// Resolves the dashboard period.
///
/// An explicit `"Mar 4 - Mar 10, 2024"` range wins; otherwise `"Last N days"`
/// is resolved to a window ending on `today`. Output always uses
/// three-letter month names, e.g. `"Mar 4 - Mar 10, 2024"` or
/// `"Dec 28, 2023 - Jan 3, 2024"` across a year boundary.
#[must_use]
pub fn extract_date_range(
    text: &str,
    today: NaiveDate,
    limits: &ExtractionLimits,
) -> Option<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(range) = EXPLICIT_RANGE
        .captures_iter(&normalized)
        .find_map(|caps| explicit_range(&caps))
    {
        tracing::debug!(date_range = %range, "explicit date range");
        return Some(range);
    }

    let days: u32 = RELATIVE_RANGE
        .captures(&normalized)?
        .name("days")?
        .as_str()
        .parse()
        .ok()?;
    if !(1..=limits.max_relative_days).contains(&days) {
        return None;
    }
    let start = today.checked_sub_days(Days::new(u64::from(days - 1)))?;
    let range = format_window(start, today);
    tracing::debug!(days, date_range = %range, "relative date range");
    Some(range)
}

fn explicit_range(caps: &Captures<'_>) -> Option<String> {
    let m1 = month_name(caps.name("m1")?.as_str())?;
    let m2 = month_name(caps.name("m2")?.as_str())?;
    let d1 = day_of_month(caps.name("d1")?.as_str())?;
    let d2 = day_of_month(caps.name("d2")?.as_str())?;

    let mut range = format!("{m1} {d1} - {m2} {d2}");
    if let Some(year) = caps.name("year") {
        range.push_str(", ");
        range.push_str(year.as_str());
    }
    Some(range)
}

fn month_name(prefix: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(prefix))
        .copied()
}

fn day_of_month(raw: &str) -> Option<u32> {
    raw.parse().ok().filter(|d| (1..=31).contains(d))
}

fn format_window(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!(
            "{} - {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            end.year()
        )
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}
