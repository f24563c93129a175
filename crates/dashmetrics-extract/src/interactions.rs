//! Interactions total: a six-stage fallback cascade.
//!
//! OCR of the interactions card mixes the total with follower percentages,
//! day counts from the period selector ("Last 30 days") and dates, so each
//! stage widens the search only after the stricter ones found nothing.
//! Stages are plain functions in an ordered table; the first `Some` wins.

use std::sync::LazyLock;

use dashmetrics_core::ExtractionLimits;
use regex::Regex;

use crate::fields::INTERACTIONS_MARKERS;
use crate::numeric::parse_count;
use crate::scan::{compile, first_valid, COUNT_TAIL, NUMBER};
use crate::section::{locate_bounded, SectionRule};

/// Values that show up next to the label far more often as artifacts (a
/// stray `1`, the `30`/`31` of a date row) than as real totals.
const ARTIFACT_VALUES: &[u64] = &[1, 30, 31];

/// Stage 3 only: `30` is kept unless the section mentions a 30-day period.
const LINE_SUFFIX_ARTIFACTS: &[u64] = &[1, 31];

const GROWTH_MARKERS: &[&str] = &["growth"];
const CONTENT_TYPE_MARKERS: &[&str] = &["by content type"];

static LABEL_ADJACENT: LazyLock<[Regex; 1]> = LazyLock::new(|| {
    [compile(&format!(
        r"(?i)interacti[o0]ns\s*:?\s*(?P<num>{NUMBER}){COUNT_TAIL}"
    ))]
});

static STANDALONE_LINE: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^(?:{NUMBER})$")));

static LINE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\s(?P<num>{NUMBER})$")));

/// Any digit run, including embedded separators, so decimals and dates can
/// be recognized and skipped as a whole.
static NUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\d(?:[\d,.]*\d)?"));

static COMMA_GROUPED: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{1,3}(?:,\d{3})+$"));

/// Looser label (`interact\w*`) so OCR variants the section markers miss
/// still anchor the final fallback.
static UNSCOPED_LABEL: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(&format!(
            r"(?i)\binteract\w*\D{{0,40}}?(?P<num>{NUMBER}){COUNT_TAIL}"
        )),
        compile(&format!(
            r"(?i)(?P<num>{NUMBER}){COUNT_TAIL}\D{{0,40}}?\binteract\w*"
        )),
    ]
});

/// Everything a stage may look at. Sections are `None` when the text has no
/// interactions marker, which disables the section-scoped stages.
struct Scope<'t> {
    text: &'t str,
    /// From the marker to the next "growth" marker or the window cap.
    section: Option<&'t str>,
    /// From the marker to "by content type" or the wider window cap.
    content_section: Option<&'t str>,
    limits: &'t ExtractionLimits,
}

type Stage = fn(&Scope<'_>) -> Option<u64>;

const STAGES: &[(&str, Stage)] = &[
    ("label_adjacent", label_adjacent),
    ("standalone_line", standalone_line),
    ("line_suffix", line_suffix),
    ("first_clean_number", first_clean_number),
    ("last_clean_number", last_clean_number),
    ("unscoped_label", unscoped_label),
];

/// Resolves the interactions total, or `None` when every stage fails.
#[must_use]
pub fn extract_interactions(text: &str, limits: &ExtractionLimits) -> Option<u64> {
    let section_rule = SectionRule::new(INTERACTIONS_MARKERS)
        .window(limits.interactions_window)
        .ending_at(GROWTH_MARKERS, limits.section_end_min_offset);
    let content_rule = SectionRule::new(INTERACTIONS_MARKERS)
        .window(limits.content_type_window)
        .ending_at(CONTENT_TYPE_MARKERS, limits.section_end_min_offset);

    let scope = Scope {
        text,
        section: locate_bounded(text, &section_rule),
        content_section: locate_bounded(text, &content_rule),
        limits,
    };

    STAGES.iter().find_map(|(name, stage)| {
        let value = stage(&scope)?;
        tracing::debug!(stage = *name, value, "interactions resolved");
        Some(value)
    })
}

fn is_plausible(value: u64, max: u64, excluded: &[u64]) -> bool {
    (1..=max).contains(&value) && !excluded.contains(&value)
}

/// Stage 1: the number right after the label, unless it is a percentage.
fn label_adjacent(scope: &Scope<'_>) -> Option<u64> {
    let max = scope.limits.interactions_max;
    first_valid(&*LABEL_ADJACENT, scope.text, |raw| {
        parse_count(raw).filter(|&v| is_plausible(v, max, ARTIFACT_VALUES))
    })
}

/// Stage 2: a line that holds nothing but a number.
fn standalone_line(scope: &Scope<'_>) -> Option<u64> {
    let max = scope.limits.interactions_max;
    scope.section?.lines().map(str::trim).find_map(|line| {
        if !STANDALONE_LINE.is_match(line) {
            return None;
        }
        parse_count(line).filter(|&v| is_plausible(v, max, ARTIFACT_VALUES))
    })
}

/// Stage 3: a line ending in a whitespace-separated number.
fn line_suffix(scope: &Scope<'_>) -> Option<u64> {
    let section = scope.section?;
    let max = scope.limits.interactions_max;
    let mentions_30_days = section.to_ascii_lowercase().contains("30 days");

    section.lines().map(str::trim).find_map(|line| {
        let raw = LINE_SUFFIX.captures(line)?.name("num")?.as_str();
        let value = parse_count(raw)?;
        let excluded_30 = mentions_30_days && value == 30;
        (is_plausible(value, max, LINE_SUFFIX_ARTIFACTS) && !excluded_30).then_some(value)
    })
}

/// Stage 4: the first clean number anywhere in the section.
fn first_clean_number(scope: &Scope<'_>) -> Option<u64> {
    let max = scope.limits.interactions_max;
    clean_numbers(scope.section?)
        .into_iter()
        .find(|&v| is_plausible(v, max, ARTIFACT_VALUES))
}

/// Stage 5: the last clean number before "by content type", with the wider
/// cap. Totals tend to sit at the bottom of this block.
fn last_clean_number(scope: &Scope<'_>) -> Option<u64> {
    let max = scope.limits.interactions_wide_max;
    clean_numbers(scope.content_section?)
        .into_iter()
        .rev()
        .find(|&v| is_plausible(v, max, ARTIFACT_VALUES))
}

/// Stage 6: the label anywhere in the text, in either order. Only the
/// artifact values are excluded; no range cap applies here.
fn unscoped_label(scope: &Scope<'_>) -> Option<u64> {
    first_valid(&*UNSCOPED_LABEL, scope.text, |raw| {
        parse_count(raw).filter(|v| !ARTIFACT_VALUES.contains(v))
    })
}

/// Standalone integers in textual order. A run is dropped when it contains
/// a dot, has malformed comma grouping, or is immediately followed by `.`,
/// `,` or `%`; those are fragments of decimals, percentages or dates.
fn clean_numbers(section: &str) -> Vec<u64> {
    NUMERIC_RUN
        .find_iter(section)
        .filter(|m| {
            let run = m.as_str();
            let followed_by_punct = section[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| matches!(c, '.' | ',' | '%'));
            !followed_by_punct
                && !run.contains('.')
                && (!run.contains(',') || COMMA_GROUPED.is_match(run))
        })
        .filter_map(|m| parse_count(m.as_str()))
        .collect()
}

#[cfg(test)]
#[path = "interactions_test.rs"]
mod tests;
