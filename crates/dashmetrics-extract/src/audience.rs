//! Audience breakdowns: gender split, age buckets and content type shares.

use std::slice;
use std::sync::LazyLock;

use dashmetrics_core::{
    AgeRange, AgeShare, ContentShare, ContentType, ExtractionLimits, GenderSplit,
};
use regex::Regex;

use crate::numeric::parse_percent;
use crate::scan::{compile, first_valid, PERCENT};
use crate::section::{locate, SectionRule};

const GENDER_MARKERS: &[&str] = &["gender", "audience"];
const CONTENT_TYPE_MARKERS: &[&str] = &["by content type"];

static MEN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b(?:men|male|man)\b\s*:?\s*(?P<num>{PERCENT})\s*%"
    ))
});

/// `Womcn` is a frequent OCR misread of `Women`.
static WOMEN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b(?:women|female|wom[ae]n|womcn)\b\s*:?\s*(?P<num>{PERCENT})\s*%"
    ))
});

static AGE_BUCKETS: LazyLock<Vec<(AgeRange, Regex)>> = LazyLock::new(|| {
    AgeRange::ALL
        .iter()
        .map(|&range| {
            let bounds = match range.bounds() {
                (low, Some(high)) => format!(r"\b{low}(?:\s*[-–—]\s*|\s+){high}\b"),
                (low, None) => format!(r"\b{low}\s*\+"),
            };
            let pattern = format!(r"{bounds}\s*:?\s*(?P<num>{PERCENT})\s*%");
            (range, compile(&pattern))
        })
        .collect()
});

/// Labels tolerate the usual OCR swaps (`0`/`o`, `1`/`l`/`i`, `3`/`e`).
/// "Posts from ..." is a different row and is skipped.
static CONTENT_TYPES: LazyLock<[(ContentType, Regex); 3]> = LazyLock::new(|| {
    let pattern = |label: &str| {
        compile(&format!(
            r"(?i){label}\s*[:·]?\s*(?P<num>{PERCENT})\s*%"
        ))
    };
    ContentType::ALL.map(|content_type| {
        let label = match content_type {
            ContentType::Stories => r"\bst[o0]r[il1]es\b",
            ContentType::Posts => r"\bp[o0]sts?\b(?P<skip>\s+from\b[^\d%]*)?",
            ContentType::Reels => r"\br[e3]e[l1i]s\b",
        };
        (content_type, pattern(label))
    })
});

/// Gender split from the gender/audience section, `None` unless at least
/// one side matched.
#[must_use]
pub fn extract_gender(text: &str, limits: &ExtractionLimits) -> Option<GenderSplit> {
    let rule = SectionRule::new(GENDER_MARKERS).window(limits.gender_window);
    let section = locate(text, &rule);

    let men = first_valid(slice::from_ref(&*MEN), section, parse_percent);
    let women = first_valid(slice::from_ref(&*WOMEN), section, parse_percent);
    if men.is_none() && women.is_none() {
        return None;
    }
    Some(GenderSplit {
        men: men.unwrap_or(0.0),
        women: women.unwrap_or(0.0),
    })
}

/// Age buckets found anywhere in the text, sorted descending.
#[must_use]
pub fn extract_age_ranges(text: &str) -> Vec<AgeShare> {
    let mut shares: Vec<AgeShare> = AGE_BUCKETS
        .iter()
        .filter_map(|(range, re)| {
            let percentage = first_valid(slice::from_ref(re), text, parse_percent)?;
            Some(AgeShare {
                range: *range,
                percentage,
            })
        })
        .collect();
    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}

/// Content type shares from the "by content type" section, sorted descending.
#[must_use]
pub fn extract_content_breakdown(text: &str, limits: &ExtractionLimits) -> Vec<ContentShare> {
    let rule = SectionRule::new(CONTENT_TYPE_MARKERS).window(limits.content_type_window);
    let section = locate(text, &rule);

    let mut shares: Vec<ContentShare> = CONTENT_TYPES
        .iter()
        .filter_map(|(content_type, re)| {
            let percentage = first_valid(slice::from_ref(re), section, parse_percent)?;
            tracing::trace!(content_type = %content_type, percentage, "content share");
            Some(ContentShare {
                content_type: *content_type,
                percentage,
            })
        })
        .collect();
    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}
