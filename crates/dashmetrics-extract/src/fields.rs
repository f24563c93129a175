//! Label-adjacency extractors for the simple dashboard fields.
//!
//! Every field tries "label then value" before "value then label"; the first
//! capture that survives validation wins. Nothing here fails: an unmatched
//! field is simply `None`.

use std::sync::LazyLock;

use dashmetrics_core::Growth;
use regex::Regex;

use crate::numeric::{parse_count, parse_decimal_prefix, parse_percent, try_parse_number};
use crate::scan::{compile, count_patterns, first_valid, percent_patterns, NUMBER};
use crate::section::find_marker;

/// Markers that open the interactions part of the dashboard. `0` for `o` is
/// a frequent OCR misread.
pub(crate) const INTERACTIONS_MARKERS: &[&str] = &["interactions", "interacti0ns"];

const FOLLOWERS_LABEL: &str = r"(?P<skip>non[\s-]*)?\bfollowers\b";
const NON_FOLLOWERS_LABEL: &str = r"\bnon[\s-]*followers\b";

static VIEWS: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\bviews\b"));
static FOLLOWERS: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(FOLLOWERS_LABEL));
static ACCOUNTS_REACHED: LazyLock<[Regex; 2]> =
    LazyLock::new(|| count_patterns(r"\baccounts?\s+reached\b"));
static PROFILE_VISITS: LazyLock<[Regex; 2]> =
    LazyLock::new(|| count_patterns(r"\bprofile\s+visits\b"));
static EXTERNAL_LINK_TAPS: LazyLock<[Regex; 2]> =
    LazyLock::new(|| count_patterns(r"\bexternal\s+link\s+taps\b"));
static REACH: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\breach\b"));
static SAVES: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\bsaves\b"));
static SHARES: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\bshares\b"));
static IMPRESSIONS: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\bimpressions\b"));

static ENGAGEMENT_RATE: LazyLock<[Regex; 2]> =
    LazyLock::new(|| percent_patterns(r"\bengagement(?:\s+rate)?\b"));
static FOLLOWER_PERCENT: LazyLock<[Regex; 2]> =
    LazyLock::new(|| percent_patterns(FOLLOWERS_LABEL));
static NON_FOLLOWER_PERCENT: LazyLock<[Regex; 2]> =
    LazyLock::new(|| percent_patterns(NON_FOLLOWERS_LABEL));

/// The trend sits right after the label, optionally with the reached count
/// in between ("Accounts reached 1,204 +12.3%"), or further along the same
/// block as a fallback.
static ACCOUNTS_REACHED_CHANGE: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(&format!(
            r"(?i)\baccounts?\s+reached\b\s*:?\s*(?:(?:{NUMBER})\s*)?(?P<num>[+\-−]\s*\d+(?:[.,]\d+)?\s*%)"
        )),
        compile(r"(?i)\baccounts?\s+reached\b[^%]{0,60}?(?P<num>[+\-−]\s*\d+(?:[.,]\d+)?\s*%)"),
    ]
});

static GROWTH_OVERALL: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    let signed = format!(r"[+\-−]?\s*(?:{NUMBER})");
    [
        compile(&format!(
            r"(?i)\boverall\b\s*:?\s*(?P<num>{signed})(?P<tail>[.,]\d|\s*%)?"
        )),
        compile(&format!(
            r"(?i)(?P<num>{signed})(?P<tail>[.,]\d|\s*%)?\s*\boverall\b"
        )),
    ]
});
static GROWTH_FOLLOWS: LazyLock<[Regex; 2]> = LazyLock::new(|| count_patterns(r"\bfollows\b"));
static GROWTH_UNFOLLOWS: LazyLock<[Regex; 2]> =
    LazyLock::new(|| count_patterns(r"\bunfollows\b"));

#[must_use]
pub fn extract_views(text: &str) -> Option<u64> {
    first_valid(&*VIEWS, text, parse_count)
}

#[must_use]
pub fn extract_followers(text: &str) -> Option<u64> {
    first_valid(&*FOLLOWERS, text, parse_count)
}

#[must_use]
pub fn extract_accounts_reached(text: &str) -> Option<u64> {
    first_valid(&*ACCOUNTS_REACHED, text, parse_count)
}

/// Returns the signed trend shown next to "Accounts reached", e.g. `"+12.3%"`,
/// exactly as it appears in the text.
#[must_use]
pub fn extract_accounts_reached_change(text: &str) -> Option<String> {
    first_valid(&*ACCOUNTS_REACHED_CHANGE, text, |raw| {
        let magnitude = parse_decimal_prefix(raw.trim_start_matches(['+', '-', '−']))?;
        magnitude.is_finite().then(|| raw.to_string())
    })
}

#[must_use]
pub fn extract_profile_visits(text: &str) -> Option<u64> {
    first_valid(&*PROFILE_VISITS, text, parse_count)
}

#[must_use]
pub fn extract_external_link_taps(text: &str) -> Option<u64> {
    first_valid(&*EXTERNAL_LINK_TAPS, text, parse_count)
}

#[must_use]
pub fn extract_reach(text: &str) -> Option<u64> {
    first_valid(&*REACH, text, parse_count)
}

#[must_use]
pub fn extract_saves(text: &str) -> Option<u64> {
    first_valid(&*SAVES, text, parse_count)
}

#[must_use]
pub fn extract_shares(text: &str) -> Option<u64> {
    first_valid(&*SHARES, text, parse_count)
}

#[must_use]
pub fn extract_impressions(text: &str) -> Option<u64> {
    first_valid(&*IMPRESSIONS, text, parse_count)
}

#[must_use]
pub fn extract_engagement_rate(text: &str) -> Option<f64> {
    first_valid(&*ENGAGEMENT_RATE, text, parse_percent)
}

/// Follower / non-follower percentages, read per dashboard block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FollowerSplit {
    pub views_follower_percent: Option<f64>,
    pub non_follower_percent: Option<f64>,
    pub interactions_follower_percent: Option<f64>,
}

/// Reads follower percentages, disambiguated by dashboard block.
///
/// The dashboard shows one follower reading under views and another under
/// interactions. When an interactions marker exists the text is split there
/// and each block is searched on its own; otherwise the whole text yields a
/// single views reading. The non-follower share comes from the views block,
/// falling back to the interactions block.
#[must_use]
pub fn extract_follower_split(text: &str) -> FollowerSplit {
    let Some(split_at) = find_marker(text, INTERACTIONS_MARKERS) else {
        return FollowerSplit {
            views_follower_percent: follower_percent(text),
            non_follower_percent: non_follower_percent(text),
            interactions_follower_percent: None,
        };
    };

    let (views_block, interactions_block) = text.split_at(split_at);
    FollowerSplit {
        views_follower_percent: follower_percent(views_block),
        non_follower_percent: non_follower_percent(views_block)
            .or_else(|| non_follower_percent(interactions_block)),
        interactions_follower_percent: follower_percent(interactions_block),
    }
}

fn follower_percent(block: &str) -> Option<f64> {
    first_valid(&*FOLLOWER_PERCENT, block, parse_percent)
}

fn non_follower_percent(block: &str) -> Option<f64> {
    first_valid(&*NON_FOLLOWER_PERCENT, block, parse_percent)
}

/// Follower growth figures; `None` unless at least one sub-field matched.
#[must_use]
pub fn extract_growth(text: &str) -> Option<Growth> {
    let growth = Growth {
        overall: first_valid(&*GROWTH_OVERALL, text, try_parse_number),
        follows: first_valid(&*GROWTH_FOLLOWS, text, parse_count),
        unfollows: first_valid(&*GROWTH_UNFOLLOWS, text, parse_count),
    };
    (!growth.is_empty()).then_some(growth)
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
