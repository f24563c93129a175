//! Top-cities matching: a gazetteer pass for well-known cities, then a
//! generic "Name 12.3%" pass guarded by a rejection filter.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use dashmetrics_core::{CityShare, ExtractionLimits};
use regex::Regex;

use crate::numeric::parse_percent;
use crate::scan::{compile, PERCENT};
use crate::section::{locate, SectionRule};

const LOCATION_MARKERS: &[&str] = &[
    "top cities",
    "top locations",
    "cities",
    "locations",
    "where your followers",
];

const LOCATION_END_MARKERS: &[&str] = &["age range", "gender", "by content type"];

/// Cities matched verbatim (case-insensitive) before any heuristic runs.
pub(crate) const KNOWN_CITIES: &[&str] = &[
    // North America
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
    "Austin",
    "Miami",
    "Atlanta",
    "Boston",
    "Seattle",
    "Denver",
    "Las Vegas",
    "Portland",
    "San Francisco",
    "Washington",
    "Nashville",
    "Orlando",
    "Toronto",
    "Montreal",
    "Vancouver",
    "Calgary",
    "Mexico City",
    "Guadalajara",
    "Monterrey",
    // South America
    "São Paulo",
    "Sao Paulo",
    "Rio de Janeiro",
    "Buenos Aires",
    "Bogotá",
    "Bogota",
    "Lima",
    "Santiago",
    "Medellín",
    "Medellin",
    "Caracas",
    // Europe
    "London",
    "Manchester",
    "Birmingham",
    "Paris",
    "Berlin",
    "Madrid",
    "Barcelona",
    "Rome",
    "Milan",
    "Amsterdam",
    "Brussels",
    "Vienna",
    "Lisbon",
    "Dublin",
    "Stockholm",
    "Copenhagen",
    "Oslo",
    "Warsaw",
    "Prague",
    "Budapest",
    "Athens",
    "Istanbul",
    "Moscow",
    "Kyiv",
    "Munich",
    "Hamburg",
    "Zurich",
    // Africa & Middle East
    "Lagos",
    "Cairo",
    "Nairobi",
    "Johannesburg",
    "Cape Town",
    "Accra",
    "Casablanca",
    "Dubai",
    "Abu Dhabi",
    "Riyadh",
    "Tel Aviv",
    // Asia & Oceania
    "Tokyo",
    "Osaka",
    "Seoul",
    "Beijing",
    "Shanghai",
    "Hong Kong",
    "Singapore",
    "Bangkok",
    "Jakarta",
    "Manila",
    "Kuala Lumpur",
    "Ho Chi Minh City",
    "Hanoi",
    "Mumbai",
    "Delhi",
    "New Delhi",
    "Bangalore",
    "Karachi",
    "Lahore",
    "Dhaka",
    "Sydney",
    "Melbourne",
    "Brisbane",
    "Auckland",
];

/// Dashboard words that look like names when followed by a percentage.
const STOP_WORDS: &[&str] = &[
    "all",
    "followers",
    "non-followers",
    "non followers",
    "posts",
    "cities",
    "city",
    "countries",
    "country",
    "top",
    "locations",
    "location",
    "stories",
    "reels",
    "videos",
    "by",
    "content",
    "type",
    "where",
    "your",
    "are",
    "from",
    "indie",
    "men",
    "women",
    "male",
    "female",
    "age",
    "range",
    "gender",
    "audience",
    "views",
    "reach",
    "interactions",
    "accounts",
    "reached",
    "engaged",
    "overall",
    "follows",
    "unfollows",
    "engagement",
    "rate",
    "growth",
    "impressions",
    "saves",
    "shares",
    "likes",
    "comments",
    "profile",
    "visits",
    "external",
    "link",
    "taps",
    "last",
    "days",
    "total",
    "other",
    "others",
];

/// Rejected as a whole name but never stripped as a prefix, so "The Hague"
/// survives heading removal.
const ARTICLES: &[&str] = &["the", "and", "of", "in"];

/// Substrings that betray a line bleeding in from another card, e.g.
/// content-type rows below the locations list.
const REJECTED_FRAGMENTS: &[&str] = &["indie", "reels", "posts", "stories"];

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 35;

/// Longest names first, so "New Delhi" claims its span before "Delhi".
/// The generic pass skips anything overlapping a claimed span.
static KNOWN_CITY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    let mut cities: Vec<&'static str> = KNOWN_CITIES.to_vec();
    cities.sort_by_key(|city| std::cmp::Reverse(city.chars().count()));
    cities
        .into_iter()
        .map(|city| {
            let pattern = format!(
                r"(?i)\b{}\b\s*:?\s*(?P<num>{PERCENT})\s*%",
                regex::escape(city)
            );
            (city, compile(&pattern))
        })
        .collect()
});

static GENERIC_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(&format!(
            r"(?m)^[ \t]*(?P<name>\p{{L}}[\p{{L}} '’\-]{{1,39}}?)[ \t]*(?P<num>{PERCENT})[ \t]*%"
        )),
        compile(&format!(
            r"\b(?P<name>\p{{L}}[\p{{L}} '’\-]{{1,39}}?)[ \t]*(?P<num>{PERCENT})[ \t]*%"
        )),
    ]
});

/// Extracts top cities from the locations section, sorted descending by
/// percentage and unique per `(lowercased name, percentage)`.
#[must_use]
pub fn extract_top_cities(text: &str, limits: &ExtractionLimits) -> Vec<CityShare> {
    let rule = SectionRule::new(LOCATION_MARKERS)
        .window(limits.locations_window)
        .ending_at(LOCATION_END_MARKERS, limits.section_end_min_offset);
    let section = locate(text, &rule);

    let mut seen: HashSet<(String, u64)> = HashSet::new();
    let mut cities: Vec<CityShare> = Vec::new();
    let mut push = |name: String, percentage: f64| {
        if seen.insert((name.to_lowercase(), percentage.to_bits())) {
            cities.push(CityShare { name, percentage });
        }
    };

    let mut claimed: Vec<Range<usize>> = Vec::new();
    for (city, re) in KNOWN_CITY_PATTERNS.iter() {
        for caps in re.captures_iter(section) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let span = whole.range();
            if overlaps(&claimed, &span) {
                continue;
            }
            if let Some(percentage) = caps.name("num").and_then(|m| city_percent(m.as_str())) {
                claimed.push(span);
                push((*city).to_string(), percentage);
            }
        }
    }

    for re in GENERIC_PATTERNS.iter() {
        for caps in re.captures_iter(section) {
            let (Some(name), Some(num)) = (caps.name("name"), caps.name("num")) else {
                continue;
            };
            let span = name.start()..num.end();
            if overlaps(&claimed, &span) {
                continue;
            }
            let Some(percentage) = city_percent(num.as_str()) else {
                continue;
            };
            match clean_candidate(name.as_str()) {
                Some(name) => push(name, percentage),
                None => tracing::trace!(candidate = name.as_str(), "rejected city candidate"),
            }
        }
    }

    cities.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    cities
}

fn overlaps(claimed: &[Range<usize>], span: &Range<usize>) -> bool {
    claimed.iter().any(|c| c.start < span.end && span.start < c.end)
}

/// City shares must be strictly positive.
fn city_percent(raw: &str) -> Option<f64> {
    parse_percent(raw).filter(|&p| p > 0.0)
}

/// Normalizes a generic candidate and applies the rejection filter.
///
/// Candidates mentioning another card's rows are dropped outright. Leading
/// heading words ("Top cities", "Where your followers are") are then
/// stripped so a heading printed on the same line as the first row does not
/// swallow the city name.
pub(crate) fn clean_candidate(raw: &str) -> Option<String> {
    let raw_lower = raw.to_lowercase();
    if REJECTED_FRAGMENTS.iter().any(|frag| raw_lower.contains(frag)) {
        return None;
    }

    let words: Vec<&str> = raw
        .split_whitespace()
        .skip_while(|w| is_stop_word(w))
        .collect();
    let name = words.join(" ");

    if is_rejected(&name) {
        return None;
    }
    Some(name)
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word.to_lowercase().as_str())
}

fn is_rejected(name: &str) -> bool {
    let chars = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&chars) {
        return true;
    }
    let lower = name.to_lowercase();
    if STOP_WORDS.contains(&lower.as_str()) || ARTICLES.contains(&lower.as_str()) {
        return true;
    }
    if name.chars().any(|c| c.is_ascii_digit()) || name.ends_with('-') {
        return true;
    }
    // A lone "li" token is the clipped tail of a "Reels"/"Stories" row.
    lower.split_whitespace().any(|w| w == "li")
}

#[cfg(test)]
#[path = "cities_test.rs"]
mod tests;
