//! End-to-end tests for the assembled engine over dashboard-like OCR dumps.
//!
//! Each page mimics one screenshot of an insights dashboard; pages are
//! combined the same way the CLI combines them before extraction.

use chrono::NaiveDate;
use dashmetrics_core::{AgeRange, ContentType, GenderSplit, MetricsRecord, PageText};
use dashmetrics_extract::{combine_page_texts, extract_metrics, MetricsExtractor};

const OVERVIEW_PAGE: &str = "Followers 1,050
Mar 4 - Mar 10, 2024
Views
12,345
Followers 62.3%
Non-followers 37.7%
Accounts reached
3,210
+12.3%
Interactions
1,234
Followers 88.5%
Non-followers 11.5%
Profile activity
Profile visits 312
External link taps 41";

const GROWTH_PAGE: &str = "Growth
Overall
-12
Follows
34
Unfollows
46
By content type
Reels 55.5%
Stories 30%
Posts 14.5%";

const AUDIENCE_PAGE: &str = "Top cities
Los Angeles 24.5%
New York 10%
Age range
18-24 40%
25-34 35.5%
Gender
Men 45%
Women 55%";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn dashboard() -> String {
    combine_page_texts(&[OVERVIEW_PAGE, GROWTH_PAGE, AUDIENCE_PAGE])
}

// ---------------------------------------------------------------------------
// full dashboard
// ---------------------------------------------------------------------------

#[test]
fn full_dashboard_counts() {
    let record = extract_metrics(&dashboard(), today());

    assert_eq!(record.followers, Some(1_050));
    assert_eq!(record.views, Some(12_345));
    assert_eq!(record.accounts_reached, Some(3_210));
    assert_eq!(record.accounts_reached_change.as_deref(), Some("+12.3%"));
    assert_eq!(record.interactions, Some(1_234));
    assert_eq!(record.profile_visits, Some(312));
    assert_eq!(record.external_link_taps, Some(41));
    assert_eq!(record.reach, None);
    assert_eq!(record.saves, None);
}

#[test]
fn full_dashboard_follower_percentages_per_block() {
    let record = extract_metrics(&dashboard(), today());

    assert_eq!(record.views_follower_percent, Some(62.3));
    assert_eq!(record.non_follower_percent, Some(37.7));
    assert_eq!(record.interactions_follower_percent, Some(88.5));
}

#[test]
fn full_dashboard_breakdowns() {
    let record = extract_metrics(&dashboard(), today());

    let content: Vec<(ContentType, f64)> = record
        .content_breakdown
        .iter()
        .map(|s| (s.content_type, s.percentage))
        .collect();
    assert_eq!(
        content,
        vec![
            (ContentType::Reels, 55.5),
            (ContentType::Stories, 30.0),
            (ContentType::Posts, 14.5),
        ]
    );

    let cities: Vec<(&str, f64)> = record
        .top_cities
        .iter()
        .map(|c| (c.name.as_str(), c.percentage))
        .collect();
    assert_eq!(cities, vec![("Los Angeles", 24.5), ("New York", 10.0)]);

    let ages: Vec<(AgeRange, f64)> = record
        .age_ranges
        .iter()
        .map(|a| (a.range, a.percentage))
        .collect();
    assert_eq!(
        ages,
        vec![(AgeRange::From18To24, 40.0), (AgeRange::From25To34, 35.5)]
    );

    assert_eq!(
        record.gender,
        Some(GenderSplit {
            men: 45.0,
            women: 55.0
        })
    );
}

#[test]
fn full_dashboard_growth_and_period() {
    let record = extract_metrics(&dashboard(), today());

    let growth = record.growth.expect("growth present");
    assert_eq!(growth.overall, Some(-12));
    assert_eq!(growth.follows, Some(34));
    assert_eq!(growth.unfollows, Some(46));
    assert_eq!(record.date_range.as_deref(), Some("Mar 4 - Mar 10, 2024"));
}

#[test]
fn relative_period_uses_injected_date() {
    let record = extract_metrics("Last 7 days\nViews 900", today());
    assert_eq!(record.date_range.as_deref(), Some("Mar 4 - Mar 10, 2024"));
    assert_eq!(record.views, Some(900));
}

// ---------------------------------------------------------------------------
// serialization shape
// ---------------------------------------------------------------------------

#[test]
fn dashboard_json_omits_absent_fields() {
    let record = extract_metrics(&dashboard(), today());
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["views"], 12_345);
    assert_eq!(json["topCities"][0]["name"], "Los Angeles");
    assert_eq!(json["contentBreakdown"][0]["type"], "Reels");
    assert_eq!(json["ageRanges"][0]["range"], "18-24");
    assert!(json.get("reach").is_none());
    assert!(json.get("engagementRatePercent").is_none());
}

#[test]
fn unrelated_text_serializes_to_empty_object() {
    for text in ["", "lorem ipsum dolor sit amet", "!!! ??? ...", "\n\n\n"] {
        let record = extract_metrics(text, today());
        assert!(record.is_empty(), "expected empty record for {text:?}");
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}

// ---------------------------------------------------------------------------
// engine properties
// ---------------------------------------------------------------------------

#[test]
fn extraction_is_idempotent() {
    let text = dashboard();
    let first = serde_json::to_string(&extract_metrics(&text, today())).unwrap();
    let second = serde_json::to_string(&extract_metrics(&text, today())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_callers_agree() {
    let text = dashboard();
    let extractor = MetricsExtractor::default();
    let expected = extractor.extract(&text, today());

    let results: Vec<MetricsRecord> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| extractor.extract(&text, today())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for record in results {
        assert_eq!(record, expected);
    }
}

#[test]
fn content_breakdown_is_bounded_and_sorted() {
    let full = dashboard();
    let inputs = [
        "By content type\nReels 250%\nStories 99,9%\nPosts 100%",
        "By content type\nPosts 12%\nReels 12%\nStories 40%",
        "Stories 3%\nReels 0%",
        full.as_str(),
    ];
    for text in inputs {
        let shares = extract_metrics(text, today()).content_breakdown;
        assert!(shares.iter().all(|s| (0.0..=100.0).contains(&s.percentage)));
        assert!(shares
            .windows(2)
            .all(|pair| pair[0].percentage >= pair[1].percentage));
    }
}

#[test]
fn out_of_range_content_share_is_dropped() {
    let record = extract_metrics(
        "By content type\nReels 250%\nStories 99,9%\nPosts 100%",
        today(),
    );
    let content: Vec<(ContentType, f64)> = record
        .content_breakdown
        .iter()
        .map(|s| (s.content_type, s.percentage))
        .collect();
    assert_eq!(
        content,
        vec![(ContentType::Posts, 100.0), (ContentType::Stories, 99.9)]
    );
}

// ---------------------------------------------------------------------------
// page fan-in
// ---------------------------------------------------------------------------

#[test]
fn report_over_pages_matches_combined_text() {
    let pages = vec![
        PageText::recognized(2, "audience.png", AUDIENCE_PAGE),
        PageText::recognized(0, "overview.png", OVERVIEW_PAGE),
        PageText::failed(3, "blurry.png", "text detection failed"),
        PageText::recognized(1, "growth.png", GROWTH_PAGE),
    ];
    let report = MetricsExtractor::default().extract_pages(pages, today());

    assert_eq!(report.metrics, extract_metrics(&dashboard(), today()));
    assert_eq!(report.failed_pages(), 1);
    assert_eq!(report.pages[3].source, "blurry.png");
}
