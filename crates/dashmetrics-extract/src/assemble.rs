//! Runs every extractor over one OCR text and merges the results.

use chrono::NaiveDate;
use dashmetrics_core::{ExtractionLimits, MetricsRecord};

use crate::audience::{extract_age_ranges, extract_content_breakdown, extract_gender};
use crate::cities::extract_top_cities;
use crate::date_range::extract_date_range;
use crate::fields::{
    extract_accounts_reached, extract_accounts_reached_change, extract_engagement_rate,
    extract_external_link_taps, extract_follower_split, extract_followers, extract_growth,
    extract_impressions, extract_profile_visits, extract_reach, extract_saves, extract_shares,
    extract_views,
};
use crate::interactions::extract_interactions;

/// Extraction engine configured with a set of tuned limits.
///
/// Holds no per-run state: the same extractor can be shared across threads
/// and every call is a pure function of `(text, today)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsExtractor {
    limits: ExtractionLimits,
}

impl MetricsExtractor {
    #[must_use]
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    /// Extracts every recoverable metric from `text`. `today` anchors
    /// relative periods such as "Last 7 days".
    #[must_use]
    pub fn extract(&self, text: &str, today: NaiveDate) -> MetricsRecord {
        let limits = &self.limits;
        let split = extract_follower_split(text);

        let record = MetricsRecord {
            views: extract_views(text),
            followers: extract_followers(text),
            interactions: extract_interactions(text, limits),
            accounts_reached: extract_accounts_reached(text),
            accounts_reached_change: extract_accounts_reached_change(text),
            profile_visits: extract_profile_visits(text),
            external_link_taps: extract_external_link_taps(text),
            saves: extract_saves(text),
            shares: extract_shares(text),
            impressions: extract_impressions(text),
            reach: extract_reach(text),
            views_follower_percent: split.views_follower_percent,
            non_follower_percent: split.non_follower_percent,
            interactions_follower_percent: split.interactions_follower_percent,
            engagement_rate_percent: extract_engagement_rate(text),
            content_breakdown: extract_content_breakdown(text, limits),
            top_cities: extract_top_cities(text, limits),
            age_ranges: extract_age_ranges(text),
            gender: extract_gender(text, limits),
            growth: extract_growth(text),
            date_range: extract_date_range(text, today, limits),
        };

        tracing::debug!(
            text_len = text.len(),
            fields = record.populated_fields(),
            "metrics extracted"
        );
        record
    }
}

/// Extracts metrics with the default limits.
#[must_use]
pub fn extract_metrics(text: &str, today: NaiveDate) -> MetricsRecord {
    MetricsExtractor::default().extract(text, today)
}
