//! Extraction engine turning dashboard-screenshot OCR text into a
//! [`MetricsRecord`](dashmetrics_core::MetricsRecord).
//!
//! Every extractor degrades to "no match" on malformed input; nothing here
//! returns an error.

pub mod assemble;
pub mod audience;
pub mod cities;
pub mod date_range;
pub mod fields;
pub mod interactions;
pub mod numeric;
pub mod pages;
mod scan;
pub mod section;

pub use assemble::{extract_metrics, MetricsExtractor};
pub use audience::{extract_age_ranges, extract_content_breakdown, extract_gender};
pub use cities::extract_top_cities;
pub use date_range::extract_date_range;
pub use fields::{
    extract_accounts_reached, extract_accounts_reached_change, extract_engagement_rate,
    extract_external_link_taps, extract_follower_split, extract_followers, extract_growth,
    extract_impressions, extract_profile_visits, extract_reach, extract_saves, extract_shares,
    extract_views, FollowerSplit,
};
pub use interactions::extract_interactions;
pub use numeric::{parse_count, parse_number, parse_percent, try_parse_number};
pub use pages::combine_page_texts;
pub use section::{find_marker, locate, locate_bounded, SectionRule};
