use serde::{Deserialize, Serialize};

/// Structured metrics recovered from the OCR text of one or more dashboard
/// screenshots.
///
/// Every field is optional: an extraction run over unrelated text yields an
/// empty record rather than an error. Absent fields and empty lists are
/// omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_reached: Option<u64>,
    /// Trend shown under "Accounts reached", kept verbatim (e.g. `"+12.3%"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_reached_change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_visits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link_taps: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saves: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    /// Share of views that came from followers, in `[0, 100]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_follower_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_follower_percent: Option<f64>,
    /// Share of interactions that came from followers, in `[0, 100]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions_follower_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate_percent: Option<f64>,
    /// Sorted descending by percentage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_breakdown: Vec<ContentShare>,
    /// Sorted descending by percentage, unique per `(lowercased name, percentage)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_cities: Vec<CityShare>,
    /// Sorted descending by percentage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub age_ranges: Vec<AgeShare>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderSplit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<Growth>,
    /// Display string such as `"Mar 4 - Mar 10, 2024"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl MetricsRecord {
    /// Returns `true` when no field was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of top-level fields that carry a value.
    #[must_use]
    pub fn populated_fields(&self) -> usize {
        let scalars = [
            self.views.is_some(),
            self.followers.is_some(),
            self.interactions.is_some(),
            self.accounts_reached.is_some(),
            self.accounts_reached_change.is_some(),
            self.profile_visits.is_some(),
            self.external_link_taps.is_some(),
            self.saves.is_some(),
            self.shares.is_some(),
            self.impressions.is_some(),
            self.reach.is_some(),
            self.views_follower_percent.is_some(),
            self.non_follower_percent.is_some(),
            self.interactions_follower_percent.is_some(),
            self.engagement_rate_percent.is_some(),
            !self.content_breakdown.is_empty(),
            !self.top_cities.is_empty(),
            !self.age_ranges.is_empty(),
            self.gender.is_some(),
            self.growth.is_some(),
            self.date_range.is_some(),
        ];
        scalars.iter().filter(|&&present| present).count()
    }
}

/// Dashboard content categories shown under "By content type".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Stories,
    Posts,
    Reels,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Stories, ContentType::Posts, ContentType::Reels];
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Stories => write!(f, "Stories"),
            ContentType::Posts => write!(f, "Posts"),
            ContentType::Reels => write!(f, "Reels"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentShare {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityShare {
    pub name: String,
    pub percentage: f64,
}

/// Fixed audience age buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "13-17")]
    From13To17,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-64")]
    From55To64,
    #[serde(rename = "65+")]
    From65,
}

impl AgeRange {
    pub const ALL: [AgeRange; 7] = [
        AgeRange::From13To17,
        AgeRange::From18To24,
        AgeRange::From25To34,
        AgeRange::From35To44,
        AgeRange::From45To54,
        AgeRange::From55To64,
        AgeRange::From65,
    ];

    /// Lower and upper bound of the bucket. `65+` has no upper bound.
    #[must_use]
    pub fn bounds(self) -> (u8, Option<u8>) {
        match self {
            AgeRange::From13To17 => (13, Some(17)),
            AgeRange::From18To24 => (18, Some(24)),
            AgeRange::From25To34 => (25, Some(34)),
            AgeRange::From35To44 => (35, Some(44)),
            AgeRange::From45To54 => (45, Some(54)),
            AgeRange::From55To64 => (55, Some(64)),
            AgeRange::From65 => (65, None),
        }
    }
}

impl std::fmt::Display for AgeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bounds() {
            (low, Some(high)) => write!(f, "{low}-{high}"),
            (low, None) => write!(f, "{low}+"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeShare {
    pub range: AgeRange,
    pub percentage: f64,
}

/// Audience gender split. Once either side is recovered, the other defaults to `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub men: f64,
    pub women: f64,
}

/// Follower growth figures. Present only when at least one sub-field was recovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Growth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfollows: Option<u64>,
}

impl Growth {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall.is_none() && self.follows.is_none() && self.unfollows.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_serializes_to_empty_object() {
        let json = serde_json::to_string(&MetricsRecord::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let record = MetricsRecord {
            views_follower_percent: Some(62.5),
            accounts_reached: Some(1_200),
            ..MetricsRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["viewsFollowerPercent"], 62.5);
        assert_eq!(json["accountsReached"], 1_200);
        assert!(json.get("views").is_none());
    }

    #[test]
    fn gender_serializes_both_sides() {
        let record = MetricsRecord {
            gender: Some(GenderSplit {
                men: 40.0,
                women: 0.0,
            }),
            ..MetricsRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gender"]["men"], 40.0);
        assert_eq!(json["gender"]["women"], 0.0);
    }

    #[test]
    fn content_share_uses_type_key() {
        let share = ContentShare {
            content_type: ContentType::Reels,
            percentage: 51.2,
        };
        let json = serde_json::to_value(&share).unwrap();
        assert_eq!(json["type"], "Reels");
    }

    #[test]
    fn content_type_display_matches_serde_label() {
        for content_type in ContentType::ALL {
            let json = serde_json::to_value(content_type).unwrap();
            assert_eq!(json, content_type.to_string());
        }
    }

    #[test]
    fn age_range_serializes_to_label() {
        let json = serde_json::to_value(AgeRange::From65).unwrap();
        assert_eq!(json, "65+");
        let json = serde_json::to_value(AgeRange::From25To34).unwrap();
        assert_eq!(json, "25-34");
    }

    #[test]
    fn age_range_display_matches_serde_label() {
        for range in AgeRange::ALL {
            let json = serde_json::to_value(range).unwrap();
            assert_eq!(json, range.to_string());
        }
    }

    #[test]
    fn populated_fields_counts_lists_and_scalars() {
        let record = MetricsRecord {
            views: Some(10),
            top_cities: vec![CityShare {
                name: "Paris".to_owned(),
                percentage: 5.0,
            }],
            ..MetricsRecord::default()
        };
        assert_eq!(record.populated_fields(), 2);
        assert!(!record.is_empty());
        assert!(MetricsRecord::default().is_empty());
    }

    #[test]
    fn growth_omits_absent_sub_fields() {
        let growth = Growth {
            overall: Some(-4),
            ..Growth::default()
        };
        let json = serde_json::to_string(&growth).unwrap();
        assert_eq!(json, r#"{"overall":-4}"#);
    }
}
