//! Summary view computation.
//!
//! Each view is a pure function of an immutable Dataset snapshot: no side
//! effects, no hidden state, identical output on repeated runs. Views are
//! recomputed on every render pass and never persisted.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Maximum number of entries in the top-locations view.
const TOP_LOCATIONS_LIMIT: usize = 5;

/// The five summary views, each feeding exactly one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Sentiment,
    EngagementTrend,
    PlatformEngagements,
    MediaTypeMix,
    TopLocations,
}

impl ViewKind {
    /// All view kinds in render order.
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Sentiment,
        ViewKind::EngagementTrend,
        ViewKind::PlatformEngagements,
        ViewKind::MediaTypeMix,
        ViewKind::TopLocations,
    ];

    /// Path-segment name of the view.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Sentiment => "sentiment",
            ViewKind::EngagementTrend => "engagement_trend",
            ViewKind::PlatformEngagements => "platform_engagements",
            ViewKind::MediaTypeMix => "media_type_mix",
            ViewKind::TopLocations => "top_locations",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Error for a view name that matches none of the five views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view: {}", self.0)
    }
}

impl std::error::Error for UnknownView {}

/// One (key, value) pair of a summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
    /// Categorical or temporal grouping key
    pub key: String,
    /// Count of records or summed engagements, per the view
    pub value: u64,
}

impl ViewEntry {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        ViewEntry {
            key: key.into(),
            value,
        }
    }
}

/// A derived aggregate grouped by one key, in its chart's display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub kind: ViewKind,
    pub entries: Vec<ViewEntry>,
}

/// Groups values and orders the result by descending aggregate, ties broken
/// by first-encountered key order.
///
/// `items` yields (key, addend) per record; counts use an addend of 1.
fn grouped_descending<'a, I>(items: I) -> Vec<ViewEntry>
where
    I: Iterator<Item = (&'a str, u64)>,
{
    let mut totals: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for (key, addend) in items {
        match totals.get_mut(key) {
            Some(total) => *total += addend,
            None => {
                totals.insert(key, addend);
                first_seen.push(key);
            }
        }
    }

    let mut entries: Vec<(usize, &str, u64)> = first_seen
        .iter()
        .enumerate()
        .map(|(order, key)| (order, *key, totals[key]))
        .collect();
    entries.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    entries
        .into_iter()
        .map(|(_, key, value)| ViewEntry::new(key, value))
        .collect()
}

/// Count of records grouped by raw sentiment string (case-sensitive),
/// descending count, ties by first-encountered order.
pub fn sentiment_breakdown(dataset: &Dataset) -> SummaryView {
    SummaryView {
        kind: ViewKind::Sentiment,
        entries: grouped_descending(dataset.records().iter().map(|r| (r.sentiment.as_str(), 1))),
    }
}

/// Sum of engagements by calendar day, chronologically ascending.
///
/// Each date appears at most once; dates with no records are omitted, not
/// interpolated.
pub fn engagement_trend(dataset: &Dataset) -> SummaryView {
    let mut by_day = std::collections::BTreeMap::new();
    for record in dataset.records() {
        *by_day.entry(record.date).or_insert(0u64) += record.engagements;
    }

    SummaryView {
        kind: ViewKind::EngagementTrend,
        entries: by_day
            .into_iter()
            .map(|(date, total)| ViewEntry::new(date.format("%Y-%m-%d").to_string(), total))
            .collect(),
    }
}

/// Sum of engagements grouped by platform string (case-sensitive),
/// descending sum, ties by first-encountered order.
pub fn platform_engagements(dataset: &Dataset) -> SummaryView {
    SummaryView {
        kind: ViewKind::PlatformEngagements,
        entries: grouped_descending(
            dataset
                .records()
                .iter()
                .map(|r| (r.platform.as_str(), r.engagements)),
        ),
    }
}

/// Count of records grouped by media type, descending count, ties by
/// first-encountered order.
pub fn media_type_mix(dataset: &Dataset) -> SummaryView {
    SummaryView {
        kind: ViewKind::MediaTypeMix,
        entries: grouped_descending(dataset.records().iter().map(|r| (r.mediatype.as_str(), 1))),
    }
}

/// Sum of engagements grouped by location, descending, truncated to the top
/// 5. Ties at the cutoff break by first-encountered order; rows beyond the
/// cutoff are dropped, not merged into an "other" bucket.
pub fn top_locations(dataset: &Dataset) -> SummaryView {
    let mut entries = grouped_descending(
        dataset
            .records()
            .iter()
            .map(|r| (r.location.as_str(), r.engagements)),
    );
    entries.truncate(TOP_LOCATIONS_LIMIT);

    SummaryView {
        kind: ViewKind::TopLocations,
        entries,
    }
}

/// All five summary views computed from one Dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub sentiment: SummaryView,
    pub engagement_trend: SummaryView,
    pub platform_engagements: SummaryView,
    pub media_type_mix: SummaryView,
    pub top_locations: SummaryView,
}

impl DashboardSummary {
    /// Computes every view from the same immutable snapshot.
    pub fn compute(dataset: &Dataset) -> Self {
        DashboardSummary {
            sentiment: sentiment_breakdown(dataset),
            engagement_trend: engagement_trend(dataset),
            platform_engagements: platform_engagements(dataset),
            media_type_mix: media_type_mix(dataset),
            top_locations: top_locations(dataset),
        }
    }

    /// The view for a given kind.
    pub fn view(&self, kind: ViewKind) -> &SummaryView {
        match kind {
            ViewKind::Sentiment => &self.sentiment,
            ViewKind::EngagementTrend => &self.engagement_trend,
            ViewKind::PlatformEngagements => &self.platform_engagements,
            ViewKind::MediaTypeMix => &self.media_type_mix,
            ViewKind::TopLocations => &self.top_locations,
        }
    }
}

/// Computes one view from a Dataset.
pub fn compute_view(dataset: &Dataset, kind: ViewKind) -> SummaryView {
    match kind {
        ViewKind::Sentiment => sentiment_breakdown(dataset),
        ViewKind::EngagementTrend => engagement_trend(dataset),
        ViewKind::PlatformEngagements => platform_engagements(dataset),
        ViewKind::MediaTypeMix => media_type_mix(dataset),
        ViewKind::TopLocations => top_locations(dataset),
    }
}
