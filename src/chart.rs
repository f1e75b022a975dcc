//! Chart descriptors for the presentation layer.
//!
//! Rendering is an external concern; this module only fixes which chart
//! shape each summary view feeds and the labels it carries.

use crate::aggregate::ViewKind;
use serde::{Deserialize, Serialize};

/// Chart shape a view is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Donut,
    Line,
    Bar,
}

/// Static presentation metadata for one summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub view: ViewKind,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// The fixed chart assignment for a view. Users cannot customize chart
/// types; the mapping is part of the dashboard's contract.
pub fn chart_spec(view: ViewKind) -> ChartSpec {
    let (kind, title, x_label, y_label) = match view {
        ViewKind::Sentiment => (ChartKind::Donut, "Sentiment Breakdown", None, None),
        ViewKind::EngagementTrend => (
            ChartKind::Line,
            "Engagement Trend Over Time",
            Some("Date"),
            Some("Total Engagements"),
        ),
        ViewKind::PlatformEngagements => (
            ChartKind::Bar,
            "Platform Engagements",
            Some("Platform"),
            Some("Total Engagements"),
        ),
        ViewKind::MediaTypeMix => (ChartKind::Donut, "Media Type Mix", None, None),
        ViewKind::TopLocations => (
            ChartKind::Bar,
            "Top 5 Locations by Engagements",
            Some("Location"),
            Some("Total Engagements"),
        ),
    };

    ChartSpec {
        view,
        kind,
        title: title.to_string(),
        x_label: x_label.map(String::from),
        y_label: y_label.map(String::from),
    }
}
