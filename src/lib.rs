pub mod schema;
pub mod dataset;
pub mod cleaner;
pub mod ingest;
pub mod aggregate;
pub mod chart;
pub mod insight;
pub mod server;

#[cfg(test)]
mod integration_tests;

pub use schema::{canonicalize, ColumnMap, RequiredField, SchemaError};
pub use dataset::{CleanRecord, CleaningReport, Dataset};
pub use cleaner::{clean, coerce_engagements, parse_date};
pub use ingest::{ingest_csv, read_csv, PipelineError, RawTable};
pub use aggregate::{
    compute_view,
    engagement_trend,
    media_type_mix,
    platform_engagements,
    sentiment_breakdown,
    top_locations,
    DashboardSummary,
    SummaryView,
    UnknownView,
    ViewEntry,
    ViewKind,
};
pub use chart::{chart_spec, ChartKind, ChartSpec};
pub use insight::{build_prompt, fallback_message, InsightClient, InsightConfig, InsightError};
pub use server::{run_server, ApiError, AppState, DashboardSession, ServerConfig};
