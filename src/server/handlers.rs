//! HTTP request handlers for the dashboard API
//!
//! One upload triggers one full pipeline pass (normalize -> clean ->
//! aggregate) before the response is produced; summary views are recomputed
//! from the session's Dataset on every request rather than cached.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::error::ApiError;
use super::state::{AppState, DashboardSession, MAX_SESSIONS};
use crate::aggregate::{self, DashboardSummary, SummaryView, ViewKind};
use crate::chart::{chart_spec, ChartSpec};
use crate::dataset::{CleaningReport, Dataset};
use crate::ingest;
use crate::insight;

/// Health check endpoint
///
/// Returns a simple status response to verify the server is running
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

/// Response for the static view catalog
#[derive(Debug, Serialize)]
pub struct ViewCatalogResponse {
    pub views: Vec<ChartSpec>,
}

/// GET /views - List the five dashboard views and their chart shapes
pub async fn list_views() -> Json<ViewCatalogResponse> {
    let views = ViewKind::ALL.iter().map(|kind| chart_spec(*kind)).collect();
    Json(ViewCatalogResponse { views })
}

/// Response describing a session and its most recent upload
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub report: CleaningReport,
    pub created_at: String,
    pub uploaded_at: String,
}

impl SessionResponse {
    fn from_session(session: &DashboardSession) -> Self {
        SessionResponse {
            session_id: session.id.to_string(),
            report: session.report,
            created_at: session.created_at.to_rfc3339(),
            uploaded_at: session.uploaded_at.to_rfc3339(),
        }
    }
}

/// Runs the full pipeline on an uploaded CSV body.
///
/// A schema failure surfaces as 422 naming the missing fields; row-level
/// problems are absorbed into the CleaningReport instead of failing the
/// upload.
fn run_pipeline(body: &str) -> Result<(Dataset, CleaningReport), ApiError> {
    let (dataset, report) = ingest::ingest_csv(body)?;
    Ok((dataset, report))
}

/// POST /sessions - Upload a CSV and create a session around it
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<SessionResponse>, ApiError> {
    let (dataset, report) = run_pipeline(&body)?;

    let mut sessions = state.sessions.write().await;
    if sessions.len() >= MAX_SESSIONS {
        return Err(ApiError::SessionLimitReached);
    }

    let session = DashboardSession::new(dataset, report);
    let response = SessionResponse::from_session(&session);
    tracing::info!(session_id = %session.id, rows = report.final_row_count, "created session");
    sessions.insert(session.id, session);

    Ok(Json(response))
}

/// PUT /sessions/:session_id - Replace the session's dataset wholesale
pub async fn replace_session_data(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    body: String,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    // Clean outside the lock; the swap itself is a single write.
    let (dataset, report) = run_pipeline(&body)?;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;

    session.replace_upload(dataset, report);
    tracing::info!(session_id = %session_id, rows = report.final_row_count, "replaced session dataset");

    Ok(Json(SessionResponse::from_session(session)))
}

/// GET /sessions/:session_id - Session status and cleaning report
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;

    Ok(Json(SessionResponse::from_session(session)))
}

/// Response for session deletion
#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub session_id: String,
    pub message: String,
}

/// DELETE /sessions/:session_id - End a session and destroy its Dataset
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteSessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let mut sessions = state.sessions.write().await;
    sessions
        .remove(&session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;

    Ok(Json(DeleteSessionResponse {
        session_id: session_id.to_string(),
        message: "Session ended".to_string(),
    }))
}

/// Response carrying all five summary views with their chart specs
#[derive(Debug, Serialize)]
pub struct AllViewsResponse {
    pub session_id: String,
    pub summary: DashboardSummary,
    pub charts: Vec<ChartSpec>,
}

/// GET /sessions/:session_id/views - All five summary views
pub async fn get_all_views(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AllViewsResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;

    let summary = DashboardSummary::compute(&session.dataset);
    let charts = ViewKind::ALL.iter().map(|kind| chart_spec(*kind)).collect();

    Ok(Json(AllViewsResponse {
        session_id: session_id.to_string(),
        summary,
        charts,
    }))
}

/// Response for a single summary view
#[derive(Debug, Serialize)]
pub struct SingleViewResponse {
    pub session_id: String,
    pub chart: ChartSpec,
    pub view: SummaryView,
}

/// GET /sessions/:session_id/views/:view - One summary view
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path((session_id, view)): Path<(String, String)>,
) -> Result<Json<SingleViewResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let kind: ViewKind = view.parse()?;

    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;

    Ok(Json(SingleViewResponse {
        session_id: session_id.to_string(),
        chart: chart_spec(kind),
        view: aggregate::compute_view(&session.dataset, kind),
    }))
}

/// Response for a view's generated insight
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub session_id: String,
    pub view: ViewKind,
    /// Generated commentary, or the fallback message when generation failed
    pub text: String,
    /// True when `text` is the fallback message rather than generated prose
    pub error: bool,
}

/// GET /sessions/:session_id/views/:view/insight - Commentary for one view
///
/// A failed generation is recovered locally: the response carries the
/// fallback message with `error: true` and HTTP 200, and no other view is
/// affected. There is no automatic retry.
pub async fn get_view_insight(
    State(state): State<Arc<AppState>>,
    Path((session_id, view)): Path<(String, String)>,
) -> Result<Json<InsightResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let kind: ViewKind = view.parse()?;

    // Compute the view under the read lock, then release it before the
    // external call so a slow service never blocks other sessions.
    let summary = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&session_id)
            .ok_or(ApiError::SessionNotFound(session_id))?;
        aggregate::compute_view(&session.dataset, kind)
    };

    let (text, error) = match state.insights.generate_insight(&summary).await {
        Ok(text) => (text, false),
        Err(err) => {
            tracing::warn!(session_id = %session_id, view = %kind, error = %err, "insight generation failed");
            (insight::fallback_message(kind, &err), true)
        }
    };

    Ok(Json(InsightResponse {
        session_id: session_id.to_string(),
        view: kind,
        text,
        error,
    }))
}

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidParameter("Invalid session ID".to_string()))
}
