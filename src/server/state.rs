//! Shared application state for the dashboard API

use crate::dataset::{CleaningReport, Dataset};
use crate::insight::InsightClient;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Maximum number of concurrently held sessions.
pub const MAX_SESSIONS: usize = 100;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Active dashboard sessions, each owning its Dataset
    pub sessions: Arc<RwLock<HashMap<Uuid, DashboardSession>>>,
    /// Client for the external text-generation service
    pub insights: Arc<InsightClient>,
}

impl AppState {
    /// Creates a new application state
    pub fn new(insights: InsightClient) -> Self {
        AppState {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            insights: Arc::new(insights),
        }
    }
}

/// A user session and the one piece of state it retains: the cleaned
/// Dataset from its most recent upload.
///
/// A re-upload replaces `dataset` and `report` wholesale under a single
/// write lock; there is no partial-update or merge path. Sessions are
/// isolated and never share a Dataset.
pub struct DashboardSession {
    /// Unique session identifier
    pub id: Uuid,
    /// Cleaned data from the most recent upload
    pub dataset: Dataset,
    /// Cleaning counters for the most recent upload
    pub report: CleaningReport,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When the current dataset was uploaded
    pub uploaded_at: DateTime<Utc>,
}

impl DashboardSession {
    /// Creates a session around a freshly cleaned upload.
    pub fn new(dataset: Dataset, report: CleaningReport) -> Self {
        let now = Utc::now();
        DashboardSession {
            id: Uuid::new_v4(),
            dataset,
            report,
            created_at: now,
            uploaded_at: now,
        }
    }

    /// Replaces the session's dataset with a new upload.
    pub fn replace_upload(&mut self, dataset: Dataset, report: CleaningReport) {
        self.dataset = dataset;
        self.report = report;
        self.uploaded_at = Utc::now();
    }
}
