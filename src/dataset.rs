use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cleaned media-activity record.
///
/// Produced once during ingestion and never mutated afterwards. The
/// `engagements` count is always non-negative: missing or unparseable inputs
/// are coerced to 0 during cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Calendar date of the mention (no time component, no timezone)
    pub date: NaiveDate,
    /// Platform the mention appeared on
    pub platform: String,
    /// Raw sentiment label, kept case-sensitive
    pub sentiment: String,
    /// Geographic location of the mention
    pub location: String,
    /// Engagement count, coerced to a non-negative integer
    pub engagements: u64,
    /// Media type of the mention (e.g., "Text", "Image", "Video")
    pub mediatype: String,
}

/// An immutable, ordered collection of cleaned records.
///
/// Built once per upload and held for the lifetime of a session. A re-upload
/// replaces the whole Dataset; there is no partial-update or merge path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<CleanRecord>,
}

impl Dataset {
    /// Creates a Dataset from cleaned records, preserving their order.
    pub fn new(records: Vec<CleanRecord>) -> Self {
        Dataset { records }
    }

    /// The cleaned records in original upload order.
    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    /// Number of cleaned records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no rows survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Row counts reported after cleaning an upload.
///
/// Invariant: `original_row_count = final_row_count + rows_dropped_for_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the uploaded table before cleaning
    pub original_row_count: usize,
    /// Rows dropped because the date matched none of the accepted formats
    pub rows_dropped_for_date: usize,
    /// Rows surviving into the Dataset
    pub final_row_count: usize,
}
