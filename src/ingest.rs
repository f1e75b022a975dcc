//! CSV ingestion: the front door of the pipeline.
//!
//! An upload flows strictly one way: raw CSV bytes -> RawTable -> column
//! resolution -> cleaning -> Dataset. The RawTable is consumed immediately
//! and discarded; only the Dataset and its CleaningReport survive.

use crate::cleaner;
use crate::dataset::{CleaningReport, Dataset};
use crate::schema::{ColumnMap, SchemaError};
use std::fmt;

/// An uploaded table before any typing: free-form headers plus rows of
/// untyped string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a raw table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }

    /// The header row as read from the file.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The data rows, in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Errors that can occur while ingesting an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The file could not be parsed as CSV at all
    Csv(String),
    /// The header row is missing required columns
    Schema(SchemaError),
    /// The file contains no header row or no data
    EmptyInput,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Csv(msg) => write!(f, "CSV parse error: {}", msg),
            PipelineError::Schema(err) => write!(f, "schema error: {}", err),
            PipelineError::EmptyInput => write!(f, "uploaded file contains no data"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<SchemaError> for PipelineError {
    fn from(err: SchemaError) -> Self {
        PipelineError::Schema(err)
    }
}

/// Parses CSV text into a RawTable.
///
/// Rows are allowed to be shorter or longer than the header row; cleaning
/// defaults missing cells. A file without a header row is `EmptyInput`.
pub fn read_csv(data: &str) -> Result<RawTable, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(PipelineError::EmptyInput);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::Csv(e.to_string()))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Runs the full ingestion pipeline on uploaded CSV text.
///
/// Parses the CSV, resolves the required columns, and cleans every row.
/// A `SchemaError` is fatal: no Dataset is produced and no partial
/// processing proceeds. Row-level problems are absorbed by the cleaner and
/// surfaced through the CleaningReport instead.
pub fn ingest_csv(data: &str) -> Result<(Dataset, CleaningReport), PipelineError> {
    let table = read_csv(data)?;
    tracing::info!(
        columns = table.headers().len(),
        rows = table.rows().len(),
        "parsed uploaded CSV"
    );

    let columns = ColumnMap::resolve(table.headers())?;
    Ok(cleaner::clean(&table, &columns))
}
